//! FILENAME: app/src/wizard.rs
//! PURPOSE: The wizard's step machine: Upload -> Clean -> Dashboard.
//! CONTEXT: Cross-step data lives in AppState; this enum only decides which
//! commands are legal at which step.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    /// Waiting for a file. Nothing else is populated.
    Upload,
    /// A file is loaded; cleaning and review happen here.
    Clean,
    /// Chart configs exist; the review data stays reachable behind it.
    Dashboard,
}

impl WizardStep {
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Upload => "upload",
            WizardStep::Clean => "clean",
            WizardStep::Dashboard => "dashboard",
        }
    }

    /// A cleaning run may only be requested once a file is loaded. Requesting
    /// another run from the dashboard is allowed and starts a fresh history.
    pub fn allows_cleaning(self) -> bool {
        !matches!(self, WizardStep::Upload)
    }

    /// Review/filter/pagination commands need a loaded session.
    pub fn allows_review(self) -> bool {
        !matches!(self, WizardStep::Upload)
    }

    pub fn allows_dashboard(self) -> bool {
        !matches!(self, WizardStep::Upload)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::Upload
    }
}
