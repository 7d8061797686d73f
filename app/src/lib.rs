//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the wizard backend.
// CONTEXT: Session state for one wizard instance; commands operate on it and
// the HTTP layer stays a thin wrapper around them.

use engine::{FilterSelection, History, Pager};
use std::sync::Mutex;

pub mod api_types;
pub mod assistant;
pub mod clean_commands;
pub mod dashboard_commands;
pub mod filter_commands;
pub mod logging;
pub mod server;
pub mod upload_commands;
pub mod wizard;

pub use api_types::{
    ChartConfig, ChartType, CleanMode, CleanParams, DashboardParams, DashboardResult, EditResult,
    ExportResult, FilterOptionsResult, PageQuery, RemovedRowData, RestoreParams, ReviewResult,
    ReviewState, SetFilterParams, StepResult, TableViewResult, UploadResult,
};
pub use assistant::{
    parse_chart_response, parse_cleaning_response, Assistant, AssistantConfig, AssistantError,
    CleaningOutcome,
};
pub use logging::{get_log_path, init_log_file, next_seq, write_log};
pub use server::run;
pub use wizard::WizardStep;


// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Session state for one wizard instance.
///
/// The history is the single owner of the cleaning-state stack; the filter
/// selection and pager only ever describe derived views of its present
/// dataset. The busy flags are the request backpressure: one outstanding
/// assistant call per kind, no queueing, no cancellation.
pub struct AppState {
    /// Which wizard step the user is on.
    pub step: Mutex<WizardStep>,
    /// Name of the uploaded file, for display and export naming.
    pub file_name: Mutex<Option<String>>,
    /// Normalized upload: comma-delimited text with a header row.
    pub raw_text: Mutex<Option<String>>,
    /// Identifier of the current cleaning run.
    pub run_id: Mutex<Option<String>>,
    /// The change-log summary of the current run.
    pub summary: Mutex<Option<String>>,
    /// RFC 3339 timestamp of when the current run completed.
    pub completed_at: Mutex<Option<String>>,
    /// Undo/redo history; `Some` once a cleaning run has completed.
    pub history: Mutex<Option<History>>,
    /// Active per-column value filters over the present cleaned dataset.
    pub filters: Mutex<FilterSelection>,
    /// Current page of the filtered view.
    pub pager: Mutex<Pager>,
    /// Chart configurations from the latest dashboard generation.
    pub charts: Mutex<Vec<ChartConfig>>,
    /// True while a cleaning request is outstanding.
    pub cleaning_busy: Mutex<bool>,
    /// True while a dashboard-generation request is outstanding.
    pub dashboard_busy: Mutex<bool>,
}

pub fn create_app_state() -> AppState {
    log_info!("SYS", "Creating AppState");
    AppState {
        step: Mutex::new(WizardStep::Upload),
        file_name: Mutex::new(None),
        raw_text: Mutex::new(None),
        run_id: Mutex::new(None),
        summary: Mutex::new(None),
        completed_at: Mutex::new(None),
        history: Mutex::new(None),
        filters: Mutex::new(FilterSelection::new()),
        pager: Mutex::new(Pager::default()),
        charts: Mutex::new(Vec::new()),
        cleaning_busy: Mutex::new(false),
        dashboard_busy: Mutex::new(false),
    }
}
