//! FILENAME: app/src/dashboard_commands.rs
// PURPOSE: Dashboard generation, the dashboard view, and cleaned-data export.

use crate::api_types::{ChartConfig, DashboardResult, ExportResult, StepResult};
use crate::filter_commands::filtered_view;
use crate::wizard::WizardStep;
use crate::{log_error, log_info, AppState};
use engine::Dataset;
use ingest::dataset_to_delimited;

/// Validate and reserve a dashboard-generation request.
///
/// The snapshot handed to the charting service is the *filtered* dataset,
/// not the base one; the dashboard reflects what the user is looking at.
pub fn begin_dashboard(state: &AppState, instructions: &str) -> Result<Dataset, String> {
    let step = *state.step.lock().unwrap();
    if !step.allows_dashboard() {
        return Err("complete a cleaning run before generating a dashboard".to_string());
    }
    if instructions.trim().is_empty() {
        return Err("please enter dashboard instructions first".to_string());
    }

    let view = filtered_view(state)
        .ok_or_else(|| "complete a cleaning run before generating a dashboard".to_string())?;

    let mut busy = state.dashboard_busy.lock().unwrap();
    if *busy {
        return Err("a dashboard request is already running".to_string());
    }
    *busy = true;

    Ok(view)
}

/// Install the generated chart configs and move to the Dashboard step.
pub fn commit_dashboard(state: &AppState, charts: Vec<ChartConfig>) -> DashboardResult {
    log_info!("DASH", "generated {} charts", charts.len());
    *state.charts.lock().unwrap() = charts;
    *state.step.lock().unwrap() = WizardStep::Dashboard;
    *state.dashboard_busy.lock().unwrap() = false;
    dashboard_view(state)
}

/// Release the busy flag after a failed service call; the previous charts
/// (if any) stay as they were.
pub fn fail_dashboard(state: &AppState, error: String) -> DashboardResult {
    *state.dashboard_busy.lock().unwrap() = false;
    log_error!("DASH", "generation failed: {}", error);
    DashboardResult {
        success: false,
        error: Some(error),
        charts: Vec::new(),
        columns: Vec::new(),
        rows: Vec::new(),
    }
}

/// The charts plus the rows they should be drawn from. An empty dataset
/// yields an empty view, never an error.
pub fn dashboard_view(state: &AppState) -> DashboardResult {
    let charts = state.charts.lock().unwrap().clone();
    let view = filtered_view(state).unwrap_or_default();
    DashboardResult {
        success: true,
        error: None,
        charts,
        columns: view.columns,
        rows: view.records,
    }
}

/// Leave the dashboard and return to the review screen.
pub fn back_to_clean(state: &AppState) -> StepResult {
    let mut step = state.step.lock().unwrap();
    if *step == WizardStep::Dashboard {
        *step = WizardStep::Clean;
    }
    StepResult {
        success: true,
        error: None,
        step: *step,
    }
}

/// Export the present cleaned dataset (the whole dataset, not the filtered
/// view) as comma-delimited text.
pub fn export_cleaned(state: &AppState) -> ExportResult {
    let guard = state.history.lock().unwrap();
    let Some(history) = guard.as_ref() else {
        return ExportResult {
            success: false,
            error: Some("no cleaned dataset to export".to_string()),
            file_name: None,
            content: None,
        };
    };

    match dataset_to_delimited(&history.present().cleaned) {
        Ok(content) => {
            let original = state
                .file_name
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| "data".to_string());
            let stem = original.rsplit_once('.').map(|(s, _)| s).unwrap_or(&original);
            ExportResult {
                success: true,
                error: None,
                file_name: Some(format!("{}_cleaned.csv", stem)),
                content: Some(content),
            }
        }
        Err(err) => ExportResult {
            success: false,
            error: Some(err.to_string()),
            file_name: None,
            content: None,
        },
    }
}
