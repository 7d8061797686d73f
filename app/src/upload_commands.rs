//! FILENAME: app/src/upload_commands.rs
// PURPOSE: File upload and session reset.

use crate::api_types::{StepResult, UploadResult};
use crate::wizard::WizardStep;
use crate::{log_info, log_warn, AppState};

/// Ingest an uploaded file. On success the normalized delimited text is
/// stored and the wizard moves to the Clean step. Rejected files leave the
/// session untouched.
pub fn upload_file(state: &AppState, file_name: &str, bytes: &[u8]) -> UploadResult {
    let step = *state.step.lock().unwrap();
    if step != WizardStep::Upload {
        return UploadResult {
            success: false,
            error: Some(
                "a dataset is already loaded; reset the session to upload a new file".to_string(),
            ),
            file_name: None,
            row_count: 0,
            step,
        };
    }

    match ingest::normalize_upload(file_name, bytes) {
        Ok(text) => {
            let row_count = text.lines().count().saturating_sub(1);
            *state.raw_text.lock().unwrap() = Some(text);
            *state.file_name.lock().unwrap() = Some(file_name.to_string());
            *state.step.lock().unwrap() = WizardStep::Clean;
            log_info!("UPLOAD", "accepted {} ({} data rows)", file_name, row_count);
            UploadResult {
                success: true,
                error: None,
                file_name: Some(file_name.to_string()),
                row_count,
                step: WizardStep::Clean,
            }
        }
        Err(err) => {
            log_warn!("UPLOAD", "rejected {}: {}", file_name, err);
            UploadResult {
                success: false,
                error: Some(err.to_string()),
                file_name: None,
                row_count: 0,
                step,
            }
        }
    }
}

/// Return to the Upload step, discarding the whole session.
pub fn reset_session(state: &AppState) -> StepResult {
    *state.step.lock().unwrap() = WizardStep::Upload;
    *state.file_name.lock().unwrap() = None;
    *state.raw_text.lock().unwrap() = None;
    *state.run_id.lock().unwrap() = None;
    *state.summary.lock().unwrap() = None;
    *state.completed_at.lock().unwrap() = None;
    *state.history.lock().unwrap() = None;
    state.filters.lock().unwrap().clear();
    state.pager.lock().unwrap().reset();
    state.charts.lock().unwrap().clear();
    *state.cleaning_busy.lock().unwrap() = false;
    *state.dashboard_busy.lock().unwrap() = false;
    log_info!("SYS", "session reset");
    StepResult {
        success: true,
        error: None,
        step: WizardStep::Upload,
    }
}
