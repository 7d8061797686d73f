//! FILENAME: app/src/clean_commands.rs
// PURPOSE: Cleaning runs and history mutations (restore, undo, redo).
// CONTEXT: A cleaning request is split into begin/commit/fail so the HTTP
// layer never holds a state lock across the assistant call.

use crate::api_types::{CleanMode, EditResult, RemovedRowData, ReviewResult, ReviewState};
use crate::assistant::CleaningOutcome;
use crate::{log_error, log_info, AppState};
use chrono::Utc;
use engine::{ChangeLog, CleaningState, History};
use uuid::Uuid;

/// Instructions used by the one-click "auto clean" mode.
pub const AUTO_CLEAN_INSTRUCTIONS: &str = "Remove rows that are unusable: \
exact duplicates, rows with missing required values, and rows whose values \
are malformed for their column. Keep all other rows and columns unchanged.";

/// Validate and reserve a cleaning request.
///
/// Checks the wizard step, the instruction text (custom mode must carry
/// non-empty instructions; this is rejected locally before any service
/// call), and the per-kind busy flag. On success the busy flag is set and
/// the raw-text snapshot to hand to the assistant is returned.
pub fn begin_clean(
    state: &AppState,
    mode: CleanMode,
    instructions: &str,
) -> Result<String, String> {
    let step = *state.step.lock().unwrap();
    if !step.allows_cleaning() {
        return Err("upload a file before requesting a clean".to_string());
    }
    if mode == CleanMode::Custom && instructions.trim().is_empty() {
        return Err("please enter cleaning instructions first".to_string());
    }

    let raw = state
        .raw_text
        .lock()
        .unwrap()
        .clone()
        .ok_or_else(|| "no uploaded data to clean".to_string())?;

    let mut busy = state.cleaning_busy.lock().unwrap();
    if *busy {
        return Err("a cleaning request is already running".to_string());
    }
    *busy = true;

    Ok(raw)
}

/// The instruction text actually sent to the service for a request.
pub fn effective_instructions(mode: CleanMode, instructions: &str) -> String {
    match mode {
        CleanMode::Auto => AUTO_CLEAN_INSTRUCTIONS.to_string(),
        CleanMode::Custom => instructions.trim().to_string(),
    }
}

/// Install a fully successful cleaning response as a fresh history.
///
/// This is the only place a history is created: one history lifetime per
/// cleaning run. Filters, pagination and charts from the previous run are
/// discarded with it.
pub fn commit_clean(state: &AppState, outcome: CleaningOutcome) -> ReviewResult {
    let log = ChangeLog::new(outcome.summary, outcome.removed);
    let summary = log.summary.clone();
    let initial = CleaningState::new(outcome.cleaned, log.removed_rows);
    log_info!(
        "CLEAN",
        "run complete: {} kept, {} removed",
        initial.cleaned.len(),
        initial.removed_rows.len()
    );

    *state.history.lock().unwrap() = Some(History::new(initial));
    *state.run_id.lock().unwrap() = Some(Uuid::new_v4().to_string());
    *state.summary.lock().unwrap() = Some(summary);
    *state.completed_at.lock().unwrap() = Some(Utc::now().to_rfc3339());
    state.filters.lock().unwrap().clear();
    state.pager.lock().unwrap().reset();
    state.charts.lock().unwrap().clear();
    *state.cleaning_busy.lock().unwrap() = false;

    ReviewResult {
        success: true,
        error: None,
        review: build_review(state),
    }
}

/// Release the busy flag after a failed service call. Nothing else changes:
/// no partial state is ever committed.
pub fn fail_clean(state: &AppState, error: String) -> ReviewResult {
    *state.cleaning_busy.lock().unwrap() = false;
    log_error!("CLEAN", "run failed: {}", error);
    ReviewResult {
        success: false,
        error: Some(error),
        review: None,
    }
}

/// Current review screen, or an empty result before the first run.
pub fn review(state: &AppState) -> ReviewResult {
    ReviewResult {
        success: true,
        error: None,
        review: build_review(state),
    }
}

/// Move one removed row back into the cleaned dataset, addressed by its
/// durable id. An unknown id (e.g. a stale review list) is a rejected no-op.
pub fn restore_row(state: &AppState, id: u64) -> EditResult {
    let mut guard = state.history.lock().unwrap();
    let Some(history) = guard.as_mut() else {
        return no_run_result("no cleaning run to edit");
    };

    let Some(next) = history.present().restore(id) else {
        let mut result = edit_result(history, false);
        result.error = Some("removed row not found".to_string());
        return result;
    };

    history.apply_edit(next);
    let result = edit_result(history, true);
    drop(guard);
    state.pager.lock().unwrap().reset();
    log_info!("CLEAN", "restored removed row {}", id);
    result
}

/// Step the history back one snapshot. Safe to call with nothing to undo.
pub fn undo(state: &AppState) -> EditResult {
    let mut guard = state.history.lock().unwrap();
    let Some(history) = guard.as_mut() else {
        return no_run_result("no cleaning run to undo");
    };

    let moved = history.undo();
    let result = edit_result(history, moved);
    drop(guard);
    if moved {
        state.pager.lock().unwrap().reset();
    }
    result
}

/// Step the history forward one snapshot. Safe to call with nothing to redo.
pub fn redo(state: &AppState) -> EditResult {
    let mut guard = state.history.lock().unwrap();
    let Some(history) = guard.as_mut() else {
        return no_run_result("no cleaning run to redo");
    };

    let moved = history.redo();
    let result = edit_result(history, moved);
    drop(guard);
    if moved {
        state.pager.lock().unwrap().reset();
    }
    result
}

/// Build the review snapshot from the present history state.
pub fn build_review(state: &AppState) -> Option<ReviewState> {
    let guard = state.history.lock().unwrap();
    let history = guard.as_ref()?;
    let present = history.present();
    Some(ReviewState {
        columns: present.cleaned.columns.clone(),
        removed_rows: present
            .removed_rows
            .iter()
            .map(RemovedRowData::from)
            .collect(),
        cleaned_count: present.cleaned.len(),
        removed_count: present.removed_rows.len(),
        total_rows: present.total_rows(),
        can_undo: history.can_undo(),
        can_redo: history.can_redo(),
        summary: state.summary.lock().unwrap().clone(),
        run_id: state.run_id.lock().unwrap().clone(),
        completed_at: state.completed_at.lock().unwrap().clone(),
    })
}

fn edit_result(history: &History, success: bool) -> EditResult {
    let present = history.present();
    EditResult {
        success,
        error: None,
        can_undo: history.can_undo(),
        can_redo: history.can_redo(),
        cleaned_count: present.cleaned.len(),
        removed_count: present.removed_rows.len(),
    }
}

fn no_run_result(message: &str) -> EditResult {
    EditResult {
        success: false,
        error: Some(message.to_string()),
        can_undo: false,
        can_redo: false,
        cleaned_count: 0,
        removed_count: 0,
    }
}
