//! FILENAME: app/src/filter_commands.rs
// PURPOSE: Column filters and the paginated filtered view.
// CONTEXT: The filtered view is recomputed from the present dataset on every
// call; any command that changes the filtered sequence resets pagination.

use crate::api_types::{FilterOptionsResult, TableViewResult};
use crate::AppState;
use engine::{
    apply_selection, filterable_columns, page_count, page_slice, Dataset, Value,
    DEFAULT_PAGE_SIZE,
};

/// The present cleaned dataset, if a run has completed.
fn present_dataset(state: &AppState) -> Option<Dataset> {
    state
        .history
        .lock()
        .unwrap()
        .as_ref()
        .map(|history| history.present().cleaned.clone())
}

/// The filtered view of the present dataset (base dataset when no filter is
/// active). `None` before the first cleaning run.
pub fn filtered_view(state: &AppState) -> Option<Dataset> {
    let dataset = present_dataset(state)?;
    let filters = state.filters.lock().unwrap().clone();
    Some(apply_selection(&dataset, &filters))
}

/// Columns offered as filters, each with its sorted distinct-value domain.
/// Before the first run this degrades to an empty list.
pub fn filter_options(state: &AppState) -> FilterOptionsResult {
    let columns = match present_dataset(state) {
        Some(dataset) => filterable_columns(&dataset),
        None => Vec::new(),
    };
    FilterOptionsResult {
        success: true,
        columns,
    }
}

/// Replace the selected value set for one column. An empty list clears the
/// constraint. The filtered sequence changed, so pagination resets.
pub fn set_column_filter(state: &AppState, column: String, values: Vec<Value>) -> TableViewResult {
    if present_dataset(state).is_none() {
        return empty_view(Some("no cleaning run to filter".to_string()));
    }
    state.filters.lock().unwrap().set_column(column, values);
    state.pager.lock().unwrap().reset();
    current_view(state)
}

/// Drop every filter and show the base dataset from page 0.
pub fn clear_filters(state: &AppState) -> TableViewResult {
    state.filters.lock().unwrap().clear();
    state.pager.lock().unwrap().reset();
    current_view(state)
}

/// One page of the filtered view; `page` jumps there (clamped) first.
pub fn table_view(state: &AppState, page: Option<usize>) -> TableViewResult {
    if let (Some(page), Some(view)) = (page, filtered_view(state)) {
        state.pager.lock().unwrap().goto(page, view.len());
    }
    current_view(state)
}

pub fn next_page(state: &AppState) -> TableViewResult {
    if let Some(view) = filtered_view(state) {
        state.pager.lock().unwrap().next(view.len());
    }
    current_view(state)
}

pub fn previous_page(state: &AppState) -> TableViewResult {
    state.pager.lock().unwrap().previous();
    current_view(state)
}

fn current_view(state: &AppState) -> TableViewResult {
    let view = match filtered_view(state) {
        Some(view) => view,
        None => return empty_view(None),
    };

    let mut pager = state.pager.lock().unwrap();
    // The sequence may have shrunk since the pager last moved.
    pager.clamp(view.len());
    let rows = page_slice(&view.records, pager.page(), pager.page_size()).to_vec();

    TableViewResult {
        success: true,
        error: None,
        columns: view.columns.clone(),
        rows,
        page_index: pager.page(),
        page_count: page_count(view.len(), pager.page_size()),
        page_size: pager.page_size(),
        total_rows: view.len(),
    }
}

fn empty_view(error: Option<String>) -> TableViewResult {
    TableViewResult {
        success: error.is_none(),
        error,
        columns: Vec::new(),
        rows: Vec::new(),
        page_index: 0,
        page_count: 0,
        page_size: DEFAULT_PAGE_SIZE,
        total_rows: 0,
    }
}
