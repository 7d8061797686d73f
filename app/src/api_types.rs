//! FILENAME: app/src/api_types.rs
// PURPOSE: Shared type definitions for the JSON API.
// CONTEXT: All structs use camelCase serialization for JavaScript interoperability.

use crate::wizard::WizardStep;
use engine::{FilterColumn, Record, RemovedRow, Value};
use serde::{Deserialize, Serialize};

// ============================================================================
// CHART CONFIGURATION (produced by the assistant, passed through untouched)
// ============================================================================

/// The chart kinds the frontend knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Area,
    Scatter,
}

/// One chart on the dashboard. The backend never validates or reinterprets
/// these fields; it only relays them alongside the filtered dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub title: String,
    pub chart_type: ChartType,
    /// Column used for the category/x axis.
    pub data_key: String,
    /// Numeric columns plotted against the category axis.
    pub value_keys: Vec<String>,
    #[serde(default)]
    pub description: String,
}

// ============================================================================
// REVIEW DATA
// ============================================================================

/// A removed row as shown in the review list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedRowData {
    pub id: u64,
    pub original_row: Record,
    pub reason: String,
}

impl From<&RemovedRow> for RemovedRowData {
    fn from(row: &RemovedRow) -> Self {
        RemovedRowData {
            id: row.id,
            original_row: row.original_row.clone(),
            reason: row.reason.clone(),
        }
    }
}

/// Snapshot of the review screen for the current cleaning run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    pub columns: Vec<String>,
    pub removed_rows: Vec<RemovedRowData>,
    pub cleaned_count: usize,
    pub removed_count: usize,
    pub total_rows: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

// ============================================================================
// COMMAND PARAMETERS
// ============================================================================

/// Cleaning mode: "auto" runs with built-in instructions, "custom" requires
/// user-entered instruction text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanMode {
    #[default]
    Auto,
    Custom,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanParams {
    #[serde(default)]
    pub mode: CleanMode,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreParams {
    /// Durable id of the removed row, as handed out in `RemovedRowData`.
    pub id: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFilterParams {
    pub column: String,
    /// Selected values; an empty list clears the filter on this column.
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardParams {
    #[serde(default)]
    pub instructions: String,
}

// ============================================================================
// COMMAND RESULTS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Data rows in the normalized upload (header row excluded).
    pub row_count: usize,
    pub step: WizardStep,
}

/// Result of a cleaning request, and of review-state queries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewState>,
}

/// Result of a history mutation (restore, undo, redo).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResult {
    /// Whether the operation changed anything. An undo with nothing to undo
    /// reports `false` here without being an error.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub cleaned_count: usize,
    pub removed_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResult {
    pub success: bool,
    /// Columns offered as filters, each with its sorted value domain.
    pub columns: Vec<FilterColumn>,
}

/// One page of the filtered view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableViewResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub charts: Vec<ChartConfig>,
    pub columns: Vec<String>,
    /// The filtered (not base) dataset the charts should be drawn from.
    pub rows: Vec<Record>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Comma-delimited text, header row first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub step: WizardStep,
}
