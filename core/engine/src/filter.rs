//! FILENAME: core/engine/src/filter.rs
//! PURPOSE: Filterable-column detection and value-set filtering of a dataset.
//! CONTEXT: The filter engine only derives views; it never mutates the base
//! dataset. Recomputation is deterministic and total.

use crate::dataset::{Dataset, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Columns with more distinct values than this are not offered as filters.
pub const MAX_FILTER_VALUES: usize = 50;

/// A column offered as a filter, with its sorted distinct-value domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterColumn {
    pub name: String,
    pub values: Vec<Value>,
}

/// Per-column sets of allowed values narrowing the active view.
///
/// A column absent from the mapping, or mapped to an empty set, imposes no
/// constraint on that column ("show everything", not "show nothing").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection {
    selections: HashMap<String, BTreeSet<Value>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected set for a column. An empty set clears the
    /// constraint on that column.
    pub fn set_column(&mut self, column: impl Into<String>, values: impl IntoIterator<Item = Value>) {
        let set: BTreeSet<Value> = values.into_iter().collect();
        let column = column.into();
        if set.is_empty() {
            self.selections.remove(&column);
        } else {
            self.selections.insert(column, set);
        }
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// The allowed set for a column, if it actually constrains anything.
    pub fn allowed(&self, column: &str) -> Option<&BTreeSet<Value>> {
        self.selections.get(column).filter(|set| !set.is_empty())
    }

    /// True when no column imposes a constraint.
    pub fn is_noop(&self) -> bool {
        self.selections.values().all(|set| set.is_empty())
    }

    /// Columns that currently constrain the view.
    pub fn active_columns(&self) -> impl Iterator<Item = &String> {
        self.selections
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(column, _)| column)
    }
}

/// Distinct values of one column across the whole dataset, sorted ascending
/// (lexical for text, numeric for numbers).
pub fn distinct_values(dataset: &Dataset, column: &str) -> Vec<Value> {
    let mut set = BTreeSet::new();
    for record in &dataset.records {
        if let Some(value) = record.get(column) {
            set.insert(value.clone());
        }
    }
    set.into_iter().collect()
}

/// Determine which columns are offered as filters.
///
/// A column qualifies when its value in the first record is text and its
/// distinct-value count is greater than 1 and at most `MAX_FILTER_VALUES`.
/// This is a deliberate heuristic, not strict type inference: a column whose
/// first row happens to hold a number is simply not offered.
pub fn filterable_columns(dataset: &Dataset) -> Vec<FilterColumn> {
    let first = match dataset.records.first() {
        Some(record) => record,
        None => return Vec::new(),
    };

    let mut columns = Vec::new();
    for name in &dataset.columns {
        let is_text = first.get(name).map(Value::is_text).unwrap_or(false);
        if !is_text {
            continue;
        }
        let values = distinct_values(dataset, name);
        if values.len() > 1 && values.len() <= MAX_FILTER_VALUES {
            columns.push(FilterColumn {
                name: name.clone(),
                values,
            });
        }
    }
    columns
}

/// Compute the filtered view: the records matching every constrained column.
///
/// A record matches when, for each column with a non-empty selected set, its
/// value for that column is in the set. A record missing a value for a
/// constrained column does not match. An all-empty selection returns the
/// dataset unchanged (same rows, same order).
pub fn apply_selection(dataset: &Dataset, selection: &FilterSelection) -> Dataset {
    if selection.is_noop() {
        return dataset.clone();
    }

    let records = dataset
        .records
        .iter()
        .filter(|record| {
            selection.active_columns().all(|column| {
                match (record.get(column), selection.allowed(column)) {
                    (Some(value), Some(allowed)) => allowed.contains(value),
                    (None, Some(_)) => false,
                    // Unreachable: active_columns only yields constrained columns.
                    _ => true,
                }
            })
        })
        .cloned()
        .collect();

    Dataset::new(dataset.columns.clone(), records)
}
