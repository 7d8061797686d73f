//! FILENAME: core/engine/src/cleaning.rs
//! PURPOSE: The change log produced by a cleaning run and the CleaningState
//! snapshot tracked by history.
//! CONTEXT: Removed rows carry a durable id assigned once at change-log
//! creation; restores address rows by id, never by display position.

use crate::dataset::{Dataset, Record};
use serde::{Deserialize, Serialize};

/// One row dropped by a cleaning run, with the human-readable justification.
///
/// Created in bulk when a run completes, removed individually when the user
/// restores that row, never mutated otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedRow {
    /// Durable identifier, monotonic within one cleaning run.
    pub id: u64,
    pub original_row: Record,
    pub reason: String,
}

/// Per-run record of what the cleaning service dropped and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLog {
    pub summary: String,
    pub removed_rows: Vec<RemovedRow>,
}

impl ChangeLog {
    /// Build a change log from raw (row, reason) pairs, assigning ids.
    pub fn new(summary: String, removed: Vec<(Record, String)>) -> Self {
        let removed_rows = removed
            .into_iter()
            .enumerate()
            .map(|(i, (original_row, reason))| RemovedRow {
                id: (i + 1) as u64,
                original_row,
                reason,
            })
            .collect();
        ChangeLog {
            summary,
            removed_rows,
        }
    }
}

/// The unit of history: the cleaned dataset paired with the rows still
/// removed from it.
///
/// Invariant: `cleaned` and `removed_rows` partition the rows known to this
/// cleaning run. Restoring moves a row from `removed_rows` to the end of
/// `cleaned`; it is never duplicated or lost, so
/// `cleaned.len() + removed_rows.len()` is constant across restores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningState {
    pub cleaned: Dataset,
    pub removed_rows: Vec<RemovedRow>,
}

impl CleaningState {
    pub fn new(cleaned: Dataset, removed_rows: Vec<RemovedRow>) -> Self {
        CleaningState {
            cleaned,
            removed_rows,
        }
    }

    /// Total rows known to this cleaning run (the conservation quantity).
    pub fn total_rows(&self) -> usize {
        self.cleaned.len() + self.removed_rows.len()
    }

    /// Build the successor state with the row of the given id restored:
    /// appended to the end of the cleaned dataset and dropped from the
    /// removed list. Returns `None` for an unknown id (callers treat that as
    /// a no-op, never a crash).
    pub fn restore(&self, id: u64) -> Option<CleaningState> {
        let index = self.removed_rows.iter().position(|r| r.id == id)?;
        let mut next = self.clone();
        let entry = next.removed_rows.remove(index);
        next.cleaned.push(entry.original_row);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sample_state() -> CleaningState {
        let cleaned = Dataset::new(
            vec!["id".to_string(), "val".to_string()],
            vec![
                record(&[("id", Value::Number(1.0)), ("val", Value::Text("a".into()))]),
                record(&[("id", Value::Number(3.0)), ("val", Value::Text("b".into()))]),
            ],
        );
        let log = ChangeLog::new(
            "Removed 1 row".to_string(),
            vec![(
                record(&[("id", Value::Number(2.0)), ("val", Value::Text("".into()))]),
                "missing value in val".to_string(),
            )],
        );
        CleaningState::new(cleaned, log.removed_rows)
    }

    #[test]
    fn change_log_assigns_monotonic_ids() {
        let log = ChangeLog::new(
            "two rows".to_string(),
            vec![
                (Record::new(), "first".to_string()),
                (Record::new(), "second".to_string()),
            ],
        );
        let ids: Vec<u64> = log.removed_rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn restore_appends_and_conserves_rows() {
        let state = sample_state();
        let total = state.total_rows();

        let restored = state.restore(1).expect("id 1 exists");
        assert_eq!(restored.total_rows(), total);
        assert_eq!(restored.cleaned.len(), 3);
        assert!(restored.removed_rows.is_empty());

        // The restored row lands at the end, not at its original position.
        let last = restored.cleaned.records.last().unwrap();
        assert_eq!(last.get("id"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn restore_unknown_id_is_none() {
        let state = sample_state();
        assert!(state.restore(99).is_none());
    }
}
