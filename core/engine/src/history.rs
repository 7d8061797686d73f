//! FILENAME: core/engine/src/history.rs
//! PURPOSE: Linear undo/redo history of CleaningState snapshots.
//! CONTEXT: One history lifetime per cleaning run. A fresh edit discards the
//! redo branch; this is plain editor undo semantics, not a DAG of edits.

use crate::cleaning::CleaningState;
use std::collections::VecDeque;
use std::mem;

/// Navigable, branch-discarding history over whole-state snapshots.
///
/// `past` holds older states (most recent last), `present` is the current
/// state, `future` holds undone states (most recent undo first). `present`
/// is always defined once constructed.
#[derive(Debug, Clone)]
pub struct History {
    past: Vec<CleaningState>,
    present: CleaningState,
    future: VecDeque<CleaningState>,
}

impl History {
    /// Start a new history for a completed cleaning run. Any prior history
    /// is discarded by the caller dropping its old instance.
    pub fn new(initial: CleaningState) -> Self {
        History {
            past: Vec::new(),
            present: initial,
            future: VecDeque::new(),
        }
    }

    pub fn present(&self) -> &CleaningState {
        &self.present
    }

    /// Install a new present state. The old present moves to `past` and the
    /// redo branch is invalidated.
    pub fn apply_edit(&mut self, next: CleaningState) {
        let previous = mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
    }

    /// Step back one snapshot. No-op (returns false) when there is nothing
    /// to undo; safe to call unconditionally.
    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                let current = mem::replace(&mut self.present, previous);
                self.future.push_front(current);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. No-op (returns false) when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.future.pop_front() {
            Some(next) => {
                let current = mem::replace(&mut self.present, next);
                self.past.push(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Current stack sizes (for diagnostics).
    pub fn depth(&self) -> (usize, usize) {
        (self.past.len(), self.future.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::ChangeLog;
    use crate::dataset::{Dataset, Record, Value};

    fn row(id: f64) -> Record {
        [("id".to_string(), Value::Number(id))].into_iter().collect()
    }

    fn run_with_removed(kept: &[f64], removed: &[f64]) -> History {
        let cleaned = Dataset::new(
            vec!["id".to_string()],
            kept.iter().map(|id| row(*id)).collect(),
        );
        let log = ChangeLog::new(
            format!("Removed {} rows", removed.len()),
            removed
                .iter()
                .map(|id| (row(*id), "bad row".to_string()))
                .collect(),
        );
        History::new(CleaningState::new(cleaned, log.removed_rows))
    }

    #[test]
    fn fresh_history_has_no_undo_or_redo() {
        let history = run_with_removed(&[1.0, 2.0], &[3.0]);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_then_redo_is_identity_at_any_depth() {
        let mut history = run_with_removed(&[1.0], &[2.0, 3.0, 4.0]);

        for id in [1, 2, 3] {
            let next = history.present().restore(id).unwrap();
            history.apply_edit(next);
        }

        let before = history.present().clone();
        assert!(history.undo());
        assert!(history.undo());
        assert!(history.redo());
        assert!(history.redo());
        assert_eq!(*history.present(), before);
    }

    #[test]
    fn apply_edit_discards_redo_branch() {
        let mut history = run_with_removed(&[1.0], &[2.0, 3.0]);

        let first = history.present().restore(1).unwrap();
        history.apply_edit(first);
        assert!(history.undo());
        assert!(history.can_redo());

        // A fresh edit after undo invalidates the redo branch for good.
        let second = history.present().restore(2).unwrap();
        history.apply_edit(second);
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.depth(), (1, 0));
    }

    #[test]
    fn undo_and_redo_on_empty_stacks_are_noops() {
        let mut history = run_with_removed(&[1.0], &[]);
        let before = history.present().clone();
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(*history.present(), before);
    }

    #[test]
    fn row_count_is_conserved_across_edits() {
        let mut history = run_with_removed(&[1.0, 2.0], &[3.0, 4.0]);
        let total = history.present().total_rows();

        let next = history.present().restore(1).unwrap();
        history.apply_edit(next);
        assert_eq!(history.present().total_rows(), total);

        history.undo();
        assert_eq!(history.present().total_rows(), total);

        history.redo();
        assert_eq!(history.present().total_rows(), total);
    }
}
