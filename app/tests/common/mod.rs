//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for the wizard backend integration tests.

use app_lib::{clean_commands, create_app_state, upload_commands, AppState, CleaningOutcome};
use engine::{Dataset, Record, Value};

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Create a new test harness with empty state.
    pub fn new() -> Self {
        TestHarness {
            state: create_app_state(),
        }
    }

    /// Create a harness with a CSV upload accepted (wizard at the Clean step).
    pub fn with_upload() -> Self {
        let harness = Self::new();
        let result =
            upload_commands::upload_file(&harness.state, "employees.csv", sample_csv().as_bytes());
        assert!(result.success, "fixture upload failed: {:?}", result.error);
        harness
    }

    /// Create a harness with a completed cleaning run installed.
    pub fn with_cleaned_run() -> Self {
        let harness = Self::with_upload();
        let result = clean_commands::commit_clean(&harness.state, sample_outcome());
        assert!(result.success);
        harness
    }

    /// Ids of the currently removed rows, in review order.
    pub fn removed_ids(&self) -> Vec<u64> {
        let guard = self.state.history.lock().unwrap();
        guard
            .as_ref()
            .map(|history| {
                history
                    .present()
                    .removed_rows
                    .iter()
                    .map(|row| row.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Row counts of the present state: (cleaned, removed).
    pub fn counts(&self) -> (usize, usize) {
        let guard = self.state.history.lock().unwrap();
        guard
            .as_ref()
            .map(|history| {
                let present = history.present();
                (present.cleaned.len(), present.removed_rows.len())
            })
            .unwrap_or((0, 0))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TEST DATA FIXTURES
// ============================================================================

pub fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

pub fn number(n: f64) -> Value {
    Value::Number(n)
}

/// The raw upload used by the fixtures.
pub fn sample_csv() -> String {
    let mut lines = vec!["name,city,active,salary".to_string()];
    for (name, city, active, salary) in sample_rows() {
        lines.push(format!("{},{},{},{}", name, city, active, salary));
    }
    lines.push(",,,".to_string()); // the blank row the cleaner removes
    lines.join("\n") + "\n"
}

fn sample_rows() -> Vec<(&'static str, &'static str, &'static str, f64)> {
    vec![
        ("Alice", "New York", "yes", 75000.0),
        ("Bob", "Los Angeles", "yes", 65000.0),
        ("Charlie", "Chicago", "no", 85000.0),
        ("Diana", "Houston", "yes", 70000.0),
        ("Eve", "Phoenix", "yes", 80000.0),
        ("Frank", "Chicago", "no", 95000.0),
        ("Grace", "New York", "yes", 72000.0),
        ("Henry", "Houston", "yes", 88000.0),
        ("Ivy", "Chicago", "no", 62000.0),
    ]
}

/// The cleaning service's (simulated) verdict on the sample upload: every
/// data row kept, the blank row removed.
pub fn sample_outcome() -> CleaningOutcome {
    let columns = vec![
        "name".to_string(),
        "city".to_string(),
        "active".to_string(),
        "salary".to_string(),
    ];
    let records = sample_rows()
        .into_iter()
        .map(|(name, city, active, salary)| {
            record(&[
                ("name", text(name)),
                ("city", text(city)),
                ("active", text(active)),
                ("salary", number(salary)),
            ])
        })
        .collect();

    CleaningOutcome {
        cleaned: Dataset::new(columns, records),
        summary: "Removed 1 blank row".to_string(),
        removed: vec![(
            record(&[
                ("name", text("")),
                ("city", text("")),
                ("active", text("")),
            ]),
            "row is entirely blank".to_string(),
        )],
    }
}

/// An outcome sized for pagination tests: `rows` records, none removed.
pub fn outcome_with_rows(rows: usize) -> CleaningOutcome {
    let columns = vec!["item".to_string(), "bucket".to_string()];
    let records = (0..rows)
        .map(|i| {
            record(&[
                ("item", text(&format!("item-{:03}", i))),
                ("bucket", text(if i % 2 == 0 { "even" } else { "odd" })),
            ])
        })
        .collect();

    CleaningOutcome {
        cleaned: Dataset::new(columns, records),
        summary: "No rows removed".to_string(),
        removed: Vec::new(),
    }
}
