//! FILENAME: tests/test_pagination.rs
//! Integration tests for the paginated table view.

mod common;

use app_lib::{clean_commands, filter_commands};
use common::TestHarness;

fn harness_with_rows(rows: usize) -> TestHarness {
    let harness = TestHarness::with_upload();
    clean_commands::commit_clean(&harness.state, common::outcome_with_rows(rows));
    harness
}

#[test]
fn test_25_rows_make_three_pages_of_10() {
    let harness = harness_with_rows(25);

    let page0 = filter_commands::table_view(&harness.state, None);
    assert_eq!(page0.page_count, 3);
    assert_eq!(page0.page_size, 10);
    assert_eq!(page0.rows.len(), 10);
    assert_eq!(page0.total_rows, 25);

    let page2 = filter_commands::table_view(&harness.state, Some(2));
    assert_eq!(page2.rows.len(), 5);
    assert_eq!(page2.page_index, 2);
}

#[test]
fn test_next_clamps_at_the_last_page() {
    let harness = harness_with_rows(25);

    filter_commands::table_view(&harness.state, Some(2));
    let view = filter_commands::next_page(&harness.state);
    assert_eq!(view.page_index, 2);
    assert_eq!(view.rows.len(), 5);
}

#[test]
fn test_previous_clamps_at_page_zero() {
    let harness = harness_with_rows(25);

    let view = filter_commands::previous_page(&harness.state);
    assert_eq!(view.page_index, 0);
    assert_eq!(view.rows.len(), 10);
}

#[test]
fn test_direct_page_jumps_are_clamped() {
    let harness = harness_with_rows(25);
    let view = filter_commands::table_view(&harness.state, Some(99));
    assert_eq!(view.page_index, 2);
}

#[test]
fn test_pages_hold_the_expected_rows() {
    let harness = harness_with_rows(25);
    let page1 = filter_commands::table_view(&harness.state, Some(1));
    assert_eq!(
        page1.rows[0].get("item"),
        Some(&common::text("item-010"))
    );
    assert_eq!(
        page1.rows[9].get("item"),
        Some(&common::text("item-019"))
    );
}

#[test]
fn test_empty_dataset_renders_zero_rows_without_error() {
    let harness = TestHarness::new();
    let view = filter_commands::table_view(&harness.state, None);
    assert!(view.success);
    assert!(view.rows.is_empty());
    assert_eq!(view.page_count, 0);
    assert_eq!(view.page_index, 0);
}

#[test]
fn test_restore_resets_to_the_first_page() {
    let harness = TestHarness::with_upload();
    let mut outcome = common::outcome_with_rows(25);
    outcome.removed.push((
        common::record(&[("item", common::text("item-bad"))]),
        "malformed".to_string(),
    ));
    clean_commands::commit_clean(&harness.state, outcome);

    filter_commands::table_view(&harness.state, Some(2));
    clean_commands::restore_row(&harness.state, 1);

    let view = filter_commands::table_view(&harness.state, None);
    assert_eq!(view.page_index, 0);
    assert_eq!(view.total_rows, 26);
}
