//! FILENAME: tests/test_assistant.rs
//! Decoding tests for the cleaning/charting service responses. These are
//! pure: no network is involved.

use app_lib::{parse_chart_response, parse_cleaning_response, AssistantError, ChartType};
use engine::Value;

const CLEANING_REPLY: &str = r#"{
    "cleanedData": [
        {"id": 1, "val": "a"},
        {"id": 3, "val": "b"}
    ],
    "changeLog": {
        "summary": "Removed 1 row",
        "removedRows": [
            {"originalRow": {"id": 2, "val": ""}, "reason": "missing value in val"}
        ]
    }
}"#;

// ============================================================================
// CLEANING RESPONSES
// ============================================================================

#[test]
fn test_wellformed_cleaning_reply_decodes() {
    let outcome = parse_cleaning_response(CLEANING_REPLY).unwrap();

    assert_eq!(outcome.cleaned.columns, vec!["id", "val"]);
    assert_eq!(outcome.cleaned.len(), 2);
    assert_eq!(outcome.summary, "Removed 1 row");
    assert_eq!(outcome.removed.len(), 1);

    let (row, reason) = &outcome.removed[0];
    assert_eq!(row.get("id"), Some(&Value::Number(2.0)));
    assert_eq!(reason, "missing value in val");
}

#[test]
fn test_code_fenced_reply_decodes() {
    let fenced = format!("```json\n{}\n```", CLEANING_REPLY);
    let outcome = parse_cleaning_response(&fenced).unwrap();
    assert_eq!(outcome.cleaned.len(), 2);
}

#[test]
fn test_empty_cleaned_data_is_an_empty_dataset() {
    let reply = r#"{
        "cleanedData": [],
        "changeLog": {
            "summary": "Everything was junk",
            "removedRows": [
                {"originalRow": {"id": 1}, "reason": "junk"}
            ]
        }
    }"#;
    let outcome = parse_cleaning_response(reply).unwrap();
    assert!(outcome.cleaned.is_empty());
    assert_eq!(outcome.removed.len(), 1);
}

#[test]
fn test_non_json_reply_is_a_descriptive_failure() {
    let err = parse_cleaning_response("Sure! I cleaned your data.").unwrap_err();
    assert!(matches!(err, AssistantError::Malformed(_)));
    assert!(err.to_string().contains("could not be interpreted"));
}

#[test]
fn test_missing_change_log_is_rejected() {
    let err = parse_cleaning_response(r#"{"cleanedData": [{"a": 1}]}"#).unwrap_err();
    assert!(matches!(err, AssistantError::Malformed(_)));
}

#[test]
fn test_cleaned_data_must_be_an_array_of_objects() {
    let reply = r#"{
        "cleanedData": {"a": 1},
        "changeLog": {"summary": "s", "removedRows": []}
    }"#;
    let err = parse_cleaning_response(reply).unwrap_err();
    assert!(err.to_string().contains("cleanedData"));
}

#[test]
fn test_null_cells_in_cleaned_data_become_missing_values() {
    let reply = r#"{
        "cleanedData": [{"a": 1, "b": null}],
        "changeLog": {"summary": "s", "removedRows": []}
    }"#;
    let outcome = parse_cleaning_response(reply).unwrap();
    assert!(outcome.cleaned.columns.iter().any(|c| c == "b"));
    assert!(outcome.cleaned.records[0].get("b").is_none());
}

// ============================================================================
// CHART RESPONSES
// ============================================================================

#[test]
fn test_wellformed_chart_reply_decodes() {
    let reply = r#"[
        {
            "title": "Sales by region",
            "chartType": "bar",
            "dataKey": "region",
            "valueKeys": ["sales", "quantity"],
            "description": "Total sales per region"
        },
        {
            "title": "Sales share",
            "chartType": "pie",
            "dataKey": "region",
            "valueKeys": ["sales"]
        }
    ]"#;
    let charts = parse_chart_response(reply).unwrap();

    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0].chart_type, ChartType::Bar);
    assert_eq!(charts[0].value_keys, vec!["sales", "quantity"]);
    // description is optional in the reply; it defaults to empty.
    assert_eq!(charts[1].description, "");
}

#[test]
fn test_unknown_chart_type_is_rejected() {
    let reply = r#"[{"title": "t", "chartType": "sunburst", "dataKey": "a", "valueKeys": []}]"#;
    let err = parse_chart_response(reply).unwrap_err();
    assert!(matches!(err, AssistantError::Malformed(_)));
}

#[test]
fn test_chart_reply_must_be_an_array() {
    let err = parse_chart_response(r#"{"title": "t"}"#).unwrap_err();
    assert!(matches!(err, AssistantError::Malformed(_)));
}
