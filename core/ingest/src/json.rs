//! FILENAME: core/ingest/src/json.rs
//! PURPOSE: JSON array-of-objects payloads converted to datasets.
//! CONTEXT: Shared with the app crate, which decodes the cleaning service's
//! responses through the same converter.

use crate::delimited::dataset_to_delimited;
use crate::error::IngestError;
use engine::{Dataset, Record, Value};
use serde_json::Value as JsonValue;

/// Convert a parsed JSON value into a dataset.
///
/// The value must be an array of flat objects. The header is the union of
/// keys in first-seen order. A `null` is treated as a missing value, a bool
/// becomes text; nested arrays/objects are rejected with a descriptive error.
pub fn json_to_dataset(value: &JsonValue) -> Result<Dataset, IngestError> {
    let rows = value.as_array().ok_or_else(|| {
        IngestError::InvalidFormat("JSON payload must be an array of objects".to_string())
    })?;

    if rows.is_empty() {
        return Err(IngestError::InvalidFormat(
            "JSON array contains no rows".to_string(),
        ));
    }

    let mut columns: Vec<String> = Vec::new();
    let mut records: Vec<Record> = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let object = row.as_object().ok_or_else(|| {
            IngestError::InvalidFormat(format!("row {} is not an object", index + 1))
        })?;

        let mut record = Record::new();
        for (key, value) in object {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
            match value {
                JsonValue::Null => {}
                JsonValue::Bool(b) => record.insert(key.clone(), Value::Text(b.to_string())),
                JsonValue::Number(n) => {
                    let number = n.as_f64().ok_or_else(|| {
                        IngestError::InvalidFormat(format!(
                            "row {}: column \"{}\" holds an unrepresentable number",
                            index + 1,
                            key
                        ))
                    })?;
                    record.insert(key.clone(), Value::Number(number));
                }
                JsonValue::String(s) => record.insert(key.clone(), Value::Text(s.clone())),
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    return Err(IngestError::InvalidFormat(format!(
                        "row {}: column \"{}\" holds a nested value",
                        index + 1,
                        key
                    )));
                }
            }
        }
        records.push(record);
    }

    Ok(Dataset::new(columns, records))
}

/// Convert one JSON object into a record (used for removed-row payloads).
pub fn record_from_json(value: &JsonValue) -> Result<Record, IngestError> {
    let wrapped = JsonValue::Array(vec![value.clone()]);
    let dataset = json_to_dataset(&wrapped)?;
    Ok(dataset.records.into_iter().next().unwrap_or_default())
}

/// Parse raw JSON text and normalize it to delimited text with a header row.
pub fn json_text_to_delimited(text: &str) -> Result<String, IngestError> {
    let value: JsonValue = serde_json::from_str(text)?;
    let dataset = json_to_dataset(&value)?;
    dataset_to_delimited(&dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_of_objects_becomes_a_dataset() {
        let value = json!([
            {"name": "Ada", "age": 36},
            {"name": "Grace", "age": 45}
        ]);
        let dataset = json_to_dataset(&value).unwrap();
        assert_eq!(dataset.columns, vec!["name", "age"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.records[0].get("age"),
            Some(&Value::Number(36.0))
        );
    }

    #[test]
    fn null_is_a_missing_value_not_an_error() {
        let value = json!([{"name": "Ada", "age": null}]);
        let dataset = json_to_dataset(&value).unwrap();
        assert!(dataset.columns.iter().any(|c| c == "age"));
        assert!(dataset.records[0].get("age").is_none());
    }

    #[test]
    fn non_array_payloads_are_rejected() {
        let err = json_to_dataset(&json!({"name": "Ada"})).unwrap_err();
        assert!(err.to_string().contains("array of objects"));
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = json_to_dataset(&json!([{"tags": ["a", "b"]}])).unwrap_err();
        assert!(err.to_string().contains("nested"));
    }

    #[test]
    fn json_text_normalizes_to_delimited() {
        let out = json_text_to_delimited(r#"[{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]"#).unwrap();
        assert_eq!(out, "a,b\n1,x\n2,y\n");
    }

    #[test]
    fn unparsable_json_fails_immediately() {
        assert!(json_text_to_delimited("{not json").is_err());
    }
}
