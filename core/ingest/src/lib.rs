//! FILENAME: core/ingest/src/lib.rs
//! PURPOSE: Upload normalization: delimited text, spreadsheets and JSON
//! arrays all become comma-delimited text with a header row.
//! CONTEXT: The core only ever sees the normalized form; anything this crate
//! cannot interpret fails here with a user-visible message.

pub mod delimited;
pub mod error;
pub mod json;
pub mod spreadsheet;

pub use delimited::{dataset_to_delimited, normalize_delimited, sniff_delimiter};
pub use error::IngestError;
pub use json::{json_text_to_delimited, json_to_dataset, record_from_json};
pub use spreadsheet::spreadsheet_to_delimited;

/// Normalize an uploaded file to delimited text, dispatching on extension.
pub fn normalize_upload(file_name: &str, bytes: &[u8]) -> Result<String, IngestError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => normalize_delimited(as_text(bytes)?, b','),
        "tsv" => normalize_delimited(as_text(bytes)?, b'\t'),
        "txt" => {
            let text = as_text(bytes)?;
            let delimiter = sniff_delimiter(text);
            normalize_delimited(text, delimiter)
        }
        "json" => json_text_to_delimited(as_text(bytes)?),
        "xlsx" | "xls" | "ods" => spreadsheet_to_delimited(bytes),
        "" => Err(IngestError::Unsupported(
            "file has no extension".to_string(),
        )),
        other => Err(IngestError::Unsupported(format!(".{}", other))),
    }
}

fn as_text(bytes: &[u8]) -> Result<&str, IngestError> {
    std::str::from_utf8(bytes)
        .map_err(|_| IngestError::InvalidFormat("file is not valid UTF-8 text".to_string()))
}
