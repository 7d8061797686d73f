//! FILENAME: core/ingest/src/delimited.rs
//! PURPOSE: Delimited-text validation and emission.
//! CONTEXT: Everything the core consumes is comma-delimited text with a
//! header row; this module is the one place that reads or writes it.

use crate::error::IngestError;
use engine::Dataset;

/// Re-emit delimited text as comma-delimited, validating it on the way.
///
/// The first row is taken as the header. Ragged rows are tolerated (the
/// record model treats absent cells as "no value" downstream).
pub fn normalize_delimited(text: &str, delimiter: u8) -> Result<String, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let mut rows = 0usize;
    for record in reader.records() {
        let record = record?;
        writer.write_record(&record)?;
        rows += 1;
    }

    if rows == 0 {
        return Err(IngestError::InvalidFormat(
            "file contains no rows".to_string(),
        ));
    }

    finish(writer)
}

/// Emit a dataset as comma-delimited text, header row first. Missing values
/// become empty cells.
pub fn dataset_to_delimited(dataset: &Dataset) -> Result<String, IngestError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&dataset.columns)?;

    for record in &dataset.records {
        let row: Vec<String> = dataset
            .columns
            .iter()
            .map(|column| {
                record
                    .get(column)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&row)?;
    }

    finish(writer)
}

/// Guess the delimiter of a plain-text upload from its first line.
pub fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or("");
    let tabs = first_line.matches('\t').count();
    let commas = first_line.matches(',').count();
    if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, IngestError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| IngestError::InvalidFormat(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| IngestError::InvalidFormat("output is not valid UTF-8".to_string()))
}
