//! FILENAME: core/ingest/src/spreadsheet.rs
//! PURPOSE: Spreadsheet uploads (xlsx/xls/ods) flattened to delimited text.
//! CONTEXT: Only the first worksheet is ingested; its first row is assumed to
//! be the header row.

use crate::error::IngestError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

pub fn spreadsheet_to_delimited(bytes: &[u8]) -> Result<String, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let sheet_names = workbook.sheet_names().to_vec();

    let first_sheet = sheet_names.first().ok_or_else(|| {
        IngestError::InvalidFormat("workbook contains no sheets".to_string())
    })?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| IngestError::InvalidFormat(e.to_string()))?;

    if range.is_empty() {
        return Err(IngestError::InvalidFormat(format!(
            "worksheet \"{}\" is empty",
            first_sheet
        )));
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in range.rows() {
        let cells: Vec<String> = row.iter().map(render_cell).collect();
        writer.write_record(&cells)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| IngestError::InvalidFormat(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| IngestError::InvalidFormat("output is not valid UTF-8".to_string()))
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => render_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("{:?}", e),
        Data::DateTime(dt) => render_number(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}
