//! Export rendering.
//!
//! Handles JSON and CSV rendering of whole record collections.
//!
//! CSV headers come from the first record's keys; later records are written
//! in that column order, with absent or null fields left empty. List values
//! are joined with `"; "`. A cell is quoted only when it contains a comma, a
//! double quote or a line break, and embedded quotes are doubled.

use crm_seeker::{FieldValue, Record};
use csv::{QuoteStyle, Writer, WriterBuilder};
use thiserror::Error;

use crate::request::ExportFormat;

/// Separator for list values inside one CSV cell.
pub const LIST_SEPARATOR: &str = "; ";

/// Errors that can occur while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),
}

/// Renders records in the given format.
pub fn render(records: &[Record], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => to_json(records),
        ExportFormat::Csv => to_csv(records),
    }
}

/// Renders records as a pretty-printed JSON array.
pub fn to_json(records: &[Record]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Renders records as CSV. No records gives an empty document.
pub fn to_csv(records: &[Record]) -> Result<String, ExportError> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(vec![]);

    let headers: Vec<&str> = first.keys().collect();
    write_row(&mut wtr, &headers)?;

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| record.get(h).map(cell_text).unwrap_or_default())
            .collect();
        write_row(&mut wtr, &row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}

/// Writes one row. A row made of a single empty cell is a bare line break;
/// the csv writer would otherwise emit `""` for it.
fn write_row<T: AsRef<[u8]>>(wtr: &mut Writer<Vec<u8>>, row: &[T]) -> Result<(), ExportError> {
    if let [only] = row {
        if only.as_ref().is_empty() {
            wtr.flush().map_err(|e| ExportError::Csv(e.to_string()))?;
            wtr.get_mut().push(b'\n');
            return Ok(());
        }
    }
    wtr.write_record(row)
        .map_err(|e| ExportError::Csv(e.to_string()))
}

/// Text of one CSV cell, before quoting.
fn cell_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => String::new(),
        FieldValue::List(items) => items.join(LIST_SEPARATOR),
        other => other.to_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_quotes_commas() {
        let records = vec![
            Record::new().with("id", 1).with("company", "Acme Corp"),
            Record::new().with("id", 2).with("company", "Soylent, Inc."),
        ];
        let csv = to_csv(&records).unwrap();
        assert_eq!(csv, "id,company\n1,Acme Corp\n2,\"Soylent, Inc.\"\n");
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        let records = vec![Record::new().with("note", "say \"hi\"")];
        assert_eq!(to_csv(&records).unwrap(), "note\n\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn csv_quotes_newlines() {
        let records = vec![Record::new().with("a", "x").with("note", "line one\nline two")];
        assert_eq!(to_csv(&records).unwrap(), "a,note\nx,\"line one\nline two\"\n");
    }

    #[test]
    fn csv_joins_lists_and_blanks_nulls() {
        let records = vec![Record::new()
            .with("tags", vec!["vip", "trial"])
            .with("revenue", FieldValue::Null)
            .with("score", 1.5)
            .with("optIn", true)];
        assert_eq!(
            to_csv(&records).unwrap(),
            "tags,revenue,score,optIn\nvip; trial,,1.5,true\n"
        );
    }

    #[test]
    fn csv_follows_first_record_headers() {
        let records = vec![
            Record::new().with("id", 1).with("name", "a"),
            Record::new().with("name", "b").with("extra", "ignored"),
        ];
        assert_eq!(to_csv(&records).unwrap(), "id,name\n1,a\n,b\n");
    }

    #[test]
    fn single_column_blank_cells_stay_unquoted() {
        let records = vec![
            Record::new().with("note", FieldValue::Null),
            Record::new().with("note", "x"),
            Record::new().with("note", ""),
        ];
        assert_eq!(to_csv(&records).unwrap(), "note\n\nx\n\n");
    }

    #[test]
    fn empty_exports() {
        assert_eq!(to_csv(&[]).unwrap(), "");
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn json_is_an_array_of_records() {
        let records = vec![Record::new().with("id", 1).with("tags", vec!["x"])];
        let json = render(&records, ExportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, serde_json::json!([{"id": 1, "tags": ["x"]}]));
    }
}
