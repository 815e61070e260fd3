//! Flat CSV output
//!
//! Records are anything that serializes to a JSON object. The header row is
//! taken from the first record's keys in field order; later records are read
//! by those same keys, so a missing key renders as an empty cell.

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

use crate::error::{ExportError, Result};

/// Quote a field only when it holds a comma or a double quote
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(',') || field.contains('"') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => escape_field(s).into_owned(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => escape_field(&nested.to_string()).into_owned(),
    }
}

pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String> {
    if records.is_empty() {
        return Err(ExportError::NothingToExport("No records to export.".to_string()).into());
    }

    let mut rows = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match serde_json::to_value(record).map_err(ExportError::from)? {
            Value::Object(map) => rows.push(map),
            _ => return Err(ExportError::NotARecord { index }.into()),
        }
    }

    let headers: Vec<String> = rows[0].keys().cloned().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_field(h).into_owned())
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in &rows {
        let line: Vec<String> = headers.iter().map(|h| cell(row.get(h))).collect();
        lines.push(line.join(","));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThinkwiseError;
    use serde_json::json;

    #[test]
    fn test_quotes_only_when_needed() {
        let csv = to_csv(&[json!({"a": "x,y", "b": 1})]).unwrap();
        assert_eq!(csv, "a,b\n\"x,y\",1");
    }

    #[test]
    fn test_inner_quotes_are_doubled() {
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("plain text"), "plain text");
    }

    #[test]
    fn test_headers_follow_first_record_order() {
        let csv = to_csv(&[
            json!({"zeta": 1, "alpha": true, "mid": null}),
            json!({"alpha": false, "zeta": 2}),
        ])
        .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["zeta,alpha,mid", "1,true,", "2,false,"]);
    }

    #[test]
    fn test_empty_input_is_nothing_to_export() {
        let empty: Vec<serde_json::Value> = Vec::new();
        let err = to_csv(&empty).unwrap_err();
        assert!(matches!(
            err,
            ThinkwiseError::Export(ExportError::NothingToExport(_))
        ));
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        let err = to_csv(&[json!({"a": 1}), json!(5)]).unwrap_err();
        assert!(matches!(
            err,
            ThinkwiseError::Export(ExportError::NotARecord { index: 1 })
        ));
    }
}
