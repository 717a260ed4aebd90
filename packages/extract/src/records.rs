//! Loading chunked report records from JSON.
//!
//! Input documents are a top-level JSON array. Elements are usually objects
//! with a `text` field, but anything else is accepted and treated as a
//! record without text.

use std::path::Path;

use mineral_table_extract_models::Record;

/// Errors loading records.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an array.
    #[error("Expected a JSON array of records, found {found}")]
    NotAnArray {
        /// Kind of JSON value found instead.
        found: &'static str,
    },
}

/// Parses records from a JSON string.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for invalid JSON and
/// [`LoadError::NotAnArray`] if the top-level value is not an array.
pub fn parse_records(json: &str) -> Result<Vec<Record>, LoadError> {
    match serde_json::from_str::<serde_json::Value>(json)? {
        serde_json::Value::Array(items) => Ok(items.iter().map(Record::from_value).collect()),
        other => Err(LoadError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

/// Reads and parses records from a JSON file.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or parsed.
pub fn load_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let json = std::fs::read_to_string(path)?;
    let records = parse_records(&json)?;

    log::debug!(
        "Loaded {} records ({} with text) from {}",
        records.len(),
        records.iter().filter(|r| r.text().is_some()).count(),
        path.display()
    );

    Ok(records)
}

/// Returns the text of every record that has one, in order.
#[must_use]
pub fn record_texts(records: &[Record]) -> Vec<&str> {
    records.iter().filter_map(Record::text).collect()
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_of_objects() {
        let records = parse_records(
            r#"[
                {"text": "Escondida | Mt", "page": 1},
                {"page": 2},
                {"text": "Olympic Dam | Mt"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text(), Some("Escondida | Mt"));
        assert!(records[1].text().is_none());
        assert_eq!(
            record_texts(&records),
            vec!["Escondida | Mt", "Olympic Dam | Mt"]
        );
    }

    #[test]
    fn tolerates_non_object_elements() {
        let records = parse_records(r#"["Olympic Dam", 3, null, {"text": "ok"}]"#).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(record_texts(&records), vec!["ok"]);
    }

    #[test]
    fn rejects_non_array_document() {
        let err = parse_records(r#"{"text": "Olympic Dam"}"#).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray { found: "an object" }));
        assert_eq!(
            err.to_string(),
            "Expected a JSON array of records, found an object"
        );
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_records("[{").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_records(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
