//! Wire types for the streamed cursor protocol.
//!
//! Entries arrive as tagged JSON objects. Integers travel as decimal strings
//! and blobs as base64 so the encoding survives JSON number limits; decoding
//! into native values happens in [`crate::decode`].

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::{Deserialize, Serialize};

/// One column header carried by a `step_begin` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Col {
    pub name: String,
}

/// Raw wire encoding of a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireValue {
    Null,
    Integer { value: String },
    Float { value: f64 },
    Text { value: String },
    Blob { base64: String },
}

impl WireValue {
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Integer {
            value: value.to_string(),
        }
    }

    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::Float { value }
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn blob(bytes: &[u8]) -> Self {
        Self::Blob {
            base64: BASE64_STANDARD.encode(bytes),
        }
    }
}

/// Error payload optionally carried by `step_error`/`error` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// One unit of the streamed execution protocol: column header, row payload,
/// or error.
///
/// A `step_begin` carrying columns must occur before any `row` entry of the
/// same execution; row value order matches column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CursorEntry {
    StepBegin {
        #[serde(default)]
        cols: Vec<Col>,
    },
    Row {
        row: Vec<WireValue>,
    },
    StepError {
        #[serde(default)]
        error: Option<ErrorBody>,
    },
    Error {
        #[serde(default)]
        error: Option<ErrorBody>,
    },
}

impl CursorEntry {
    /// A `step_begin` entry announcing the given column names.
    pub fn step_begin<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StepBegin {
            cols: names
                .into_iter()
                .map(|name| Col { name: name.into() })
                .collect(),
        }
    }

    #[must_use]
    pub fn row(row: Vec<WireValue>) -> Self {
        Self::Row { row }
    }

    #[must_use]
    pub fn step_error(message: Option<&str>) -> Self {
        Self::StepError {
            error: Some(ErrorBody {
                message: message.map(str::to_string),
            }),
        }
    }

    #[must_use]
    pub fn error(message: Option<&str>) -> Self {
        Self::Error {
            error: Some(ErrorBody {
                message: message.map(str::to_string),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn step_begin_round_trips() {
        let entry = CursorEntry::step_begin(["id", "name"]);
        let encoded = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            encoded,
            json!({"type": "step_begin", "cols": [{"name": "id"}, {"name": "name"}]})
        );
        let decoded: CursorEntry = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn row_entry_encodes_tagged_values() {
        let entry = CursorEntry::row(vec![
            WireValue::integer(42),
            WireValue::Null,
            WireValue::text("x"),
        ]);
        let encoded = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            encoded,
            json!({"type": "row", "row": [
                {"type": "integer", "value": "42"},
                {"type": "null"},
                {"type": "text", "value": "x"}
            ]})
        );
    }

    #[test]
    fn error_entry_tolerates_missing_payload() {
        let decoded: CursorEntry = serde_json::from_value(json!({"type": "step_error"})).unwrap();
        assert_eq!(decoded, CursorEntry::StepError { error: None });

        let decoded: CursorEntry =
            serde_json::from_value(json!({"type": "error", "error": {}})).unwrap();
        assert_eq!(
            decoded,
            CursorEntry::Error {
                error: Some(ErrorBody { message: None })
            }
        );
    }

    #[test]
    fn blob_constructor_base64_encodes() {
        let WireValue::Blob { base64 } = WireValue::blob(b"\x01\x02\xff") else {
            panic!("expected blob");
        };
        assert_eq!(base64, "AQL/");
    }
}
