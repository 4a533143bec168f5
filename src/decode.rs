//! Decoding of raw wire values into native [`Value`]s.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::error::SqlCursorError;
use crate::proto::WireValue;
use crate::types::Value;

/// Decode one raw wire value into its native representation.
///
/// Integers arrive as decimal strings; the policy is to parse into `i64`,
/// which covers the full range the server can produce, and to report anything
/// unparseable or out of range as a [`SqlCursorError::ProtocolError`] rather
/// than truncating. Malformed base64 in a blob is reported the same way.
///
/// # Errors
///
/// Returns `SqlCursorError::ProtocolError` for a non-`i64` integer string or
/// invalid base64.
pub fn decode_value(raw: WireValue) -> Result<Value, SqlCursorError> {
    match raw {
        WireValue::Null => Ok(Value::Null),
        WireValue::Integer { value } => value.parse::<i64>().map(Value::Int).map_err(|e| {
            SqlCursorError::ProtocolError(format!(
                "integer value {value:?} is not representable as i64: {e}"
            ))
        }),
        WireValue::Float { value } => Ok(Value::Float(value)),
        WireValue::Text { value } => Ok(Value::Text(value)),
        WireValue::Blob { base64 } => BASE64_STANDARD
            .decode(&base64)
            .map(Value::Blob)
            .map_err(|e| SqlCursorError::ProtocolError(format!("malformed base64 blob: {e}"))),
    }
}
