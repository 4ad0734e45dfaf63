use crate::error::{ClientError, Result};
use crate::models::PageMetadata;
use serde::de::Error as _;
use serde_json::Value;

/// Decodes a `meta` field that upstream ships as a JSON-encoded string.
///
/// The decoded value must be a JSON object; anything else, including a
/// missing field or a non-string value, is a [`ClientError::Decode`].
pub fn decode_meta(raw: Option<&Value>) -> Result<PageMetadata> {
    let encoded = match raw {
        Some(Value::String(encoded)) => encoded,
        Some(other) => {
            return Err(decode_error(format!(
                "expected a JSON-encoded string, found {}",
                kind_of(other)
            )))
        }
        None => return Err(decode_error("field is missing".to_string())),
    };

    serde_json::from_str(encoded).map_err(|source| ClientError::Decode {
        field: "meta",
        source,
    })
}

/// JavaScript truthiness, which is what upstream uses to signal empty fields.
pub fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => !flag,
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

fn decode_error(message: String) -> ClientError {
    ClientError::Decode {
        field: "meta",
        source: serde_json::Error::custom(message),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
