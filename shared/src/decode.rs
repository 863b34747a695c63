use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::DecodeError;

/// Decode the value of one recognized message field into its entity
///
/// Pure: the same input always yields the same output. A failure is tagged
/// with the message key, and serde's reason names the inner field.
pub fn decode_field<T: DeserializeOwned>(field: &'static str, value: &Value) -> Result<T, DecodeError> {
    T::deserialize(value).map_err(|error| DecodeError::InvalidField {
        field,
        reason: error.to_string(),
    })
}

/// Name of a JSON value's type, for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Null on the wire means the same as an absent key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
