use thiserror::Error;

/// Errors that can occur while decoding an inbound server payload
///
/// Any of these aborts processing of the whole message: no part of a payload
/// that fails to decode is ever applied to local state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload bytes are not valid JSON
    #[error("Malformed JSON payload: {reason}")]
    MalformedJson {
        reason: String,
    },

    /// The payload is neither an object nor a sentinel string
    #[error("Expected {expected} but found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    /// A recognized message field does not match its entity's shape. The
    /// reason names the offending inner field.
    #[error("Field `{field}` is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// Robot orientation is not one of the four board directions
    #[error("Unknown direction angle {angle} (valid angles: 0, 90, 180, 270)")]
    UnknownDirection {
        angle: i64,
    },
}
