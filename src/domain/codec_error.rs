//! Errors raised while decoding identifiers and calendar dates.

/// Failure to decode a textual identifier or date.
///
/// These surface to clients as validation failures: serde wraps them when
/// a request body is deserialized, so the message ends up inside the
/// `Invalid request body: ...` envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The input is not a well-formed 128-bit identifier string.
    #[error("invalid identifier `{input}`: {reason}")]
    InvalidIdentifier {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The input is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date `{0}`: expected YYYY-MM-DD")]
    InvalidDate(String),
}
