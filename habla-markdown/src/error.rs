//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested direction or option
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// A nostr reference node carries attributes that cannot be bech32 encoded
    #[error("Invalid {node} pointer: {reason}")]
    InvalidPointer { node: &'static str, reason: String },
    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl FormatError {
    pub(crate) fn invalid_pointer(node: &'static str, reason: impl ToString) -> Self {
        FormatError::InvalidPointer {
            node,
            reason: reason.to_string(),
        }
    }
}
