//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend handed out an empty token.
    #[error("empty credential")]
    EmptyToken,

    /// The persisted state could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The persisted state is not a JSON object.
    #[error("corrupt store at {path}: {reason}")]
    CorruptStore { path: String, reason: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    /// Check if the failure came from the backing store rather than the value.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, AuthError::Storage(_) | AuthError::CorruptStore { .. })
    }
}
