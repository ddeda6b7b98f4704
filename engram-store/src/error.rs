//! Store error types.

use thiserror::Error;

/// Errors that can occur talking to the memory store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Memory store unavailable: {0}")]
    Unavailable(String),

    /// A request timed out.
    #[error("Memory store request timed out after {0}ms")]
    Timeout(u64),

    /// The store rejected the request (non-auth client or server error).
    #[error("Memory store request failed: {0}")]
    RequestFailed(String),

    /// Authentication or authorization failure. Never retried.
    #[error("Memory store rejected credentials: {0}")]
    Auth(String),

    /// The response body could not be decoded.
    #[error("Failed to parse store response: {0}")]
    Parse(String),

    /// All retry attempts exhausted.
    #[error("All store retry attempts exhausted after {attempts} tries: {last_error}")]
    RetriesExhausted {
        /// How many attempts were made.
        attempts: u32,
        /// The last error observed.
        last_error: String,
    },

    /// The referenced record does not exist.
    #[error("Memory not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout(0)
        } else if err.is_connect() {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::RequestFailed(err.to_string())
        }
    }
}
