//! Error types for the Engram core library.

use thiserror::Error;

/// Top-level error type for core pipeline operations.
///
/// Quality and duplicate rejections are *not* errors — they are expected,
/// recoverable outcomes carried in verdict types. The core itself can only
/// fail on configuration; argument validation and store failures belong to
/// the layers that own them.
#[derive(Error, Debug)]
pub enum EngramError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error (configuration file loading).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, EngramError>;
