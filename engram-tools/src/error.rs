//! Tool-level error types.

use thiserror::Error;

use engram_store::StoreError;

/// Errors a tool call can fail with.
///
/// Quality and duplicate rejections are not errors — they come back as
/// structured outcomes. These are the fatal cases.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required argument was missing or malformed. Raised before the
    /// store is contacted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The store collaborator failed. Never swallowed; no retry above the
    /// store client's own policy.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The requested tool does not exist.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, ToolError>;
