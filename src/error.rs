//! Error types shared by the tool layer.

use thiserror::Error;

/// Failure of a tool-level operation.
///
/// These never cross the tool boundary as errors: each tool converts them into a
/// `success: false` output carrying the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// A required field is missing, blank, or out of range.
    #[error("{0}")]
    Validation(String),
    /// The referenced identifier does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl ToolError {
    /// Build a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check whether this is a validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check whether this is a not-found failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convenience result alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
