//! Tool-specific error types.

use std::time::Duration;

use thiserror::Error;

/// Errors a tool call can resolve to.
///
/// Every variant renders to a self-contained message; transports show it to
/// the caller verbatim.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("unknown tool: {0}")]
    NotFound(String),

    /// The argument bag did not satisfy the tool's schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The tool's underlying operation failed.
    #[error("{context}: {message}")]
    Execution { context: String, message: String },

    /// The call exceeded its deadline.
    #[error("tool '{tool}' timed out after {after:?}")]
    Timeout { tool: String, after: Duration },

    /// The caller went away before the call finished.
    #[error("tool '{0}' was cancelled")]
    Cancelled(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Wrap a failure of the tool's underlying operation.
    ///
    /// The cause is rendered with `Display` and kept verbatim.
    pub fn execution(context: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Execution {
            context: context.into(),
            message: cause.to_string(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the requested tool does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Argument validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required parameter: {name}")]
    MissingRequired { name: String },

    #[error("parameter '{name}' must be {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// An element of a typed array had the wrong kind. `index` is the first
    /// offending element.
    #[error("{name} must contain only {expected}s")]
    ElementTypeMismatch {
        name: String,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Errors raised while building the tool registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("tool '{tool}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { tool: String, parameter: String },
}
