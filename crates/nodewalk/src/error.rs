//! Traversal and configuration error types.

use thiserror::Error;

/// Errors raised by the traversal engine itself.
///
/// Handler errors are not wrapped here: a visitor's `Error` type only has to
/// accept `VisitError` via `From`, and handler failures pass through `visit`
/// untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VisitError {
    /// The graph nests deeper than the configured limit.
    #[error("Traversal exceeded the maximum depth of {limit}")]
    DepthExceeded {
        /// Configured maximum depth.
        limit: usize,
    },

    /// A handler failed. For visitors that use `VisitError` directly.
    #[error("Handler error: {0}")]
    Handler(String),
}

impl VisitError {
    /// Creates a handler error.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}

/// Errors that can occur while loading a [`TraversalConfig`](crate::TraversalConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input is not valid JSON or does not match the config shape.
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// A field has an unusable value.
    #[error("Invalid value for `{field}`: {message}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
