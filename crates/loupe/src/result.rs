//! Result and error types for Loupe.

use thiserror::Error;

/// Result type for Loupe operations
pub type LoupeResult<T> = Result<T, LoupeError>;

/// Errors that can occur in Loupe
#[derive(Debug, Error)]
pub enum LoupeError {
    /// Locator source text did not match any known call pattern
    #[error("Invalid {syntax} syntax")]
    UnrecognizedSyntax {
        /// Display name of the detected syntax
        syntax: String,
    },

    /// CSS selector or XPath expression could not be compiled
    #[error("Invalid selector {selector:?}: {message}")]
    InvalidSelector {
        /// Selector text as given
        selector: String,
        /// Error message
        message: String,
    },

    /// No element matched a target selector
    #[error("No element matches {selector:?}")]
    ElementNotFound {
        /// Selector used to pick the target
        selector: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoupeError {
    /// Create an invalid selector error
    #[must_use]
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
