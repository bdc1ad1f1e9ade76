//! Inspector configuration.
//!
//! A value passed into every generator, formatter and validator call. Nothing
//! in the engine caches it, so a changed configuration takes effect on the
//! next call.

use serde::{Deserialize, Serialize};

use crate::codec::Syntax;

/// Default attribute consulted by `getByTestId`
pub const DEFAULT_TEST_ID_ATTRIBUTE: &str = "data-testid";

/// Longest element text (in characters) still offered as a `getByText` candidate
pub const DEFAULT_MAX_TEXT_LEN: usize = 50;

/// Default number of history entries retained
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Highlight colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (the only palette shipped)
    #[default]
    Dark,
}

/// Colours used by a highlighting front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Outline colour for the inspected element
    pub highlight: &'static str,
    /// Outline colour for a hovered element
    pub hover: &'static str,
    /// Unique match
    pub success: &'static str,
    /// Multiple matches
    pub warning: &'static str,
    /// No match
    pub error: &'static str,
}

impl Theme {
    /// Palette for this theme
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                highlight: "#6366f1",
                hover: "#8b5cf6",
                success: "#10b981",
                warning: "#f59e0b",
                error: "#ef4444",
            },
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectorConfig {
    /// Output syntax for formatted locators
    pub syntax: Syntax,
    /// Attribute read by test-id strategies
    pub test_id_attribute: String,
    /// Default matching mode for generated strategies
    pub exact: bool,
    /// Highlight colour theme
    pub theme: Theme,
    /// Text length cap for `getByText` candidates
    pub max_text_len: usize,
    /// History retention cap
    pub max_history: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            syntax: Syntax::Java,
            test_id_attribute: DEFAULT_TEST_ID_ATTRIBUTE.to_string(),
            exact: false,
            theme: Theme::Dark,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl InspectorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output syntax
    #[must_use]
    pub const fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Set the test-id attribute
    #[must_use]
    pub fn with_test_id_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.test_id_attribute = attribute.into();
        self
    }

    /// Set exact matching for generated strategies
    #[must_use]
    pub const fn with_exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Set the text strategy length cap
    #[must_use]
    pub const fn with_max_text_len(mut self, len: usize) -> Self {
        self.max_text_len = len;
        self
    }

    /// Set the history retention cap
    #[must_use]
    pub const fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max;
        self
    }

    /// Palette of the configured theme
    #[must_use]
    pub const fn palette(&self) -> Palette {
        self.theme.palette()
    }
}
