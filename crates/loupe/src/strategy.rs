//! Locator strategies.
//!
//! A [`Strategy`] names one way of finding an element, in the vocabulary of a
//! UI-testing library: by ARIA role, by label, by placeholder and so on, down
//! to a raw CSS or XPath selector. Strategies are produced by the generator,
//! rendered to source text by the codec, and executed by the validator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single locating strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Strategy {
    /// `getByRole(role, { name })`
    Role {
        /// ARIA role, lower-case
        role: String,
        /// Accessible-name filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Heading level filter (headings only)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u8>,
        /// Exact name matching
        #[serde(default)]
        exact: bool,
    },
    /// `getByLabel(text)`
    Label {
        /// Label text
        text: String,
        /// Exact matching
        #[serde(default)]
        exact: bool,
    },
    /// `getByPlaceholder(text)`
    Placeholder {
        /// Placeholder text
        text: String,
        /// Exact matching
        #[serde(default)]
        exact: bool,
    },
    /// `getByText(text)`
    Text {
        /// Visible text
        text: String,
        /// Exact matching
        #[serde(default)]
        exact: bool,
    },
    /// `getByAltText(text)`
    AltText {
        /// `alt` attribute text
        text: String,
        /// Exact matching
        #[serde(default)]
        exact: bool,
    },
    /// `getByTitle(text)`
    Title {
        /// `title` attribute text
        text: String,
        /// Exact matching
        #[serde(default)]
        exact: bool,
    },
    /// `getByTestId(id)`
    TestId {
        /// Test-id attribute value
        test_id: String,
    },
    /// `locator(selector)`, CSS or XPath
    Css {
        /// Raw selector
        selector: String,
    },
}

/// Strategy discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyKind {
    /// By ARIA role
    Role,
    /// By label
    Label,
    /// By placeholder
    Placeholder,
    /// By text
    Text,
    /// By alt text
    AltText,
    /// By title
    Title,
    /// By test id
    TestId,
    /// By selector
    Css,
}

impl StrategyKind {
    /// Every kind in generation order
    pub const ALL: [Self; 8] = [
        Self::Role,
        Self::Label,
        Self::Placeholder,
        Self::Text,
        Self::AltText,
        Self::Title,
        Self::TestId,
        Self::Css,
    ];

    /// Fixed rank, lower is better
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Role => 1,
            Self::Label => 2,
            Self::Placeholder => 3,
            Self::Text | Self::AltText => 4,
            Self::Title => 5,
            Self::TestId => 6,
            Self::Css => 9,
        }
    }

    /// Human label shown next to a ranked strategy
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Role => "getByRole (Best Practice)",
            Self::Label => "getByLabel (Recommended for Forms)",
            Self::Placeholder => "getByPlaceholder",
            Self::Text => "getByText",
            Self::AltText => "getByAltText (Image)",
            Self::Title => "getByTitle",
            Self::TestId => "getByTestId (Stable)",
            Self::Css => "CSS Selector (Fragile)",
        }
    }

    /// Wire name (`altText`, `testId`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Label => "label",
            Self::Placeholder => "placeholder",
            Self::Text => "text",
            Self::AltText => "altText",
            Self::Title => "title",
            Self::TestId => "testId",
            Self::Css => "css",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Strategy {
    /// Role strategy without filters
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: None,
            level: None,
            exact: false,
        }
    }

    /// Role strategy filtered by accessible name
    #[must_use]
    pub fn role_named(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: Some(name.into()),
            level: None,
            exact: false,
        }
    }

    /// Label strategy
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label {
            text: text.into(),
            exact: false,
        }
    }

    /// Placeholder strategy
    #[must_use]
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::Placeholder {
            text: text.into(),
            exact: false,
        }
    }

    /// Text strategy
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            exact: false,
        }
    }

    /// Alt-text strategy
    #[must_use]
    pub fn alt_text(text: impl Into<String>) -> Self {
        Self::AltText {
            text: text.into(),
            exact: false,
        }
    }

    /// Title strategy
    #[must_use]
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title {
            text: text.into(),
            exact: false,
        }
    }

    /// Test-id strategy
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId { test_id: id.into() }
    }

    /// CSS or XPath selector strategy
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css {
            selector: selector.into(),
        }
    }

    /// Set exact matching. No effect on test-id and selector strategies.
    #[must_use]
    pub fn with_exact(mut self, value: bool) -> Self {
        match &mut self {
            Self::Role { exact, .. }
            | Self::Label { exact, .. }
            | Self::Placeholder { exact, .. }
            | Self::Text { exact, .. }
            | Self::AltText { exact, .. }
            | Self::Title { exact, .. } => *exact = value,
            Self::TestId { .. } | Self::Css { .. } => {}
        }
        self
    }

    /// Set the heading level filter. No effect on non-role strategies.
    #[must_use]
    pub fn with_level(mut self, value: u8) -> Self {
        if let Self::Role { level, .. } = &mut self {
            *level = Some(value);
        }
        self
    }

    /// Discriminant
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Role { .. } => StrategyKind::Role,
            Self::Label { .. } => StrategyKind::Label,
            Self::Placeholder { .. } => StrategyKind::Placeholder,
            Self::Text { .. } => StrategyKind::Text,
            Self::AltText { .. } => StrategyKind::AltText,
            Self::Title { .. } => StrategyKind::Title,
            Self::TestId { .. } => StrategyKind::TestId,
            Self::Css { .. } => StrategyKind::Css,
        }
    }

    /// Exact matching flag (always false for test-id and selector strategies)
    #[must_use]
    pub const fn exact(&self) -> bool {
        match self {
            Self::Role { exact, .. }
            | Self::Label { exact, .. }
            | Self::Placeholder { exact, .. }
            | Self::Text { exact, .. }
            | Self::AltText { exact, .. }
            | Self::Title { exact, .. } => *exact,
            Self::TestId { .. } | Self::Css { .. } => false,
        }
    }

    /// Fixed rank of this strategy's kind
    #[must_use]
    pub const fn priority(&self) -> u8 {
        self.kind().priority()
    }

    /// Human label of this strategy's kind
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.kind().description()
    }

    /// The primary payload: role, text, test id or selector
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Role { role, .. } => role,
            Self::Label { text, .. }
            | Self::Placeholder { text, .. }
            | Self::Text { text, .. }
            | Self::AltText { text, .. }
            | Self::Title { text, .. } => text,
            Self::TestId { test_id } => test_id,
            Self::Css { selector } => selector,
        }
    }
}
