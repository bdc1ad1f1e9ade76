//! History records handed to a persistence layer.

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::codec::{self, Syntax};
use crate::dom;
use crate::strategy::{Strategy, StrategyKind};

/// A generated locator worth remembering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Rendered locator source
    pub code: String,
    /// Strategy kind
    #[serde(rename = "type")]
    pub kind: StrategyKind,
    /// Upper-case tag name of the located element
    pub element_tag: String,
}

impl HistoryEntry {
    /// Create an entry
    #[must_use]
    pub fn new(code: impl Into<String>, kind: StrategyKind, element_tag: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kind,
            element_tag: element_tag.into(),
        }
    }

    /// Entry for `strategy` rendered in `syntax`, located on `element`
    #[must_use]
    pub fn record(strategy: &Strategy, syntax: Syntax, element: ElementRef<'_>) -> Self {
        Self::new(
            codec::format(strategy, syntax),
            strategy.kind(),
            dom::tag_name(element).to_ascii_uppercase(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_record() {
        let doc = Document::parse("<button>Go</button>");
        let el = doc.select_first("button").unwrap();
        let entry = HistoryEntry::record(&Strategy::role_named("button", "Go"), Syntax::JavaScript, el);
        assert_eq!(entry.code, "page.getByRole('button', { name: 'Go' })");
        assert_eq!(entry.kind, StrategyKind::Role);
        assert_eq!(entry.element_tag, "BUTTON");
    }

    #[test]
    fn test_wire_names() {
        let entry = HistoryEntry::new("page.locator(\"a\")", StrategyKind::Css, "A");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "page.locator(\"a\")", "type": "css", "elementTag": "A"})
        );
    }
}
