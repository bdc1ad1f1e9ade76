//! Element query engine.
//!
//! One query per strategy kind. Every query returns matching elements in
//! document order without duplicates, and never fails: selector compilation
//! errors degrade to an empty result.

use scraper::ElementRef;
use tracing::{debug, trace};

use crate::accessibility::{accessible_name, implicit_role};
use crate::config::InspectorConfig;
use crate::dom::{self, Document};
use crate::strategy::Strategy;
use crate::text::text_matches;
use crate::xpath::XPath;

/// Form controls a label can name
const LABELABLE: &[&str] = &["input", "select", "textarea", "button"];

/// Matching options shared by the text-based queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Equality instead of case-insensitive substring
    pub exact: bool,
    /// Accessible-name filter (role queries)
    pub name: Option<String>,
    /// Heading level filter (role `heading` only)
    pub level: Option<u8>,
}

impl QueryOptions {
    /// Default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set exact matching
    #[must_use]
    pub const fn with_exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Set the accessible-name filter
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the heading level filter
    #[must_use]
    pub const fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }
}

/// Runs locator queries against one document
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    document: &'a Document,
    config: &'a InspectorConfig,
}

impl<'a> QueryEngine<'a> {
    /// Create an engine over `document`
    #[must_use]
    pub const fn new(document: &'a Document, config: &'a InspectorConfig) -> Self {
        Self { document, config }
    }

    /// Execute a strategy through the matching query
    #[must_use]
    pub fn run(&self, strategy: &Strategy) -> Vec<ElementRef<'a>> {
        match strategy {
            Strategy::Role {
                role,
                name,
                level,
                exact,
            } => self.find_by_role(
                role,
                &QueryOptions {
                    exact: *exact,
                    name: name.clone(),
                    level: *level,
                },
            ),
            Strategy::Label { text, exact } => {
                self.find_by_label(text, &QueryOptions::new().with_exact(*exact))
            }
            Strategy::Placeholder { text, exact } => {
                self.find_by_placeholder(text, &QueryOptions::new().with_exact(*exact))
            }
            Strategy::Text { text, exact } => {
                self.find_by_text(text, &QueryOptions::new().with_exact(*exact))
            }
            Strategy::AltText { text, exact } => {
                self.find_by_alt_text(text, &QueryOptions::new().with_exact(*exact))
            }
            Strategy::Title { text, exact } => {
                self.find_by_title(text, &QueryOptions::new().with_exact(*exact))
            }
            Strategy::TestId { test_id } => self.find_by_test_id(test_id),
            Strategy::Css { selector } => self.find_by_locator(selector),
        }
    }

    /// Elements whose explicit or implicit role is `role`.
    ///
    /// Either one suffices: `<button role="tab">` is found as both `tab` and
    /// `button`. The name filter compares against the accessible name; the level
    /// filter keeps `<h{level}>` elements and applies to `heading` only.
    #[must_use]
    pub fn find_by_role(&self, role: &str, options: &QueryOptions) -> Vec<ElementRef<'a>> {
        let matches = self.document.elements().filter(|el| {
            let explicit = dom::attr(*el, "role").map(str::trim) == Some(role);
            if !explicit && implicit_role(*el) != Some(role) {
                return false;
            }
            if let Some(name) = &options.name {
                if !text_matches(&accessible_name(self.document, *el), name, options.exact) {
                    return false;
                }
            }
            match options.level {
                Some(level) if role == "heading" => {
                    dom::tag_name(*el) == format!("h{level}")
                }
                _ => true,
            }
        });
        let found: Vec<_> = matches.collect();
        debug!(role, count = found.len(), "find_by_role");
        found
    }

    /// Form controls named by a matching label.
    ///
    /// Collects controls referenced by `<label for>`, controls nested in a
    /// matching `<label>`, and any labelable control whose accessible name
    /// matches.
    #[must_use]
    pub fn find_by_label(&self, text: &str, options: &QueryOptions) -> Vec<ElementRef<'a>> {
        let mut found = Vec::new();
        for label in self.document.elements().filter(|el| dom::tag_name(*el) == "label") {
            if !text_matches(&dom::text_content(label), text, options.exact) {
                continue;
            }
            if let Some(target) =
                dom::attr(label, "for").and_then(|id| self.document.element_by_id(id))
            {
                found.push(target);
            }
            if let Some(nested) = label
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .find(|el| LABELABLE.contains(&dom::tag_name(*el)))
            {
                found.push(nested);
            }
        }
        found.extend(
            self.document
                .elements()
                .filter(|el| LABELABLE.contains(&dom::tag_name(*el)))
                .filter(|el| {
                    let name = accessible_name(self.document, *el);
                    !name.is_empty() && text_matches(&name, text, options.exact)
                }),
        );
        let found = self.document.in_document_order(found);
        debug!(text, count = found.len(), "find_by_label");
        found
    }

    /// Elements with their own text whose full text matches.
    ///
    /// `script` and `style` are skipped; an element qualifies only when at
    /// least one direct text child is non-blank.
    #[must_use]
    pub fn find_by_text(&self, text: &str, options: &QueryOptions) -> Vec<ElementRef<'a>> {
        let found: Vec<_> = self
            .document
            .elements()
            .filter(|el| !matches!(dom::tag_name(*el), "script" | "style"))
            .filter(|el| dom::has_direct_text(*el))
            .filter(|el| text_matches(&dom::text_content(*el), text, options.exact))
            .collect();
        debug!(text, count = found.len(), "find_by_text");
        found
    }

    /// Elements whose `placeholder` matches
    #[must_use]
    pub fn find_by_placeholder(&self, text: &str, options: &QueryOptions) -> Vec<ElementRef<'a>> {
        self.by_attribute("placeholder", text, options)
    }

    /// Elements whose `alt` matches
    #[must_use]
    pub fn find_by_alt_text(&self, text: &str, options: &QueryOptions) -> Vec<ElementRef<'a>> {
        self.by_attribute("alt", text, options)
    }

    /// Elements whose `title` matches
    #[must_use]
    pub fn find_by_title(&self, text: &str, options: &QueryOptions) -> Vec<ElementRef<'a>> {
        self.by_attribute("title", text, options)
    }

    /// Elements whose configured test-id attribute equals `test_id` exactly
    #[must_use]
    pub fn find_by_test_id(&self, test_id: &str) -> Vec<ElementRef<'a>> {
        let attribute = self.config.test_id_attribute.as_str();
        let found: Vec<_> = self
            .document
            .elements()
            .filter(|el| dom::attr(*el, attribute) == Some(test_id))
            .collect();
        debug!(attribute, test_id, count = found.len(), "find_by_test_id");
        found
    }

    /// Elements matching a raw selector.
    ///
    /// Selectors starting with `//` or `(//` are XPath, anything else is
    /// CSS. Invalid selectors of either kind match nothing.
    #[must_use]
    pub fn find_by_locator(&self, selector: &str) -> Vec<ElementRef<'a>> {
        if selector.starts_with("//") || selector.starts_with("(//") {
            return match XPath::parse(selector) {
                Ok(xpath) => xpath.evaluate(self.document),
                Err(error) => {
                    debug!(selector, %error, "xpath rejected");
                    Vec::new()
                }
            };
        }
        match self.document.select(selector) {
            Ok(found) => found,
            Err(error) => {
                debug!(selector, %error, "css rejected");
                Vec::new()
            }
        }
    }

    fn by_attribute(
        &self,
        attribute: &str,
        text: &str,
        options: &QueryOptions,
    ) -> Vec<ElementRef<'a>> {
        let found: Vec<_> = self
            .document
            .elements()
            .filter(|el| {
                dom::attr(*el, attribute).is_some_and(|v| text_matches(v, text, options.exact))
            })
            .collect();
        trace!(attribute, text, count = found.len(), "attribute query");
        found
    }
}
