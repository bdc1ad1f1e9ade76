//! Document handle and element helpers.
//!
//! Every query runs against an explicit [`Document`] rather than an ambient
//! page, so fixtures are plain HTML strings.

use std::collections::HashSet;
use std::path::Path;

use scraper::{ElementRef, Html, Selector};

use crate::result::{LoupeError, LoupeResult};

/// A parsed HTML document
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document (fragments are wrapped in `html`/`body`)
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Read and parse an HTML file
    pub fn from_path(path: impl AsRef<Path>) -> LoupeResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::parse(&source))
    }

    /// The `<html>` element
    #[must_use]
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// The `<body>` element, if the parser produced one
    #[must_use]
    pub fn body(&self) -> Option<ElementRef<'_>> {
        self.root()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| tag_name(*el) == "body")
    }

    /// All elements in document order
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.root().descendants().filter_map(ElementRef::wrap)
    }

    /// First element carrying `id`
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|el| el.value().attr("id") == Some(id))
    }

    /// Number of elements carrying `id`
    #[must_use]
    pub fn count_id(&self, id: &str) -> usize {
        self.elements()
            .filter(|el| el.value().attr("id") == Some(id))
            .count()
    }

    /// Elements matching a CSS selector, in document order
    pub fn select(&self, css: &str) -> LoupeResult<Vec<ElementRef<'_>>> {
        let selector =
            Selector::parse(css).map_err(|e| LoupeError::invalid_selector(css, e.to_string()))?;
        Ok(self.html.select(&selector).collect())
    }

    /// First element matching a CSS selector
    pub fn select_first(&self, css: &str) -> LoupeResult<ElementRef<'_>> {
        self.select(css)?
            .into_iter()
            .next()
            .ok_or_else(|| LoupeError::ElementNotFound {
                selector: css.to_string(),
            })
    }

    /// Reorder `matches` into document order, dropping duplicates
    pub fn in_document_order<'a>(
        &'a self,
        matches: impl IntoIterator<Item = ElementRef<'a>>,
    ) -> Vec<ElementRef<'a>> {
        let ids: HashSet<_> = matches.into_iter().map(|el| el.id()).collect();
        if ids.is_empty() {
            return Vec::new();
        }
        self.elements().filter(|el| ids.contains(&el.id())).collect()
    }
}

/// Lower-case tag name
#[must_use]
pub fn tag_name<'a>(element: ElementRef<'a>) -> &'a str {
    element.value().name()
}

/// Attribute value, if present
#[must_use]
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Attribute value trimmed, `None` when absent or blank
#[must_use]
pub fn non_empty_attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    attr(element, name).map(str::trim).filter(|v| !v.is_empty())
}

/// Concatenated text of every descendant text node (DOM `textContent`)
#[must_use]
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// True when at least one direct child text node has non-whitespace content
#[must_use]
pub fn has_direct_text(element: ElementRef<'_>) -> bool {
    element
        .children()
        .any(|child| child.value().as_text().is_some_and(|t| !t.trim().is_empty()))
}

/// Child elements in order
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Parent element, `None` at the root
#[must_use]
pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Nearest inclusive ancestor with the given tag
#[must_use]
pub fn closest<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|el| tag_name(*el) == tag)
}

/// Text content of `container`, leaving out everything inside `exclude`
#[must_use]
pub fn text_excluding(container: ElementRef<'_>, exclude: ElementRef<'_>) -> String {
    let excluded = exclude.id();
    container
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let inside = node.ancestors().any(|a| a.id() == excluded);
            (!inside).then(|| text.to_string())
        })
        .collect()
}

/// Short `<tag#id.class>` label for reports
#[must_use]
pub fn describe(element: ElementRef<'_>) -> String {
    let mut label = format!("<{}", tag_name(element));
    if let Some(id) = non_empty_attr(element, "id") {
        label.push('#');
        label.push_str(id);
    }
    for class in element.value().classes() {
        label.push('.');
        label.push_str(class);
    }
    label.push('>');
    label
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div id="main" class="card wide">
            <label id="lbl">Email <input id="email" type="email"></label>
            <p>Hello <b>world</b></p>
          </div>
          <span id="dup"></span><span id="dup"></span>
        </body></html>"#;

    #[test]
    fn test_elements_in_document_order() {
        let doc = Document::parse(PAGE);
        let tags: Vec<_> = doc.elements().map(tag_name).collect();
        let div = tags.iter().position(|t| *t == "div").unwrap();
        let input = tags.iter().position(|t| *t == "input").unwrap();
        assert!(div < input);
        assert_eq!(tags[0], "html");
    }

    #[test]
    fn test_element_by_id_and_count() {
        let doc = Document::parse(PAGE);
        assert_eq!(tag_name(doc.element_by_id("email").unwrap()), "input");
        assert_eq!(doc.count_id("dup"), 2);
        assert!(doc.element_by_id("missing").is_none());
    }

    #[test]
    fn test_invalid_css_is_error() {
        let doc = Document::parse(PAGE);
        assert!(matches!(
            doc.select("div[").unwrap_err(),
            LoupeError::InvalidSelector { .. }
        ));
    }

    #[test]
    fn test_select_first_not_found() {
        let doc = Document::parse(PAGE);
        assert!(matches!(
            doc.select_first("table").unwrap_err(),
            LoupeError::ElementNotFound { .. }
        ));
    }

    #[test]
    fn test_direct_text() {
        let doc = Document::parse(PAGE);
        let p = doc.select_first("p").unwrap();
        let div = doc.select_first("#main").unwrap();
        assert!(has_direct_text(p));
        assert!(!has_direct_text(div));
        assert_eq!(text_content(p), "Hello world");
    }

    #[test]
    fn test_closest_and_exclusion() {
        let doc = Document::parse(PAGE);
        let input = doc.select_first("#email").unwrap();
        let label = closest(input, "label").unwrap();
        assert_eq!(text_excluding(label, input).trim(), "Email");
        assert!(closest(input, "form").is_none());
    }

    #[test]
    fn test_in_document_order_dedupes() {
        let doc = Document::parse(PAGE);
        let p = doc.select_first("p").unwrap();
        let div = doc.select_first("div").unwrap();
        let ordered = doc.in_document_order(vec![p, div, p]);
        assert_eq!(ordered, vec![div, p]);
    }

    #[test]
    fn test_describe() {
        let doc = Document::parse(PAGE);
        assert_eq!(describe(doc.select_first("#main").unwrap()), "<div#main.card.wide>");
    }
}
