//! Fallback CSS selector generation.

use scraper::ElementRef;

use crate::dom::{self, Document};

/// Build a CSS selector for `element`.
///
/// A document-unique, whitespace-free `id` yields `#id`. Otherwise the path of
/// `tag.class1.class2` segments from the element up to (not including)
/// `<body>`, joined by ` > `. Siblings sharing tag and classes make the path
/// ambiguous; ranking detects that by execution.
#[must_use]
pub fn css_path(document: &Document, element: ElementRef<'_>) -> String {
    if let Some(id) = dom::attr(element, "id") {
        if !id.is_empty() && !id.chars().any(char::is_whitespace) && document.count_id(id) == 1 {
            return format!("#{}", css_escape(id));
        }
    }

    let mut segments = Vec::new();
    let mut current = Some(element);
    while let Some(el) = current {
        if dom::tag_name(el) == "body" {
            break;
        }
        let mut segment = dom::tag_name(el).to_string();
        for class in el.value().classes() {
            segment.push('.');
            segment.push_str(&css_escape(class));
        }
        segments.push(segment);
        current = dom::parent_element(el);
    }
    segments.reverse();
    segments.join(" > ")
}

/// Escape an identifier for use in a CSS selector (`CSS.escape` rules).
#[must_use]
pub fn css_escape(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let chars: Vec<char> = ident.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        let leading_digit = ch.is_ascii_digit() && (i == 0 || (i == 1 && chars[0] == '-'));
        if ch == '\0' {
            out.push('\u{FFFD}');
        } else if leading_digit || ch.is_control() {
            out.push_str(&format!("\\{:x} ", u32::from(ch)));
        } else if i == 0 && ch == '-' && chars.len() == 1 {
            out.push_str("\\-");
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_id_shortcut() {
        let doc = Document::parse(r#"<div><button id="x" class="btn">Go</button></div>"#);
        let el = doc.select_first("button").unwrap();
        assert_eq!(css_path(&doc, el), "#x");
    }

    #[test]
    fn test_duplicate_id_falls_back_to_path() {
        let doc = Document::parse(
            r#"<div class="row"><span id="x" class="a b">1</span></div><span id="x">2</span>"#,
        );
        let el = doc.select_first("div span").unwrap();
        assert_eq!(css_path(&doc, el), "div.row > span.a.b");
    }

    #[test]
    fn test_id_with_whitespace_is_ignored() {
        let doc = Document::parse(r#"<p id="a b">t</p>"#);
        let el = doc.select_first("p").unwrap();
        assert_eq!(css_path(&doc, el), "p");
    }

    #[test]
    fn test_path_resolves_back_to_element() {
        let doc = Document::parse(
            r#"<main><ul class="menu"><li class="item">A</li></ul></main>"#,
        );
        let el = doc.select_first("li").unwrap();
        let path = css_path(&doc, el);
        assert_eq!(path, "main > ul.menu > li.item");
        assert_eq!(doc.select(&path).unwrap(), vec![el]);
    }

    #[test]
    fn test_escape() {
        assert_eq!(css_escape("plain-id_1"), "plain-id_1");
        assert_eq!(css_escape("1st"), "\\31 st");
        assert_eq!(css_escape("a:b"), "a\\:b");
        assert_eq!(css_escape("-"), "\\-");
    }

    #[test]
    fn test_escaped_id_selects() {
        let doc = Document::parse(r#"<div id="9lives">cat</div>"#);
        let el = doc.select_first("div").unwrap();
        let css = css_path(&doc, el);
        assert_eq!(doc.select(&css).unwrap(), vec![el]);
    }
}
