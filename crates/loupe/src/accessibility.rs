//! Implicit ARIA roles and accessible-name computation.
//!
//! Both drive the role and label strategies: an element is only offered a
//! `getByRole` locator when it has a role and a non-empty accessible name,
//! and `getByRole(..., name)` / `getByLabel` match against the same name.

use scraper::ElementRef;

use crate::dom::{self, Document};
use crate::text::normalize_text;

/// Tags whose own text content names them
const NAMED_BY_CONTENT: &[&str] = &["button", "a", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Heading level for `h1`..`h6`
#[must_use]
pub fn heading_level(element: ElementRef<'_>) -> Option<u8> {
    match dom::tag_name(element) {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Role an element carries without an explicit `role` attribute.
#[must_use]
pub fn implicit_role(element: ElementRef<'_>) -> Option<&'static str> {
    let role = match dom::tag_name(element) {
        "a" if dom::attr(element, "href").is_some() => "link",
        "button" => "button",
        "input" => input_role(element),
        "textarea" => "textbox",
        "select" => "combobox",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "img" => "img",
        "ul" | "ol" => "list",
        "li" => "listitem",
        "nav" => "navigation",
        "main" => "main",
        _ => return None,
    };
    Some(role)
}

fn input_role(element: ElementRef<'_>) -> &'static str {
    let kind = dom::attr(element, "type").unwrap_or_default().to_ascii_lowercase();
    match kind.as_str() {
        "button" | "submit" => "button",
        "checkbox" => "checkbox",
        "radio" => "radio",
        "search" => "searchbox",
        _ => "textbox",
    }
}

/// Explicit `role` attribute, falling back to the implicit role.
#[must_use]
pub fn element_role(element: ElementRef<'_>) -> Option<String> {
    dom::non_empty_attr(element, "role")
        .map(str::to_string)
        .or_else(|| implicit_role(element).map(str::to_string))
}

/// Accessible name, whitespace-normalized. Empty when nothing applies.
///
/// Sources are tried in a fixed order and the first non-empty one wins:
///
/// 1. `aria-labelledby` (referenced elements' text, space-joined)
/// 2. `aria-label`
/// 3. `<label for=id>` text, minus the element's own text
/// 4. wrapping `<label>` text, minus the element's own text
/// 5. `title`
/// 6. `alt`
/// 7. `placeholder`
/// 8. own text, for buttons, links and headings only
/// 9. `value`, for inputs only
#[must_use]
pub fn accessible_name(document: &Document, element: ElementRef<'_>) -> String {
    let name = labelled_by(document, element)
        .or_else(|| non_empty(dom::attr(element, "aria-label")))
        .or_else(|| label_for(document, element))
        .or_else(|| wrapping_label(element))
        .or_else(|| non_empty(dom::attr(element, "title")))
        .or_else(|| non_empty(dom::attr(element, "alt")))
        .or_else(|| non_empty(dom::attr(element, "placeholder")))
        .or_else(|| {
            NAMED_BY_CONTENT
                .contains(&dom::tag_name(element))
                .then(|| dom::text_content(element))
                .and_then(|text| non_empty(Some(text.as_str())))
        })
        .or_else(|| {
            (dom::tag_name(element) == "input")
                .then(|| non_empty(dom::attr(element, "value")))
                .flatten()
        });
    name.unwrap_or_default()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(normalize_text).filter(|v| !v.is_empty())
}

fn labelled_by(document: &Document, element: ElementRef<'_>) -> Option<String> {
    let ids = dom::attr(element, "aria-labelledby")?;
    let parts: Vec<String> = ids
        .split_whitespace()
        .filter_map(|id| document.element_by_id(id))
        .map(|el| normalize_text(&dom::text_content(el)))
        .filter(|text| !text.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn label_for(document: &Document, element: ElementRef<'_>) -> Option<String> {
    let id = dom::non_empty_attr(element, "id")?;
    let label = document
        .elements()
        .find(|el| dom::tag_name(*el) == "label" && dom::attr(*el, "for") == Some(id))?;
    non_empty(Some(dom::text_excluding(label, element).as_str()))
}

fn wrapping_label(element: ElementRef<'_>) -> Option<String> {
    let label = dom::closest(element, "label")?;
    non_empty(Some(dom::text_excluding(label, element).as_str()))
}
