//! Strategy to source text.

use super::Syntax;
use crate::strategy::Strategy;
use crate::text::{escape_single_quoted, escape_string};

/// Render `strategy` as a single-line locator call in `syntax`.
///
/// Values are escaped for the target's string literals. A role strategy with
/// an empty role renders the `locator("unknown")` placeholder.
#[must_use]
pub fn format(strategy: &Strategy, syntax: Syntax) -> String {
    match syntax {
        Syntax::Java => java(strategy),
        Syntax::Python => python(strategy),
        Syntax::JavaScript | Syntax::TypeScript => javascript(strategy),
        Syntax::CSharp => csharp(strategy),
    }
}

/// Call name and option-class stem per kind, in camelCase
fn method(strategy: &Strategy) -> &'static str {
    match strategy {
        Strategy::Role { .. } => "getByRole",
        Strategy::Label { .. } => "getByLabel",
        Strategy::Placeholder { .. } => "getByPlaceholder",
        Strategy::Text { .. } => "getByText",
        Strategy::AltText { .. } => "getByAltText",
        Strategy::Title { .. } => "getByTitle",
        Strategy::TestId { .. } => "getByTestId",
        Strategy::Css { .. } => "locator",
    }
}

fn pascal(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Name filter, treating an empty name as absent
fn role_name(name: Option<&String>) -> Option<&str> {
    name.map(String::as_str).filter(|n| !n.is_empty())
}

fn java(strategy: &Strategy) -> String {
    match strategy {
        Strategy::Role { role, .. } if role.is_empty() => "page.locator(\"unknown\")".to_string(),
        Strategy::Role {
            role,
            name,
            level,
            exact,
        } => {
            let mut options = String::new();
            if let Some(name) = role_name(name.as_ref()) {
                options.push_str(&format!(".setName(\"{}\")", escape_string(name)));
                if *exact {
                    options.push_str(".setExact(true)");
                }
            }
            if let Some(level) = level {
                options.push_str(&format!(".setLevel({level})"));
            }
            let role = role.to_uppercase();
            if options.is_empty() {
                format!("page.getByRole(AriaRole.{role})")
            } else {
                format!("page.getByRole(AriaRole.{role}, new Page.GetByRoleOptions(){options})")
            }
        }
        Strategy::TestId { .. } | Strategy::Css { .. } => {
            format!("page.{}(\"{}\")", method(strategy), escape_string(strategy.value()))
        }
        _ => {
            let call = method(strategy);
            let value = escape_string(strategy.value());
            if strategy.exact() {
                format!(
                    "page.{call}(\"{value}\", new Page.{}Options().setExact(true))",
                    pascal(call)
                )
            } else {
                format!("page.{call}(\"{value}\")")
            }
        }
    }
}

fn python(strategy: &Strategy) -> String {
    match strategy {
        Strategy::Role { role, .. } if role.is_empty() => "page.locator(\"unknown\")".to_string(),
        Strategy::Role {
            role,
            name,
            level,
            exact,
        } => {
            let mut call = format!("page.get_by_role(\"{}\"", escape_string(role));
            if let Some(name) = role_name(name.as_ref()) {
                call.push_str(&format!(", name=\"{}\"", escape_string(name)));
                if *exact {
                    call.push_str(", exact=True");
                }
            }
            if let Some(level) = level {
                call.push_str(&format!(", level={level}"));
            }
            call.push(')');
            call
        }
        _ => {
            let call = snake(method(strategy));
            let value = escape_string(strategy.value());
            if strategy.exact() {
                format!("page.{call}(\"{value}\", exact=True)")
            } else {
                format!("page.{call}(\"{value}\")")
            }
        }
    }
}

fn javascript(strategy: &Strategy) -> String {
    match strategy {
        Strategy::Role { role, .. } if role.is_empty() => "page.locator('unknown')".to_string(),
        Strategy::Role {
            role,
            name,
            level,
            exact,
        } => {
            let mut options = Vec::new();
            if let Some(name) = role_name(name.as_ref()) {
                options.push(format!("name: '{}'", escape_single_quoted(name)));
                if *exact {
                    options.push("exact: true".to_string());
                }
            }
            if let Some(level) = level {
                options.push(format!("level: {level}"));
            }
            let role = escape_single_quoted(role);
            if options.is_empty() {
                format!("page.getByRole('{role}')")
            } else {
                format!("page.getByRole('{role}', {{ {} }})", options.join(", "))
            }
        }
        _ => {
            let call = method(strategy);
            let value = escape_single_quoted(strategy.value());
            if strategy.exact() {
                format!("page.{call}('{value}', {{ exact: true }})")
            } else {
                format!("page.{call}('{value}')")
            }
        }
    }
}

fn csharp(strategy: &Strategy) -> String {
    match strategy {
        Strategy::Role { role, .. } if role.is_empty() => "page.Locator(\"unknown\")".to_string(),
        Strategy::Role {
            role,
            name,
            level,
            exact,
        } => {
            let mut options = Vec::new();
            if let Some(name) = role_name(name.as_ref()) {
                options.push(format!("Name = \"{}\"", escape_string(name)));
                if *exact {
                    options.push("Exact = true".to_string());
                }
            }
            if let Some(level) = level {
                options.push(format!("Level = {level}"));
            }
            let role = pascal(role);
            if options.is_empty() {
                format!("page.GetByRole(AriaRole.{role})")
            } else {
                format!("page.GetByRole(AriaRole.{role}, new() {{ {} }})", options.join(", "))
            }
        }
        _ => {
            let call = pascal(method(strategy));
            let value = escape_string(strategy.value());
            if strategy.exact() {
                format!("page.{call}(\"{value}\", new() {{ Exact = true }})")
            } else {
                format!("page.{call}(\"{value}\")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(strategy: &Strategy) -> [String; 4] {
        [
            format(strategy, Syntax::Java),
            format(strategy, Syntax::Python),
            format(strategy, Syntax::JavaScript),
            format(strategy, Syntax::CSharp),
        ]
    }

    mod role_tests {
        use super::*;

        #[test]
        fn test_named_role() {
            let [java, python, js, cs] = all(&Strategy::role_named("button", "Sign in"));
            assert_eq!(
                java,
                r#"page.getByRole(AriaRole.BUTTON, new Page.GetByRoleOptions().setName("Sign in"))"#
            );
            assert_eq!(python, r#"page.get_by_role("button", name="Sign in")"#);
            assert_eq!(js, "page.getByRole('button', { name: 'Sign in' })");
            assert_eq!(cs, r#"page.GetByRole(AriaRole.Button, new() { Name = "Sign in" })"#);
        }

        #[test]
        fn test_bare_role() {
            let [java, python, js, cs] = all(&Strategy::role("navigation"));
            assert_eq!(java, "page.getByRole(AriaRole.NAVIGATION)");
            assert_eq!(python, r#"page.get_by_role("navigation")"#);
            assert_eq!(js, "page.getByRole('navigation')");
            assert_eq!(cs, "page.GetByRole(AriaRole.Navigation)");
        }

        #[test]
        fn test_empty_name_is_omitted() {
            let strategy = Strategy::role_named("button", "");
            assert_eq!(format(&strategy, Syntax::Java), "page.getByRole(AriaRole.BUTTON)");
        }

        #[test]
        fn test_exact_and_level() {
            let strategy = Strategy::role_named("heading", "Intro").with_exact(true).with_level(2);
            let [java, python, js, cs] = all(&strategy);
            assert_eq!(
                java,
                r#"page.getByRole(AriaRole.HEADING, new Page.GetByRoleOptions().setName("Intro").setExact(true).setLevel(2))"#
            );
            assert_eq!(python, r#"page.get_by_role("heading", name="Intro", exact=True, level=2)"#);
            assert_eq!(js, "page.getByRole('heading', { name: 'Intro', exact: true, level: 2 })");
            assert_eq!(
                cs,
                r#"page.GetByRole(AriaRole.Heading, new() { Name = "Intro", Exact = true, Level = 2 })"#
            );
        }

        #[test]
        fn test_empty_role_placeholder() {
            let [java, python, js, cs] = all(&Strategy::role(""));
            assert_eq!(java, r#"page.locator("unknown")"#);
            assert_eq!(python, r#"page.locator("unknown")"#);
            assert_eq!(js, "page.locator('unknown')");
            assert_eq!(cs, r#"page.Locator("unknown")"#);
        }
    }

    mod text_kind_tests {
        use super::*;

        #[test]
        fn test_call_names() {
            let [java, python, js, cs] = all(&Strategy::alt_text("Logo"));
            assert_eq!(java, r#"page.getByAltText("Logo")"#);
            assert_eq!(python, r#"page.get_by_alt_text("Logo")"#);
            assert_eq!(js, "page.getByAltText('Logo')");
            assert_eq!(cs, r#"page.GetByAltText("Logo")"#);
            assert_eq!(
                format(&Strategy::test_id("save"), Syntax::Python),
                r#"page.get_by_test_id("save")"#
            );
        }

        #[test]
        fn test_exact_option() {
            let [java, python, js, cs] = all(&Strategy::text("Welcome").with_exact(true));
            assert_eq!(
                java,
                r#"page.getByText("Welcome", new Page.GetByTextOptions().setExact(true))"#
            );
            assert_eq!(python, r#"page.get_by_text("Welcome", exact=True)"#);
            assert_eq!(js, "page.getByText('Welcome', { exact: true })");
            assert_eq!(cs, r#"page.GetByText("Welcome", new() { Exact = true })"#);
        }

        #[test]
        fn test_selector_calls() {
            let [java, python, js, cs] = all(&Strategy::css("div.card > a"));
            assert_eq!(java, r#"page.locator("div.card > a")"#);
            assert_eq!(python, r#"page.locator("div.card > a")"#);
            assert_eq!(js, "page.locator('div.card > a')");
            assert_eq!(cs, r#"page.Locator("div.card > a")"#);
        }

        #[test]
        fn test_escaping() {
            let strategy = Strategy::label("Say \"hi\"\nit's");
            assert_eq!(
                format(&strategy, Syntax::Java),
                r#"page.getByLabel("Say \"hi\"\nit's")"#
            );
            assert_eq!(
                format(&strategy, Syntax::TypeScript),
                r#"page.getByLabel('Say \"hi\"\nit\'s')"#
            );
        }
    }
}
