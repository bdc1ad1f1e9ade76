//! Source text to strategy.
//!
//! Each syntax has a fixed table of call patterns tried in order; the first
//! match wins. Options (`name`, `exact`, `level`) are read from the text that
//! follows the matched call head. String literals may use either quote style.

use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::debug;

use super::Syntax;
use crate::result::{LoupeError, LoupeResult};
use crate::strategy::{Strategy, StrategyKind};
use crate::text::unescape_string;

/// Capitalized locator calls, as written in C#
const CSHARP_CALLS: &[&str] = &[
    ".GetByRole(",
    ".GetByLabel(",
    ".GetByText(",
    ".GetByPlaceholder(",
    ".GetByTestId(",
    ".GetByAltText(",
    ".GetByTitle(",
    ".Locator(",
];

/// Guess the syntax of a locator snippet.
///
/// Checks run in a fixed order and the first hit wins:
/// 1. a capitalized locator call such as `.GetByRole(`: C#
/// 2. `AriaRole.` or `new Page.`: Java
/// 3. `get_by_`: Python
/// 4. `getBy`, `{` or a single-quoted argument: JavaScript
/// 5. otherwise Java
///
/// Java option classes (`new Page.GetByRoleOptions()`) are not calls of a
/// capitalized locator method and do not count for step 1.
#[must_use]
pub fn detect_syntax(code: &str) -> Syntax {
    if CSHARP_CALLS.iter().any(|call| code.contains(call)) {
        Syntax::CSharp
    } else if code.contains("AriaRole.") || code.contains("new Page.") {
        Syntax::Java
    } else if code.contains("get_by_") {
        Syntax::Python
    } else if code.contains("getBy") || code.contains('{') || code.contains("('") {
        Syntax::JavaScript
    } else {
        Syntax::Java
    }
}

/// Parse a locator snippet of auto-detected syntax.
///
/// The input is trimmed first. Role names are lower-cased and string
/// literals un-escaped.
pub fn parse(code: &str) -> LoupeResult<(Syntax, Strategy)> {
    let code = code.trim();
    let syntax = detect_syntax(code);
    let grammar = grammar(syntax);
    for (kind, pattern) in &grammar.calls {
        if let Some(caps) = pattern.captures(code) {
            // Options are read only inside the call's own argument list.
            let rest = caps.get(0).map_or("", |m| {
                if m.as_str().ends_with(')') {
                    ""
                } else {
                    call_arguments(&code[m.end()..])
                }
            });
            let strategy = grammar.build(*kind, &caps, rest);
            debug!(%syntax, kind = %kind, "parsed locator");
            return Ok((syntax, strategy));
        }
    }
    debug!(%syntax, "no locator pattern matched");
    Err(LoupeError::UnrecognizedSyntax {
        syntax: syntax.name().to_string(),
    })
}

/// Prefix of `rest` up to the `)` closing the call it starts inside of.
///
/// Parentheses inside string literals are skipped. Without a closing
/// parenthesis the whole of `rest` is returned.
fn call_arguments(rest: &str) -> &str {
    let mut depth = 1usize;
    let mut quote = None;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return &rest[..i];
                }
            }
            _ => {}
        }
    }
    rest
}

/// String literal in either quote style, captured as `<prefix>dq` / `<prefix>sq`
fn literal(prefix: &str) -> String {
    format!(r#"(?:"(?P<{prefix}dq>(?:[^"\\]|\\.)*)"|'(?P<{prefix}sq>(?:[^'\\]|\\.)*)')"#)
}

fn literal_value(caps: &Captures<'_>, prefix: &str) -> Option<String> {
    caps.name(&format!("{prefix}dq"))
        .or_else(|| caps.name(&format!("{prefix}sq")))
        .map(|m| unescape_string(m.as_str()))
}

struct Grammar {
    calls: Vec<(StrategyKind, Regex)>,
    name: Regex,
    exact: Regex,
    level: Regex,
}

/// Call heads per syntax, in match order
struct Heads {
    role: &'static str,
    label: &'static str,
    text: &'static str,
    placeholder: &'static str,
    test_id: &'static str,
    alt_text: &'static str,
    title: &'static str,
    locator: &'static str,
    /// Role given as `AriaRole.X` rather than a string
    enum_role: bool,
    name: &'static str,
    exact: &'static str,
    level: &'static str,
}

const JAVA: Heads = Heads {
    role: "getByRole",
    label: "getByLabel",
    text: "getByText",
    placeholder: "getByPlaceholder",
    test_id: "getByTestId",
    alt_text: "getByAltText",
    title: "getByTitle",
    locator: "locator",
    enum_role: true,
    name: r"\.setName\(\s*",
    exact: r"\.setExact\(\s*(?P<flag>true|false)\s*\)",
    level: r"\.setLevel\(\s*(?P<level>\d+)\s*\)",
};

const PYTHON: Heads = Heads {
    role: "get_by_role",
    label: "get_by_label",
    text: "get_by_text",
    placeholder: "get_by_placeholder",
    test_id: "get_by_test_id",
    alt_text: "get_by_alt_text",
    title: "get_by_title",
    locator: "locator",
    enum_role: false,
    name: r"\bname\s*=\s*",
    exact: r"\bexact\s*=\s*(?P<flag>True|False)",
    level: r"\blevel\s*=\s*(?P<level>\d+)",
};

const JAVASCRIPT: Heads = Heads {
    role: "getByRole",
    label: "getByLabel",
    text: "getByText",
    placeholder: "getByPlaceholder",
    test_id: "getByTestId",
    alt_text: "getByAltText",
    title: "getByTitle",
    locator: "locator",
    enum_role: false,
    name: r"\bname\s*:\s*",
    exact: r"\bexact\s*:\s*(?P<flag>true|false)",
    level: r"\blevel\s*:\s*(?P<level>\d+)",
};

const CSHARP: Heads = Heads {
    role: "GetByRole",
    label: "GetByLabel",
    text: "GetByText",
    placeholder: "GetByPlaceholder",
    test_id: "GetByTestId",
    alt_text: "GetByAltText",
    title: "GetByTitle",
    locator: "Locator",
    enum_role: true,
    name: r"\bName\s*=\s*",
    exact: r"\bExact\s*=\s*(?P<flag>true|false)",
    level: r"\bLevel\s*=\s*(?P<level>\d+)",
};

impl Heads {
    fn compile(&self) -> Result<Grammar, regex::Error> {
        let value = literal("v");
        let role = if self.enum_role {
            format!(r"\b{}\(\s*AriaRole\.(?P<role>\w+)", self.role)
        } else {
            format!(r"\b{}\(\s*{}", self.role, literal("r"))
        };
        let call = |head: &str| format!(r"\b{head}\(\s*{value}\s*[,)]");
        let calls = vec![
            (StrategyKind::Role, Regex::new(&role)?),
            (StrategyKind::Label, Regex::new(&call(self.label))?),
            (StrategyKind::Text, Regex::new(&call(self.text))?),
            (StrategyKind::Placeholder, Regex::new(&call(self.placeholder))?),
            (StrategyKind::TestId, Regex::new(&call(self.test_id))?),
            (StrategyKind::AltText, Regex::new(&call(self.alt_text))?),
            (StrategyKind::Title, Regex::new(&call(self.title))?),
            (StrategyKind::Css, Regex::new(&call(self.locator))?),
        ];
        Ok(Grammar {
            calls,
            name: Regex::new(&format!("{}{}", self.name, literal("n")))?,
            exact: Regex::new(self.exact)?,
            level: Regex::new(self.level)?,
        })
    }
}

#[allow(clippy::expect_used)]
fn grammar(syntax: Syntax) -> &'static Grammar {
    static GRAMMARS: OnceLock<[Grammar; 4]> = OnceLock::new();
    let grammars = GRAMMARS.get_or_init(|| {
        // Patterns are built from literals above; failure is a programming error.
        [JAVA, PYTHON, JAVASCRIPT, CSHARP].map(|heads| heads.compile().expect("valid locator grammar"))
    });
    match syntax {
        Syntax::Java => &grammars[0],
        Syntax::Python => &grammars[1],
        Syntax::JavaScript | Syntax::TypeScript => &grammars[2],
        Syntax::CSharp => &grammars[3],
    }
}

impl Grammar {
    fn build(&self, kind: StrategyKind, caps: &Captures<'_>, rest: &str) -> Strategy {
        let value = || literal_value(caps, "v").unwrap_or_default();
        let exact_in = |text: &str| {
            self.exact
                .captures(text)
                .and_then(|c| c.name("flag"))
                .is_some_and(|m| m.as_str().eq_ignore_ascii_case("true"))
        };
        match kind {
            StrategyKind::Role => {
                let role = caps
                    .name("role")
                    .map(|m| m.as_str().to_string())
                    .or_else(|| literal_value(caps, "r"))
                    .unwrap_or_default()
                    .to_lowercase();
                let (name, options) = match self.name.captures(rest) {
                    Some(found) => {
                        let span = found.get(0).map_or(0..0, |m| m.range());
                        let options = format!("{}{}", &rest[..span.start], &rest[span.end..]);
                        (literal_value(&found, "n"), options)
                    }
                    None => (None, rest.to_string()),
                };
                let level = self
                    .level
                    .captures(&options)
                    .and_then(|c| c.name("level"))
                    .and_then(|m| m.as_str().parse().ok());
                Strategy::Role {
                    role,
                    name,
                    level,
                    exact: exact_in(&options),
                }
            }
            StrategyKind::Label => Strategy::label(value()).with_exact(exact_in(rest)),
            StrategyKind::Text => Strategy::text(value()).with_exact(exact_in(rest)),
            StrategyKind::Placeholder => Strategy::placeholder(value()).with_exact(exact_in(rest)),
            StrategyKind::AltText => Strategy::alt_text(value()).with_exact(exact_in(rest)),
            StrategyKind::Title => Strategy::title(value()).with_exact(exact_in(rest)),
            StrategyKind::TestId => Strategy::test_id(value()),
            StrategyKind::Css => Strategy::css(value()),
        }
    }
}
