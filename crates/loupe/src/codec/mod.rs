//! Locator source code: rendering strategies and parsing them back.
//!
//! [`format`] turns a [`Strategy`](crate::strategy::Strategy) into a
//! single-line call expression in one of the supported [`Syntax`]es;
//! [`parse`] detects the syntax of a pasted snippet and recovers the strategy.

mod format;
mod parse;

pub use format::format;
pub use parse::{detect_syntax, parse};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target language of a locator expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    /// Playwright for Java
    #[default]
    Java,
    /// Playwright for Python
    Python,
    /// Playwright for JavaScript
    #[serde(alias = "js")]
    JavaScript,
    /// Playwright for TypeScript (rendered like JavaScript)
    #[serde(alias = "ts")]
    TypeScript,
    /// Playwright for .NET
    #[serde(alias = "c#", alias = "cs")]
    CSharp,
}

impl Syntax {
    /// Every syntax
    pub const ALL: [Self; 5] = [
        Self::Java,
        Self::Python,
        Self::JavaScript,
        Self::TypeScript,
        Self::CSharp,
    ];

    /// Display name ("Java", "C#", ...)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Python => "Python",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::CSharp => "C#",
        }
    }

    /// Lenient lookup that falls back to Java for unknown names
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown syntax name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown syntax '{0}' (expected java, python, javascript, typescript or csharp)")]
pub struct UnknownSyntax(pub String);

impl FromStr for Syntax {
    type Err = UnknownSyntax;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "python" | "py" => Ok(Self::Python),
            "javascript" | "js" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "csharp" | "c#" | "cs" => Ok(Self::CSharp),
            _ => Err(UnknownSyntax(s.to_string())),
        }
    }
}
