//! Strategy execution and match reporting.
//!
//! The validator is the reverse path of generation: locator source text is
//! parsed, executed against the document, and summarized in a
//! [`MatchReport`].

use scraper::ElementRef;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::codec::{self, Syntax};
use crate::config::InspectorConfig;
use crate::dom::{self, Document};
use crate::query::QueryEngine;
use crate::result::LoupeResult;
use crate::strategy::Strategy;
use crate::text::{normalize_text, truncate};

/// Characters of element text kept in a report summary
const SUMMARY_TEXT_LEN: usize = 40;

/// Outcome of executing one strategy
#[derive(Debug, Clone)]
pub struct EvaluationResult<'a> {
    /// Matches in document order
    pub elements: Vec<ElementRef<'a>>,
    /// Query duration
    pub timing: Duration,
}

impl<'a> EvaluationResult<'a> {
    /// Number of matches
    #[must_use]
    pub fn count(&self) -> usize {
        self.elements.len()
    }

    /// Exactly one match
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.elements.len() == 1
    }

    /// `target` is among the matches
    #[must_use]
    pub fn is_valid_for(&self, target: ElementRef<'_>) -> bool {
        self.elements.iter().any(|el| el.id() == target.id())
    }

    /// Serializable summary
    #[must_use]
    pub fn report(&self) -> MatchReport {
        MatchReport {
            count: self.count(),
            timing_ms: self.timing.as_secs_f64() * 1000.0,
            is_unique: self.is_unique(),
            elements: self.elements.iter().map(|el| ElementSummary::of(*el)).collect(),
        }
    }
}

/// Short description of a matched element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSummary {
    /// Lower-case tag name
    pub tag: String,
    /// `<tag#id.class>` label
    pub label: String,
    /// Normalized text, truncated
    pub text: String,
}

impl ElementSummary {
    fn of(element: ElementRef<'_>) -> Self {
        Self {
            tag: dom::tag_name(element).to_string(),
            label: dom::describe(element),
            text: truncate(&normalize_text(&dom::text_content(element)), SUMMARY_TEXT_LEN),
        }
    }
}

/// Serializable match summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    /// Number of matches
    pub count: usize,
    /// Query duration in milliseconds
    pub timing_ms: f64,
    /// Exactly one match
    pub is_unique: bool,
    /// Matched elements in document order
    pub elements: Vec<ElementSummary>,
}

/// Verdict shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// Nothing matched
    NoMatch,
    /// Exactly one match
    Unique,
    /// More than one match
    Multiple(usize),
}

impl MatchReport {
    /// Verdict for this report
    #[must_use]
    pub const fn status(&self) -> MatchStatus {
        match self.count {
            0 => MatchStatus::NoMatch,
            1 => MatchStatus::Unique,
            n => MatchStatus::Multiple(n),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => write!(f, "No Elements Found"),
            Self::Unique => write!(f, "Perfect! Unique Match"),
            Self::Multiple(n) => write!(f, "Multiple Matches Found ({n})"),
        }
    }
}

/// A parsed and executed locator
#[derive(Debug, Clone)]
pub struct Validation<'a> {
    /// Detected syntax of the input
    pub syntax: Syntax,
    /// Parsed strategy
    pub strategy: Strategy,
    /// Execution outcome
    pub result: EvaluationResult<'a>,
}

/// Executes strategies and locator code against a document
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    engine: QueryEngine<'a>,
}

impl<'a> Validator<'a> {
    /// Create a validator over `document`
    #[must_use]
    pub const fn new(document: &'a Document, config: &'a InspectorConfig) -> Self {
        Self {
            engine: QueryEngine::new(document, config),
        }
    }

    /// Execute a strategy and time it. Never fails; bad selectors match nothing.
    #[must_use]
    pub fn test(&self, strategy: &Strategy) -> EvaluationResult<'a> {
        let start = Instant::now();
        let elements = self.engine.run(strategy);
        let timing = start.elapsed();
        debug!(kind = %strategy.kind(), count = elements.len(), ?timing, "tested strategy");
        EvaluationResult { elements, timing }
    }

    /// Parse locator code, then execute it
    pub fn validate(&self, code: &str) -> LoupeResult<Validation<'a>> {
        let (syntax, strategy) = codec::parse(code)?;
        let result = self.test(&strategy);
        Ok(Validation {
            syntax,
            strategy,
            result,
        })
    }
}
