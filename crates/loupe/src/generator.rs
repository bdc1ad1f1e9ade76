//! Strategy generation and ranking.
//!
//! For a target element the generator proposes one candidate per applicable
//! strategy kind, executes each one, and orders them so the first entry is
//! the locator a test author should copy.

use scraper::ElementRef;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::accessibility::{accessible_name, element_role, heading_level};
use crate::codec::{self, Syntax};
use crate::config::InspectorConfig;
use crate::css_path::css_path;
use crate::dom::{self, Document};
use crate::strategy::{Strategy, StrategyKind};
use crate::validator::{EvaluationResult, Validator};

/// Tags offered a `getByLabel` candidate
const LABEL_TAGS: &[&str] = &["input", "select", "textarea"];

/// A candidate with its execution outcome
#[derive(Debug, Clone)]
pub struct RankedStrategy<'a> {
    /// The candidate
    pub strategy: Strategy,
    /// Execution outcome
    pub result: EvaluationResult<'a>,
    /// Matches the target and nothing else
    pub is_unique: bool,
    /// Target is among the matches
    pub is_valid: bool,
}

impl RankedStrategy<'_> {
    /// Number of matches
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.result.count()
    }

    /// Serializable summary with the candidate rendered in `syntax`
    #[must_use]
    pub fn summary(&self, syntax: Syntax) -> RankedSummary {
        RankedSummary {
            kind: self.strategy.kind(),
            description: self.strategy.description(),
            priority: self.strategy.priority(),
            code: codec::format(&self.strategy, syntax),
            strategy: self.strategy.clone(),
            match_count: self.match_count(),
            is_unique: self.is_unique,
            is_valid: self.is_valid,
            timing_ms: self.result.timing.as_secs_f64() * 1000.0,
        }
    }
}

/// Serializable view of a [`RankedStrategy`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSummary {
    /// Strategy kind
    #[serde(rename = "type")]
    pub kind: StrategyKind,
    /// Human label
    pub description: &'static str,
    /// Fixed rank
    pub priority: u8,
    /// Rendered source
    pub code: String,
    /// Structured strategy
    pub strategy: Strategy,
    /// Number of matches
    pub match_count: usize,
    /// Matches the target and nothing else
    pub is_unique: bool,
    /// Target is among the matches
    pub is_valid: bool,
    /// Query duration in milliseconds
    pub timing_ms: f64,
}

/// Ranked candidates for one element
#[derive(Debug, Clone)]
pub struct Generation<'a> {
    /// Candidates, best first
    pub strategies: Vec<RankedStrategy<'a>>,
    /// Time spent executing and ranking
    pub total_time: Duration,
}

impl<'a> Generation<'a> {
    /// Best candidate. Always present: the CSS fallback is always generated.
    #[must_use]
    pub fn best(&self) -> Option<&RankedStrategy<'a>> {
        self.strategies.first()
    }
}

/// Proposes and ranks locators for elements of one document
#[derive(Debug, Clone, Copy)]
pub struct StrategyGenerator<'a> {
    document: &'a Document,
    config: &'a InspectorConfig,
}

impl<'a> StrategyGenerator<'a> {
    /// Create a generator over `document`
    #[must_use]
    pub const fn new(document: &'a Document, config: &'a InspectorConfig) -> Self {
        Self { document, config }
    }

    /// Candidate strategies for `element`, unranked, in kind order.
    ///
    /// Each kind is proposed only when its precondition holds; the CSS path
    /// is always last.
    #[must_use]
    pub fn candidates(&self, element: ElementRef<'_>) -> Vec<Strategy> {
        let exact = self.config.exact;
        let name = accessible_name(self.document, element);
        let tag = dom::tag_name(element);
        let mut candidates = Vec::with_capacity(StrategyKind::ALL.len());

        if let Some(role) = element_role(element) {
            if !name.is_empty() {
                candidates.push(Strategy::Role {
                    level: if role == "heading" { heading_level(element) } else { None },
                    role,
                    name: Some(name.clone()),
                    exact,
                });
            }
        }
        if LABEL_TAGS.contains(&tag) && !name.is_empty() {
            candidates.push(Strategy::label(name).with_exact(exact));
        }
        if let Some(placeholder) = dom::non_empty_attr(element, "placeholder") {
            candidates.push(Strategy::placeholder(placeholder).with_exact(exact));
        }
        if dom::has_direct_text(element) {
            let text = dom::text_content(element);
            let text = text.trim();
            if !text.is_empty() && text.chars().count() <= self.config.max_text_len {
                candidates.push(Strategy::text(text).with_exact(exact));
            }
        }
        if let Some(alt) = dom::non_empty_attr(element, "alt") {
            candidates.push(Strategy::alt_text(alt).with_exact(exact));
        }
        if let Some(title) = dom::non_empty_attr(element, "title") {
            candidates.push(Strategy::title(title).with_exact(exact));
        }
        if let Some(test_id) = dom::attr(element, &self.config.test_id_attribute) {
            candidates.push(Strategy::test_id(test_id));
        }
        candidates.push(Strategy::css(css_path(self.document, element)));

        trace!(element = %dom::describe(element), count = candidates.len(), "candidates");
        candidates
    }

    /// Generate, execute and rank candidates for `element`.
    ///
    /// Order: unique-and-correct first, then candidates that at least
    /// include the target, then by priority, then by fewer matches. The
    /// sort is stable, so ties keep kind order.
    #[must_use]
    pub fn generate(&self, element: ElementRef<'_>) -> Generation<'a> {
        let start = Instant::now();
        let validator = Validator::new(self.document, self.config);
        let mut strategies: Vec<RankedStrategy<'a>> = self
            .candidates(element)
            .into_iter()
            .map(|strategy| {
                let result = validator.test(&strategy);
                let is_valid = result.is_valid_for(element);
                RankedStrategy {
                    is_unique: result.is_unique() && is_valid,
                    is_valid,
                    strategy,
                    result,
                }
            })
            .collect();
        strategies.sort_by_key(|s| {
            (
                !s.is_unique,
                !s.is_valid,
                s.strategy.priority(),
                s.match_count(),
            )
        });
        let total_time = start.elapsed();
        debug!(
            element = %dom::describe(element),
            candidates = strategies.len(),
            best = strategies.first().map(|s| s.strategy.kind().as_str()),
            ?total_time,
            "generated strategies"
        );
        Generation {
            strategies,
            total_time,
        }
    }
}
