//! Loupe: Playwright-style locator generation and validation
//!
//! Loupe inspects a parsed HTML document and answers two questions:
//!
//! - *How should a test find this element?* The [`StrategyGenerator`]
//!   proposes `getByRole`, `getByLabel`, `getByText`, ... candidates, runs
//!   each against the document and ranks them, best first.
//! - *What does this locator find?* The [`Validator`] parses a pasted
//!   locator in Java, Python, JavaScript/TypeScript or C# syntax and runs it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   candidates   ┌─────────────┐   render   ┌─────────┐
//! │ Generator │───────────────►│ QueryEngine │            │  codec  │
//! └───────────┘                └─────────────┘◄───────────└─────────┘
//!       │                             ▲           parse        ▲
//!       └─────── accessibility ───────┘                        │
//!                                               Validator ─────┘
//! ```
//!
//! # Example
//!
//! ```
//! use loupe::prelude::*;
//!
//! let doc = Document::parse(r#"<button>Save</button><button>Cancel</button>"#);
//! let config = InspectorConfig::default();
//! let target = doc.select_first("button").unwrap();
//!
//! let generation = StrategyGenerator::new(&doc, &config).generate(target);
//! let best = generation.best().unwrap();
//! assert_eq!(
//!     format(&best.strategy, Syntax::JavaScript),
//!     "page.getByRole('button', { name: 'Save' })"
//! );
//!
//! let validation = Validator::new(&doc, &config)
//!     .validate(r#"page.get_by_text("Cancel")"#)
//!     .unwrap();
//! assert!(validation.result.is_unique());
//! ```

#![warn(missing_docs)]

pub mod accessibility;
pub mod codec;
pub mod config;
pub mod css_path;
pub mod dom;
#[allow(clippy::missing_errors_doc)]
mod generator;
pub mod history;
#[allow(clippy::missing_errors_doc)]
pub mod protocol;
mod query;
mod result;
mod strategy;
pub mod text;
#[allow(clippy::missing_errors_doc)]
mod validator;
pub mod xpath;

pub use codec::{detect_syntax, format, parse, Syntax};
pub use config::{InspectorConfig, Palette, Theme};
pub use dom::Document;
pub use generator::{Generation, RankedStrategy, RankedSummary, StrategyGenerator};
pub use history::HistoryEntry;
pub use protocol::{Request, Response, Session};
pub use query::{QueryEngine, QueryOptions};
pub use result::{LoupeError, LoupeResult};
pub use strategy::{Strategy, StrategyKind};
pub use validator::{
    ElementSummary, EvaluationResult, MatchReport, MatchStatus, Validation, Validator,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::codec::{detect_syntax, format, parse, Syntax};
    pub use super::config::InspectorConfig;
    pub use super::dom::Document;
    pub use super::generator::{Generation, RankedStrategy, StrategyGenerator};
    pub use super::query::{QueryEngine, QueryOptions};
    pub use super::result::{LoupeError, LoupeResult};
    pub use super::strategy::{Strategy, StrategyKind};
    pub use super::validator::{EvaluationResult, MatchReport, MatchStatus, Validator};
}
