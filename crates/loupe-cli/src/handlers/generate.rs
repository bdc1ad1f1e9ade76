//! Generate command handler

use std::path::Path;

use loupe::dom::{self, Document};
use loupe::{HistoryEntry, InspectorConfig, RankedSummary, StrategyGenerator, Syntax};
use serde::Serialize;
use tracing::info;

use crate::commands::GenerateArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::handlers::{open_store, reporter};
use crate::output::OutputFormat;

/// JSON shape of `loupe generate --format json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    /// `<tag#id.class>` label of the target
    pub element: String,
    /// Output syntax
    pub syntax: Syntax,
    /// Ranked candidates, best first
    pub strategies: Vec<RankedSummary>,
    /// Time spent generating, in milliseconds
    pub total_time_ms: f64,
}

/// Engine settings for this run: configured values overridden by flags
#[must_use]
pub fn effective_inspector(base: &InspectorConfig, args: &GenerateArgs) -> InspectorConfig {
    let mut inspector = base.clone();
    if let Some(syntax) = args.syntax {
        inspector.syntax = syntax.into();
    }
    if let Some(attribute) = &args.test_id_attr {
        inspector.test_id_attribute.clone_from(attribute);
    }
    if args.exact {
        inspector.exact = true;
    }
    inspector
}

/// Rank strategies for the target element and print them
pub fn execute_generate(
    config: &CliConfig,
    args: &GenerateArgs,
    store: Option<&Path>,
) -> CliResult<()> {
    let inspector = effective_inspector(&config.inspector, args);
    let document = Document::from_path(&args.html)?;
    let target = document.select_first(&args.target)?;
    let label = dom::describe(target);
    info!(target = %label, syntax = %inspector.syntax, "generating strategies");

    let generation = StrategyGenerator::new(&document, &inspector).generate(target);

    if args.record {
        if let Some(best) = generation.best() {
            let mut history = open_store(&inspector, store)?;
            history.record(HistoryEntry::record(&best.strategy, inspector.syntax, target));
            history.save()?;
        }
    }

    let output = GenerateOutput {
        element: label,
        syntax: inspector.syntax,
        strategies: generation
            .strategies
            .iter()
            .map(|s| s.summary(inspector.syntax))
            .collect(),
        total_time_ms: generation.total_time.as_secs_f64() * 1000.0,
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => {
            let reporter = reporter(config);
            reporter.header(&format!("{} ({})", output.element, output.syntax));
            reporter.ranked(&output.strategies);
            if args.record {
                reporter.success("Best locator added to history");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::SyntaxArg;
    use std::path::PathBuf;

    fn args() -> GenerateArgs {
        GenerateArgs {
            html: PathBuf::from("page.html"),
            target: "button".into(),
            syntax: None,
            test_id_attr: None,
            exact: false,
            format: OutputFormat::Json,
            record: false,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let base = InspectorConfig::new().with_syntax(Syntax::Python);
        let mut args = args();
        args.syntax = Some(SyntaxArg::CSharp);
        args.test_id_attr = Some("data-qa".into());
        args.exact = true;
        let inspector = effective_inspector(&base, &args);
        assert_eq!(inspector.syntax, Syntax::CSharp);
        assert_eq!(inspector.test_id_attribute, "data-qa");
        assert!(inspector.exact);
    }

    #[test]
    fn test_config_kept_without_flags() {
        let base = InspectorConfig::new()
            .with_syntax(Syntax::Python)
            .with_exact(true);
        let inspector = effective_inspector(&base, &args());
        assert_eq!(inspector, base);
    }

    #[test]
    fn test_missing_html_file() {
        let mut args = args();
        args.html = PathBuf::from("/nonexistent/page.html");
        assert!(execute_generate(&CliConfig::new(), &args, None).is_err());
    }

    #[test]
    fn test_record_best_locator() {
        let dir = tempfile::TempDir::new().unwrap();
        let html = dir.path().join("page.html");
        std::fs::write(&html, "<button>Save</button>").unwrap();
        let store = dir.path().join("history.json");

        let mut args = args();
        args.html = html;
        args.record = true;
        execute_generate(&CliConfig::new(), &args, Some(&store)).unwrap();

        let history = open_store(&InspectorConfig::default(), Some(&store)).unwrap();
        assert_eq!(history.history().len(), 1);
        assert_eq!(
            history.history()[0].entry.code,
            r#"page.getByRole(AriaRole.BUTTON, new Page.GetByRoleOptions().setName("Save"))"#
        );
        assert_eq!(history.history()[0].entry.element_tag, "BUTTON");
    }
}
