//! Validate command handler

use std::path::Path;

use loupe::{Document, HistoryEntry, MatchReport, Strategy, Syntax, Validator};
use serde::Serialize;
use tracing::info;

use crate::commands::ValidateArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::handlers::{open_store, reporter};
use crate::output::OutputFormat;

/// JSON shape of `loupe validate --format json`
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    /// Detected syntax
    pub syntax: Syntax,
    /// Parsed strategy
    pub strategy: Strategy,
    /// Match summary
    #[serde(flatten)]
    pub report: MatchReport,
}

/// Parse locator code, run it against the page and print the verdict
pub fn execute_validate(
    config: &CliConfig,
    args: &ValidateArgs,
    store: Option<&Path>,
) -> CliResult<()> {
    let document = Document::from_path(&args.html)?;
    let validation = Validator::new(&document, &config.inspector).validate(&args.code)?;
    let report = validation.result.report();
    info!(
        syntax = %validation.syntax,
        kind = %validation.strategy.kind(),
        count = report.count,
        "locator validated"
    );

    let recorded = match validation.result.elements.as_slice() {
        [element] if args.record => {
            let mut history = open_store(&config.inspector, store)?;
            history.record(HistoryEntry::record(
                &validation.strategy,
                validation.syntax,
                *element,
            ));
            history.save()?;
            true
        }
        _ => false,
    };

    match args.format {
        OutputFormat::Json => {
            let output = ValidateOutput {
                syntax: validation.syntax,
                strategy: validation.strategy,
                report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            let reporter = reporter(config);
            reporter.info(&format!(
                "{} {} locator",
                validation.syntax,
                validation.strategy.kind()
            ));
            reporter.match_report(&report);
            if recorded {
                reporter.success("Locator added to history");
            } else if args.record {
                reporter.warning("Not recorded: locator is not unique");
            }
        }
    }
    Ok(())
}
