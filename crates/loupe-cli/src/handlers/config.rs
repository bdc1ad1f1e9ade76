//! Config command handler

use std::path::Path;

use crate::commands::ConfigArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::OutputFormat;
use crate::store::HistoryStore;

/// Lines describing the effective configuration
#[must_use]
pub fn describe_config(config: &CliConfig, store: Option<&Path>) -> Vec<String> {
    let inspector = &config.inspector;
    let palette = inspector.palette();
    let store = store.map_or_else(
        || {
            HistoryStore::default_path()
                .map_or_else(|e| e.to_string(), |p| p.display().to_string())
        },
        |p| p.display().to_string(),
    );
    vec![
        format!("  Verbosity: {:?}", config.verbosity),
        format!("  Color: {:?}", config.color),
        format!("  Syntax: {}", inspector.syntax),
        format!("  Test id attribute: {}", inspector.test_id_attribute),
        format!("  Exact: {}", inspector.exact),
        format!("  Max text length: {}", inspector.max_text_len),
        format!("  Max history: {}", inspector.max_history),
        format!("  Theme: {:?} (highlight {})", inspector.theme, palette.highlight),
        format!("  History file: {store}"),
    ]
}

/// Print the effective configuration
pub fn execute_config(config: &CliConfig, args: &ConfigArgs, store: Option<&Path>) -> CliResult<()> {
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => {
            println!("Current configuration:");
            for line in describe_config(config, store) {
                println!("{line}");
            }
        }
    }
    Ok(())
}
