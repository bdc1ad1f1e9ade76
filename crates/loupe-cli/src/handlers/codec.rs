//! Parse and format command handlers

use loupe::{Strategy, Syntax};
use serde::Serialize;

use crate::commands::{FormatArgs, ParseArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// JSON shape of `loupe parse`
#[derive(Debug, Serialize)]
pub struct ParseOutput {
    /// Detected syntax
    pub syntax: Syntax,
    /// Parsed strategy
    pub strategy: Strategy,
}

/// Parse locator code into its syntax and strategy
pub fn parse_code(code: &str) -> CliResult<ParseOutput> {
    let (syntax, strategy) = loupe::parse(code)?;
    Ok(ParseOutput { syntax, strategy })
}

/// Print the parsed strategy as JSON
pub fn execute_parse(args: &ParseArgs) -> CliResult<()> {
    let output = parse_code(&args.code)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Render strategy JSON in the requested (or configured) syntax
pub fn format_strategy(json: &str, syntax: Syntax) -> CliResult<String> {
    let strategy: Strategy = serde_json::from_str(json)
        .map_err(|e| CliError::invalid_argument(format!("not a strategy: {e}")))?;
    Ok(loupe::format(&strategy, syntax))
}

/// Print a strategy rendered as locator code
pub fn execute_format(config: &CliConfig, args: &FormatArgs) -> CliResult<()> {
    let syntax = args.syntax.map_or(config.inspector.syntax, Syntax::from);
    println!("{}", format_strategy(&args.strategy, syntax)?);
    Ok(())
}
