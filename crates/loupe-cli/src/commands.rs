//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use loupe::{StrategyKind, Syntax};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Loupe: generate, validate and convert Playwright locators
#[derive(Parser, Debug)]
#[command(name = "loupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Engine settings file (YAML, or JSON by extension)
    #[arg(long, env = "LOUPE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// History file (default: ~/.loupe/history.json)
    #[arg(long, env = "LOUPE_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank locator strategies for an element
    Generate(GenerateArgs),

    /// Parse locator code and run it against a page
    Validate(ValidateArgs),

    /// Parse locator code into a strategy
    Parse(ParseArgs),

    /// Render a strategy as locator code
    Format(FormatArgs),

    /// Answer inspector protocol requests (NDJSON on stdin/stdout)
    Relay(RelayArgs),

    /// Show or edit locator history and favorites
    History(HistoryArgs),

    /// Show effective configuration
    Config(ConfigArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// HTML file to inspect
    pub html: PathBuf,

    /// CSS selector picking the target element (first match)
    #[arg(short, long)]
    pub target: String,

    /// Output syntax
    #[arg(short, long)]
    pub syntax: Option<SyntaxArg>,

    /// Attribute read by getByTestId
    #[arg(long)]
    pub test_id_attr: Option<String>,

    /// Generate exact-match strategies
    #[arg(long)]
    pub exact: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Append the best locator to history
    #[arg(long)]
    pub record: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// HTML file to query
    pub html: PathBuf,

    /// Locator code in any supported syntax
    pub code: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Append the locator to history when it matches exactly one element
    #[arg(long)]
    pub record: bool,
}

/// Arguments for the parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Locator code in any supported syntax
    pub code: String,
}

/// Arguments for the format command
#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Strategy as JSON, e.g. '{"kind":"role","role":"button","name":"Save"}'
    pub strategy: String,

    /// Output syntax (default: configured syntax)
    #[arg(short, long)]
    pub syntax: Option<SyntaxArg>,
}

/// Arguments for the relay command
#[derive(Parser, Debug)]
pub struct RelayArgs {
    /// HTML file the session inspects
    pub html: PathBuf,
}

/// Arguments for the history command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// History action
    #[command(subcommand)]
    pub command: HistoryCommand,
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List recorded locators, most recent first
    List,

    /// Forget all recorded locators
    Clear,

    /// List favorites
    Favorites,

    /// Pin a locator
    Favorite {
        /// Locator code
        code: String,

        /// Strategy kind (role, label, text, placeholder, altText, title, testId, css)
        #[arg(long = "type", value_parser = parse_kind, default_value = "css")]
        kind: StrategyKind,

        /// Tag name of the located element
        #[arg(long, default_value = "")]
        tag: String,
    },

    /// Unpin a favorite by id
    Unfavorite {
        /// Favorite id
        id: i64,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Syntax argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntaxArg {
    /// Playwright for Java
    Java,
    /// Playwright for Python
    #[value(alias = "py")]
    Python,
    /// Playwright for JavaScript
    #[value(name = "javascript", alias = "js")]
    JavaScript,
    /// Playwright for TypeScript
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    /// Playwright for .NET
    #[value(name = "csharp", alias = "cs")]
    CSharp,
}

impl From<SyntaxArg> for Syntax {
    fn from(arg: SyntaxArg) -> Self {
        match arg {
            SyntaxArg::Java => Self::Java,
            SyntaxArg::Python => Self::Python,
            SyntaxArg::JavaScript => Self::JavaScript,
            SyntaxArg::TypeScript => Self::TypeScript,
            SyntaxArg::CSharp => Self::CSharp,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

fn parse_kind(s: &str) -> Result<StrategyKind, String> {
    StrategyKind::ALL
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| {
            let known: Vec<_> = StrategyKind::ALL.iter().map(|k| k.as_str()).collect();
            format!("unknown strategy type '{s}' (expected one of: {})", known.join(", "))
        })
}
