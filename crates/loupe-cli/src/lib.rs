//! Loupe CLI Library
//!
//! Command-line front end for the Loupe locator engine: strategy generation,
//! locator validation, syntax conversion, an NDJSON protocol relay and a
//! file-backed locator history.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;
pub mod store;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, FormatArgs, GenerateArgs, HistoryArgs, HistoryCommand,
    ParseArgs, RelayArgs, SyntaxArg, ValidateArgs,
};
pub use config::{load_inspector_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Reporter};
pub use store::{Favorite, HistoryStore, StoredEntry};
