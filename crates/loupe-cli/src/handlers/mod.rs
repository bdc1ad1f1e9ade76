//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod codec;
pub mod config;
pub mod generate;
pub mod history;
pub mod relay;
pub mod validate;

use crate::config::CliConfig;
use crate::output::Reporter;

pub use codec::{execute_format, execute_parse};
pub use config::execute_config;
pub use generate::execute_generate;
pub use history::{execute_history, open_store};
pub use relay::{execute_relay, relay};
pub use validate::execute_validate;

/// Reporter honouring the configured color and quiet settings
#[must_use]
pub fn reporter(config: &CliConfig) -> Reporter {
    Reporter::new(config.color.should_color(), config.verbosity.is_quiet())
}
