//! Loupe CLI: Playwright locators from the terminal
//!
//! ## Usage
//!
//! ```bash
//! loupe generate page.html --target "#submit" --syntax python
//! loupe validate page.html "page.getByRole('button', { name: 'Save' })"
//! loupe parse 'page.get_by_label("Email")'
//! loupe relay page.html < requests.ndjson
//! loupe history list
//! ```

use clap::Parser;
use loupe_cli::{
    handlers, load_inspector_config, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);

    let store = cli.store.as_deref();
    match cli.command {
        Commands::Generate(args) => handlers::execute_generate(&config, &args, store),
        Commands::Validate(args) => handlers::execute_validate(&config, &args, store),
        Commands::Parse(args) => handlers::execute_parse(&args),
        Commands::Format(args) => handlers::execute_format(&config, &args),
        Commands::Relay(args) => handlers::execute_relay(&config, &args),
        Commands::History(args) => handlers::execute_history(&config, &args, store),
        Commands::Config(args) => handlers::execute_config(&config, &args, store),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    let mut config = CliConfig::new().with_verbosity(verbosity).with_color(color);
    if let Some(path) = &cli.config {
        config = config.with_inspector(load_inspector_config(path)?);
    }
    Ok(config)
}

/// Logs go to stderr so stdout stays parseable; `RUST_LOG` wins over `-v`
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity.is_debug()),
        )
        .try_init();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use loupe::Syntax;
    use std::io::Write;

    #[test]
    fn test_build_config_verbosity() {
        let cli = Cli::parse_from(["loupe", "-vv", "parse", "x"]);
        assert_eq!(build_config(&cli).unwrap().verbosity, Verbosity::Debug);
        let cli = Cli::parse_from(["loupe", "-q", "-v", "parse", "x"]);
        assert_eq!(build_config(&cli).unwrap().verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_build_config_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"syntax: python\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::parse_from(["loupe", "--config", &path, "config"]);
        assert_eq!(build_config(&cli).unwrap().inspector.syntax, Syntax::Python);
    }
}
