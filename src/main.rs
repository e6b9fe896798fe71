use clap::Parser;
use fileorg::cli::{Cli, run_cli};
use fileorg::config::Config;
use fileorg::logging::{init_logging, resolve_level};
use fileorg::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let level = Config::default().logging.level.into();
            init_logging(resolve_level(level, cli.verbose, cli.quiet));
            OutputFormatter::error(&format!("Error loading configuration: {}", e));
            return ExitCode::FAILURE;
        }
    };

    init_logging(resolve_level(config.logging.level.into(), cli.verbose, cli.quiet));
    tracing::trace!(?cli, "parsed arguments");

    match run_cli(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&e);
            ExitCode::FAILURE
        }
    }
}
