mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::catalog_cmd::catalog_command;
use crate::commands::completions_cmd::completions_command;
use crate::commands::size_cmd::{quick_command, size_command};
use crate::commands::size_file_cmd::size_file_command;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "SOLAR_SIZER_LOG";

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Size(size) => size_command(size),
        Commands::Quick(quick) => quick_command(quick),
        Commands::SizeFile { input, output } => size_file_command(&input, &output),
        Commands::Catalog { store, action } => catalog_command(&store, action),
        Commands::Completions { shell } => completions_command(shell),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
