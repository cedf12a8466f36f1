//! `modlog` binary: an operator console for the process-wide registry.
//!
//! Usage:
//!   modlog                        Enter interactive shell
//!   modlog check [-m NAME]...     Validate config and print resolved levels
//!   modlog levels                 List severity levels
//!   modlog -c PATH <command>      Use an explicit config file

use clap::Parser;
use modlog::cli::{Cli, Command, cmd_check, cmd_levels};
use modlog::config::Config;
use modlog::global;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => Some(path),
        None => Config::get_config_path().ok(),
    };

    // A broken config is a startup error; refuse to run with half-applied settings
    let loaded = config_path
        .as_deref()
        .map_or_else(|| Ok(Config::default()), Config::load_from);
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            if let Err(e) = global::init_with_config(&config) {
                eprintln!("Error applying config: {e}");
                return ExitCode::FAILURE;
            }
            match modlog::shell::run(global::registry(), config_path) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Shell error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Check { modules } => cmd_check(&config, &modules),
        Command::Levels => cmd_levels(),
    }
}
