//! Command-line interface for the `modlog` binary.

pub mod commands;

pub use commands::{cmd_check, cmd_levels};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// modlog - inspect and adjust per-module log levels.
#[derive(Parser)]
#[command(name = "modlog", version, about = "Inspect and adjust per-module log levels")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Interactive shell (the default when no command is given).
    Shell,
    /// Validate a config file and print the resulting levels.
    Check {
        /// Modules to register before printing, so pattern rules can apply
        #[arg(short, long = "module", value_name = "NAME")]
        modules: Vec<String>,
    },
    /// List severity levels from least to most severe.
    Levels,
}
