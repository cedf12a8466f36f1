//! One-shot subcommands. Each returns an `ExitCode` so `main` stays a dispatcher.

use crate::config::Config;
use crate::level::Level;
use crate::registry::Registry;
use std::process::ExitCode;

/// Builds a registry from `config`, registers `modules`, re-applies the config so
/// pattern rules see them, and prints the resolved state.
#[must_use]
pub fn cmd_check(config: &Config, modules: &[String]) -> ExitCode {
    let registry = match Registry::from_config(config) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("invalid config: {e}");
            return ExitCode::FAILURE;
        }
    };

    for module in modules {
        if let Err(e) = registry.logger(module) {
            eprintln!("invalid module '{module}': {e}");
            return ExitCode::FAILURE;
        }
    }
    if !modules.is_empty()
        && let Err(e) = registry.apply_config(config)
    {
        eprintln!("invalid config: {e}");
        return ExitCode::FAILURE;
    }

    println!("default: {}", registry.default_level());
    println!("output:  {}", config.destination());
    println!("format:  {}", registry.format());

    let mut rows: Vec<(String, Level)> = registry.snapshot();
    for module in config.modules.keys() {
        if !registry.is_registered(module) {
            rows.push((module.clone(), registry.module_level(module)));
        }
    }
    rows.sort();

    if rows.is_empty() {
        println!("modules: none");
    } else {
        println!("modules:");
        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, level) in rows {
            println!("  {name:<width$}  {level}");
        }
    }

    ExitCode::SUCCESS
}

/// Prints the severity scale, marking the built-in default.
#[must_use]
pub fn cmd_levels() -> ExitCode {
    for level in Level::all() {
        let marker = if level == Level::DEFAULT {
            " (default)"
        } else {
            ""
        };
        println!("{level}{marker}");
    }
    ExitCode::SUCCESS
}
