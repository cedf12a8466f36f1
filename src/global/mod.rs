//! Process-wide registry for applications that want one shared instance.
//!
//! Uses `OnceLock` so the registry is bootstrapped exactly once, on first use,
//! with the default format on standard error. Libraries should prefer taking a
//! [`Registry`] or [`Logger`] explicitly; these functions are for the outermost
//! layer of a program.

use crate::config::Config;
use crate::error::Error;
use crate::level::Level;
use crate::logger::Logger;
use crate::registry::Registry;
use std::sync::OnceLock;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The shared registry, bootstrapping it on first call.
pub fn registry() -> &'static Registry {
    GLOBAL.get_or_init(Registry::new)
}

/// Applies `config` to the shared registry.
///
/// # Errors
/// See [`Registry::apply_config`]; on error the registry is unchanged.
pub fn init_with_config(config: &Config) -> Result<&'static Registry, Error> {
    let registry = registry();
    registry.apply_config(config)?;
    Ok(registry)
}

/// # Errors
/// [`Error::EmptyModuleName`] or [`Error::ReservedModuleName`].
pub fn get_logger(module: &str) -> Result<Logger, Error> {
    registry().logger(module)
}

#[must_use]
pub fn module_level(module: &str) -> Level {
    registry().module_level(module)
}

/// Pattern-based update over every registered module.
///
/// # Errors
/// [`Error::InvalidLevel`] or [`Error::InvalidPattern`].
pub fn set_module_level(pattern: &str, level: &str) -> Result<Level, Error> {
    registry().set_module_level(pattern, level)
}

/// Literal single-module (or `all`) update.
///
/// # Errors
/// [`Error::InvalidLevel`].
pub fn set_level(target: &str, level: &str) -> Result<Level, Error> {
    registry().set_level(target, level)
}

/// The built-in fallback level, for callers that validate or display levels.
#[must_use]
pub const fn default_level() -> Level {
    Level::DEFAULT
}

/// # Errors
/// [`Error::InvalidFormat`]; the previous format stays installed.
pub fn set_format(spec: &str) -> Result<(), Error> {
    registry().set_format(spec)
}

/// Returns the shared registry to its bootstrap state.
pub fn reset() {
    registry().reset();
}
