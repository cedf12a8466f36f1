//! TOML configuration for a registry.
//!
//! ```toml
//! [general]
//! level = "info"
//! format = "%{time} %{level:-8s} [%{module}] %{message}"
//! output = "stderr"
//!
//! [modules]
//! "net.server" = "debug"
//!
//! [[patterns]]
//! pattern = "^db\\."
//! level = "warning"
//! ```
//!
//! Configuration is input only; runtime level changes are never written back.

mod structs;

pub use structs::{GeneralConfig, PatternRule};

use crate::error::Error;
use crate::output::Destination;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// An empty file is a valid config; every field has a default.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    /// Literal module names and their levels; applied whether or not the module
    /// has been registered yet.
    pub modules: BTreeMap<String, String>,
    /// Applied in file order to modules registered at the time the config is applied.
    pub patterns: Vec<PatternRule>,
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(Error::from)
    }
}

impl Config {
    /// Loads from the default location, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be read,
    /// or the TOML is malformed.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads from an explicit path, falling back to defaults when it does not exist.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        fs::read_to_string(path)?.parse()
    }

    /// `<config dir>/modlog/modlog.toml`, e.g. `~/.config/modlog/modlog.toml` on Linux.
    ///
    /// # Errors
    /// Fails when the platform has no config directory.
    pub fn get_config_path() -> Result<PathBuf, Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("modlog").join("modlog.toml"))
            .ok_or(Error::ConfigDirNotFound)
    }

    #[must_use]
    pub fn destination(&self) -> Destination {
        Destination::from(self.general.output.as_str())
    }
}
