//! Unified error type for all modlog operations.

use crate::level::Level;

/// Error type for modlog operations.
#[derive(Debug)]
pub enum Error {
    /// Level text did not match any known severity. Nothing was changed;
    /// `fallback` is the default level that stays in effect.
    InvalidLevel { input: String, fallback: Level },
    /// Module pattern failed to compile. Nothing was changed.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    /// Format specification could not be compiled.
    InvalidFormat(String),
    /// Module names must be non-empty.
    EmptyModuleName,
    /// The name is reserved for addressing every module at once.
    ReservedModuleName(String),
    /// I/O error from an output or config file.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl Error {
    /// The level that remains effective after a rejected level change, if this
    /// error came from one.
    #[must_use]
    pub const fn fallback_level(&self) -> Option<Level> {
        match self {
            Self::InvalidLevel { fallback, .. } => Some(*fallback),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel { input, .. } => write!(f, "invalid log level: '{input}'"),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid module pattern '{pattern}': {source}")
            }
            Self::InvalidFormat(s) => write!(f, "invalid format: {s}"),
            Self::EmptyModuleName => write!(f, "module name must not be empty"),
            Self::ReservedModuleName(name) => write!(f, "module name '{name}' is reserved"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
