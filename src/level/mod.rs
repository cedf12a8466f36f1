//! Severity scale shared by every module threshold in the registry.

use crate::fmt::Color;
use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the backend can compare a record's level against a module's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Internal state dumps; off unless an operator asks for it.
    Debug = 0,
    /// Normal operational milestones.
    #[default]
    Info = 1,
    /// Noteworthy but expected events (reconfiguration, fallbacks taken).
    Notice = 2,
    /// Rejected input and other anomalies the process recovers from.
    Warning = 3,
    /// Failed operations.
    Error = 4,
    /// The process can no longer do its job.
    Critical = 5,
}

impl Level {
    /// Fallback threshold for any module nobody configured.
    pub const DEFAULT: Self = Self::Info;

    /// Upper case because operators type and read these labels in level listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Notice => "NOTICE",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Ordered from least to most severe.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Debug,
            Self::Info,
            Self::Notice,
            Self::Warning,
            Self::Error,
            Self::Critical,
        ]
    }

    /// Color used by the `%{color}` placeholder.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Debug => Color::cyan(),
            Self::Info => Color::white(),
            Self::Notice => Color::green(),
            Self::Warning => Color::yellow(),
            Self::Error => Color::red(),
            Self::Critical => Color::purple(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can tell "unknown level" apart from other failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl ParseLevelError {
    /// The text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "NOTICE" => Ok(Self::Notice),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" | "ERR" => Ok(Self::Error),
            "CRITICAL" | "CRIT" => Ok(Self::Critical),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
