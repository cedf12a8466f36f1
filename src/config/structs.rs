//! Configuration struct definitions.

use serde::Deserialize;

/// Settings that apply to the whole backend.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default level for modules without an override.
    pub level: String,
    /// Format specification; empty uses the built-in default.
    pub format: String,
    /// `stderr`, `stdout`, or a file path.
    pub output: String,
    /// ANSI colors on terminal destinations.
    pub colors: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: String::new(),
            output: "stderr".to_string(),
            colors: true,
        }
    }
}

/// One `[[patterns]]` entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PatternRule {
    /// Regular expression matched against registered module names.
    pub pattern: String,
    pub level: String,
}
