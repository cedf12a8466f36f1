//! Stepwise construction for registries that need something other than the
//! bootstrap defaults.

use super::Registry;
use crate::backend::{Backend, Target};
use crate::error::Error;
use crate::fmt::Formatter;
use crate::level::Level;
use crate::output::{Output, TerminalOutput};
use std::sync::Arc;

/// Collects format, destination and levels; `build` validates the format.
pub struct RegistryBuilder {
    default_level: Level,
    format: String,
    output: Option<Arc<dyn Output>>,
    overrides: Vec<(String, Level)>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_level: Level::DEFAULT,
            format: String::new(),
            output: None,
            overrides: Vec::new(),
        }
    }

    /// Process default for modules without an override.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Format specification; empty means the default format.
    #[must_use]
    pub fn format(mut self, spec: impl Into<String>) -> Self {
        self.format = spec.into();
        self
    }

    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.output = Some(Arc::new(output));
        self
    }

    /// For destinations already shared elsewhere.
    #[must_use]
    pub fn shared_output(mut self, output: Arc<dyn Output>) -> Self {
        self.output = Some(output);
        self
    }

    /// Pre-configures one module before any logger for it exists.
    #[must_use]
    pub fn module_level(mut self, module: impl Into<String>, level: Level) -> Self {
        self.overrides.push((module.into(), level));
        self
    }

    /// # Errors
    /// [`Error::InvalidFormat`] when the format does not compile.
    pub fn build(self) -> Result<Registry, Error> {
        let formatter = Formatter::parse(&self.format)?;
        let output = self
            .output
            .unwrap_or_else(|| Arc::new(TerminalOutput::default()));

        let backend = Backend::new(formatter, output, self.default_level);
        for (module, level) in &self.overrides {
            backend.set_level(*level, Target::from(module.as_str()));
        }

        Ok(Registry::with_backend(backend))
    }
}
