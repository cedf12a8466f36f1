//! The module registry: every module that has been handed a logger, the level the
//! registry last recorded for it, and the operations that change those levels at
//! runtime.
//!
//! One `RwLock` guards the module map. Every mutation (registration, single-module
//! set, pattern update, reset) holds the write lock for its whole duration, and the
//! backend is updated while that lock is held so the recorded copy and the
//! backend's table never diverge. Log emission never touches this lock.

mod builder;

pub use builder::RegistryBuilder;

use crate::backend::{Backend, Target};
use crate::config::Config;
use crate::error::Error;
use crate::fmt::Formatter;
use crate::level::Level;
use crate::logger::Logger;
use crate::output::{Output, TerminalOutput};
use regex::Regex;
use std::collections::BTreeMap;
use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Module name the registry uses for its own diagnostics. It is never registered.
pub const INTERNAL_MODULE: &str = "logging";

#[derive(Debug)]
struct Shared {
    backend: Arc<Backend>,
    modules: RwLock<BTreeMap<String, Level>>,
}

/// Handle to one registry. Clones share the same state.
#[derive(Debug, Clone)]
pub struct Registry {
    shared: Arc<Shared>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Default format on standard error at [`Level::DEFAULT`], with no modules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(Backend::default())
    }

    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Builds a registry from a loaded configuration.
    ///
    /// # Errors
    /// See [`Registry::apply_config`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let registry = Self::new();
        registry.apply_config(config)?;
        Ok(registry)
    }

    pub(crate) fn with_backend(backend: Backend) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend: Arc::new(backend),
                modules: RwLock::new(BTreeMap::new()),
            }),
        }
    }

    fn modules(&self) -> RwLockReadGuard<'_, BTreeMap<String, Level>> {
        self.shared
            .modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn modules_mut(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Level>> {
        self.shared
            .modules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn backend(&self) -> &Backend {
        &self.shared.backend
    }

    /// Diagnostics go through the registry's own backend under [`INTERNAL_MODULE`].
    #[track_caller]
    fn note(&self, level: Level, msg: &str) {
        let _ = self
            .backend()
            .emit(level, INTERNAL_MODULE, msg, Location::caller(), None);
    }

    /// Hands out a logger for `module`, registering the module on first use with
    /// whatever level the backend currently resolves for it.
    ///
    /// Every call returns a fresh handle; the registry keeps one entry per name.
    ///
    /// # Errors
    /// [`Error::EmptyModuleName`] for an empty name, and
    /// [`Error::ReservedModuleName`] for `all`, which level updates treat as
    /// "every module".
    pub fn logger(&self, module: &str) -> Result<Logger, Error> {
        if module.is_empty() {
            return Err(Error::EmptyModuleName);
        }
        if matches!(Target::from(module), Target::All) {
            return Err(Error::ReservedModuleName(module.to_string()));
        }

        let known = self.modules().contains_key(module);
        if !known {
            let mut modules = self.modules_mut();
            if !modules.contains_key(module) {
                let level = self.backend().level_of(module);
                modules.insert(module.to_string(), level);
            }
        }

        Ok(Logger::new(module, Arc::clone(&self.shared.backend)))
    }

    /// Level currently in effect for `module`: its override, or the default.
    /// Works for modules that were never registered.
    #[must_use]
    pub fn module_level(&self, module: &str) -> Level {
        self.backend().level_of(module)
    }

    /// The process default currently installed in the backend.
    #[must_use]
    pub fn default_level(&self) -> Level {
        self.backend().default_level()
    }

    /// Level the registry recorded for a registered module.
    #[must_use]
    pub fn recorded_level(&self, module: &str) -> Option<Level> {
        self.modules().get(module).copied()
    }

    #[must_use]
    pub fn is_registered(&self, module: &str) -> bool {
        self.modules().contains_key(module)
    }

    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules().len()
    }

    /// Sorted snapshot of every registered module and its recorded level.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, Level)> {
        self.modules()
            .iter()
            .map(|(name, level)| (name.clone(), *level))
            .collect()
    }

    fn parse_level(&self, text: &str) -> Result<Level, Error> {
        text.parse().map_err(|_| {
            self.note(
                Level::Warning,
                &format!("Invalid logging level '{text}' - ignored"),
            );
            Error::InvalidLevel {
                input: text.to_string(),
                fallback: self.default_level(),
            }
        })
    }

    fn compile_pattern(&self, pattern: &str) -> Result<Regex, Error> {
        Regex::new(pattern).map_err(|source| {
            self.note(
                Level::Warning,
                &format!("Invalid regular expression: {pattern}"),
            );
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })
    }

    /// Sets the level of one literal module name, or of everything when `target`
    /// is empty or `all`. The module does not have to be registered yet.
    ///
    /// Returns the level that was applied.
    ///
    /// # Errors
    /// [`Error::InvalidLevel`] when `level` does not parse; nothing changes.
    pub fn set_level(&self, target: &str, level: &str) -> Result<Level, Error> {
        let level = self.parse_level(level)?;
        self.set_level_to(target, level);
        Ok(level)
    }

    /// Typed form of [`Registry::set_level`].
    pub fn set_level_to(&self, target: &str, level: Level) {
        let target = Target::from(target);
        {
            let mut modules = self.modules_mut();
            self.backend().set_level(level, target);
            match target {
                Target::All => modules.values_mut().for_each(|recorded| *recorded = level),
                Target::Module(name) => {
                    if let Some(recorded) = modules.get_mut(name) {
                        *recorded = level;
                    }
                }
            }
        }
        self.note(
            Level::Debug,
            &format!("Module '{target}' logger enabled for log level '{level}'"),
        );
    }

    /// Sets `level` on every registered module whose name matches the regular
    /// expression `pattern`, in one pass under the write lock.
    ///
    /// Modules registered afterwards are not affected, even if they match.
    /// Returns the level that was applied.
    ///
    /// # Errors
    /// [`Error::InvalidLevel`] or [`Error::InvalidPattern`]; nothing changes.
    pub fn set_module_level(&self, pattern: &str, level: &str) -> Result<Level, Error> {
        let level = self.parse_level(level)?;
        let regex = self.compile_pattern(pattern)?;
        self.apply_pattern(&regex, level);
        Ok(level)
    }

    /// Typed form of [`Registry::set_module_level`]. Returns the names that changed.
    pub fn apply_pattern(&self, regex: &Regex, level: Level) -> Vec<String> {
        let mut changed = Vec::new();
        {
            let mut modules = self.modules_mut();
            for (name, recorded) in modules.iter_mut() {
                if regex.is_match(name) {
                    self.backend().set_level(level, Target::Module(name));
                    *recorded = level;
                    changed.push(name.clone());
                }
            }
        }

        for name in &changed {
            self.note(
                Level::Debug,
                &format!("Module '{name}' logger enabled for log level '{level}'"),
            );
        }
        changed
    }

    /// Compiles and installs a new format. An empty specification restores the default.
    ///
    /// # Errors
    /// [`Error::InvalidFormat`]; the previous formatter stays installed.
    pub fn set_format(&self, spec: &str) -> Result<(), Error> {
        let formatter = Formatter::parse(spec)?;
        self.backend().set_formatter(formatter);
        Ok(())
    }

    /// Source of the installed format specification.
    #[must_use]
    pub fn format(&self) -> String {
        self.backend().format()
    }

    /// Swaps the destination, keeping format and levels.
    pub fn set_output(&self, output: Arc<dyn Output>) {
        self.backend().set_output(output);
    }

    /// Installs formatter, destination and default level together. Every
    /// override is dropped, so every registered module now records `default`.
    pub fn configure(&self, formatter: Formatter, output: Arc<dyn Output>, default: Level) {
        let mut modules = self.modules_mut();
        self.backend().configure(formatter, output, default);
        modules.values_mut().for_each(|recorded| *recorded = default);
    }

    /// Back to bootstrap state: default format on standard error at
    /// [`Level::DEFAULT`], no overrides and no registered modules.
    pub fn reset(&self) {
        let mut modules = self.modules_mut();
        self.backend().configure(
            Formatter::default(),
            Arc::new(TerminalOutput::default()),
            Level::DEFAULT,
        );
        modules.clear();
    }

    /// Applies a configuration file: default level, format, destination, then
    /// literal module overrides, then pattern rules against registered modules.
    ///
    /// Everything is validated before anything changes.
    ///
    /// # Errors
    /// [`Error::InvalidLevel`], [`Error::InvalidPattern`], [`Error::InvalidFormat`],
    /// or [`Error::Io`] when the destination can't be opened.
    pub fn apply_config(&self, config: &Config) -> Result<(), Error> {
        let default = self.parse_level(&config.general.level)?;
        let formatter = Formatter::parse(&config.general.format)?;

        let mut overrides = Vec::with_capacity(config.modules.len());
        for (module, level) in &config.modules {
            overrides.push((module.as_str(), self.parse_level(level)?));
        }

        let mut rules = Vec::with_capacity(config.patterns.len());
        for rule in &config.patterns {
            rules.push((
                self.compile_pattern(&rule.pattern)?,
                self.parse_level(&rule.level)?,
            ));
        }

        let output = config.destination().open(config.general.colors)?;

        self.configure(formatter, output, default);
        for (module, level) in overrides {
            self.set_level_to(module, level);
        }
        for (regex, level) in &rules {
            self.apply_pattern(regex, *level);
        }

        self.note(
            Level::Debug,
            &format!(
                "Configuration applied: default={default}, {} module override(s), {} pattern rule(s)",
                config.modules.len(),
                config.patterns.len()
            ),
        );
        Ok(())
    }

    /// # Errors
    /// I/O errors from the destination.
    pub fn flush(&self) -> Result<(), Error> {
        self.backend().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryOutput;

    fn quiet() -> (Registry, MemoryOutput) {
        let output = MemoryOutput::new();
        let registry = Registry::builder()
            .format("%{level} %{module} %{message}")
            .output(output.clone())
            .build()
            .unwrap();
        (registry, output)
    }

    #[test]
    fn single_set_updates_recorded_copy_of_registered_module() {
        let (registry, _) = quiet();
        registry.logger("db").unwrap();
        registry.set_level("db", "error").unwrap();
        assert_eq!(registry.recorded_level("db"), Some(Level::Error));
    }

    #[test]
    fn single_set_does_not_register() {
        let (registry, _) = quiet();
        registry.set_level("later", "debug").unwrap();
        assert!(!registry.is_registered("later"));
        assert_eq!(registry.logger("later").unwrap().level(), Level::Debug);
        assert_eq!(registry.recorded_level("later"), Some(Level::Debug));
    }

    #[test]
    fn all_target_updates_every_recorded_level() {
        let (registry, _) = quiet();
        registry.logger("a").unwrap();
        registry.logger("b").unwrap();
        registry.set_level("db", "error").unwrap();
        registry.set_level("all", "critical").unwrap();
        assert_eq!(registry.default_level(), Level::Critical);
        assert_eq!(registry.module_level("db"), Level::Critical);
        assert!(
            registry
                .snapshot()
                .iter()
                .all(|(_, level)| *level == Level::Critical)
        );
    }

    #[test]
    fn invalid_level_warns_through_internal_module() {
        let (registry, output) = quiet();
        let err = registry.set_module_level(".*", "loud").unwrap_err();
        assert_eq!(err.fallback_level(), Some(Level::Info));
        assert_eq!(
            output.lines(),
            vec!["WARNING logging Invalid logging level 'loud' - ignored".to_string()]
        );
    }

    #[test]
    fn configure_resets_recorded_levels() {
        let (registry, output) = quiet();
        registry.logger("net").unwrap();
        registry.set_level("net", "debug").unwrap();
        registry.configure(Formatter::default(), Arc::new(output), Level::Error);
        assert_eq!(registry.recorded_level("net"), Some(Level::Error));
        assert_eq!(registry.module_level("net"), Level::Error);
    }
}
