//! The backend decides emit-or-drop for every record and owns the formatter and
//! destination. Per-module thresholds are optional overrides layered over one
//! process default.
//!
//! Lock order is always levels before sink. Neither lock is held while the
//! other is being acquired for writing except in [`Backend::configure`], which
//! takes both in that order.

use crate::error::Error;
use crate::fmt::Formatter;
use crate::level::Level;
use crate::output::{Output, Record, TerminalOutput};
use chrono::Local;
use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// What a level change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The process default, written through to every existing override.
    All,
    /// Exactly one module, registered or not.
    Module(&'a str),
}

impl<'a> From<&'a str> for Target<'a> {
    /// An empty name or `all` addresses every module.
    fn from(name: &'a str) -> Self {
        match name {
            "" | "all" => Self::All,
            module => Self::Module(module),
        }
    }
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Module(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Default)]
struct LevelTable {
    default: Level,
    overrides: HashMap<String, Level>,
}

impl LevelTable {
    fn level_of(&self, module: &str) -> Level {
        self.overrides.get(module).copied().unwrap_or(self.default)
    }
}

struct Sink {
    formatter: Formatter,
    output: Arc<dyn Output>,
}

/// Severity-ordered sink shared by every logger handle of one registry.
pub struct Backend {
    levels: RwLock<LevelTable>,
    sink: RwLock<Sink>,
    sequence: AtomicU64,
}

impl Default for Backend {
    /// Default format on standard error at the default level.
    fn default() -> Self {
        Self::new(
            Formatter::default(),
            Arc::new(TerminalOutput::default()),
            Level::DEFAULT,
        )
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("default", &self.default_level())
            .field("format", &self.format())
            .finish_non_exhaustive()
    }
}

impl Backend {
    #[must_use]
    pub fn new(formatter: Formatter, output: Arc<dyn Output>, default: Level) -> Self {
        Self {
            levels: RwLock::new(LevelTable {
                default,
                overrides: HashMap::new(),
            }),
            sink: RwLock::new(Sink { formatter, output }),
            sequence: AtomicU64::new(0),
        }
    }

    fn levels(&self) -> RwLockReadGuard<'_, LevelTable> {
        self.levels.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn levels_mut(&self) -> RwLockWriteGuard<'_, LevelTable> {
        self.levels.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn sink(&self) -> RwLockReadGuard<'_, Sink> {
        self.sink.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn sink_mut(&self) -> RwLockWriteGuard<'_, Sink> {
        self.sink.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces formatter, destination and default level in one step and drops
    /// every per-module override.
    pub fn configure(&self, formatter: Formatter, output: Arc<dyn Output>, default: Level) {
        let mut levels = self.levels_mut();
        let mut sink = self.sink_mut();
        levels.default = default;
        levels.overrides.clear();
        sink.formatter = formatter;
        sink.output = output;
    }

    pub fn set_formatter(&self, formatter: Formatter) {
        self.sink_mut().formatter = formatter;
    }

    pub fn set_output(&self, output: Arc<dyn Output>) {
        self.sink_mut().output = output;
    }

    /// Source text of the installed format specification.
    #[must_use]
    pub fn format(&self) -> String {
        self.sink().formatter.source().to_string()
    }

    /// The module's override if one was set, otherwise the process default.
    #[must_use]
    pub fn level_of(&self, module: &str) -> Level {
        self.levels().level_of(module)
    }

    #[must_use]
    pub fn default_level(&self) -> Level {
        self.levels().default
    }

    /// Whether `module` carries its own override.
    #[must_use]
    pub fn has_override(&self, module: &str) -> bool {
        self.levels().overrides.contains_key(module)
    }

    pub fn set_level(&self, level: Level, target: Target<'_>) {
        let mut levels = self.levels_mut();
        match target {
            Target::All => {
                levels.default = level;
                for value in levels.overrides.values_mut() {
                    *value = level;
                }
            }
            Target::Module(module) => {
                levels.overrides.insert(module.to_string(), level);
            }
        }
    }

    #[must_use]
    pub fn is_enabled_for(&self, level: Level, module: &str) -> bool {
        level >= self.level_of(module)
    }

    /// Renders and writes a record if `level` passes the module's threshold.
    ///
    /// Returns whether the record was written.
    ///
    /// # Errors
    /// I/O errors from the destination.
    pub fn emit(
        &self,
        level: Level,
        module: &str,
        message: &str,
        location: &'static Location<'static>,
        function: Option<&'static str>,
    ) -> Result<bool, Error> {
        if !self.is_enabled_for(level, module) {
            return Ok(false);
        }

        let record = Record {
            id: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
            time: Local::now(),
            level,
            module,
            message,
            location,
            function,
        };

        let sink = self.sink();
        let line = sink.formatter.render(&record, sink.output.supports_color());
        sink.output.write_line(&line)?;
        Ok(true)
    }

    /// # Errors
    /// I/O errors from the destination.
    pub fn flush(&self) -> Result<(), Error> {
        self.sink().output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryOutput;

    fn backend_with(output: &MemoryOutput) -> Backend {
        let formatter = Formatter::parse("%{level} %{module} %{message}").unwrap();
        Backend::new(formatter, Arc::new(output.clone()), Level::Info)
    }

    #[test]
    fn override_shadows_default() {
        let backend = Backend::default();
        backend.set_level(Level::Error, Target::Module("db"));
        assert_eq!(backend.level_of("db"), Level::Error);
        assert_eq!(backend.level_of("net"), Level::Info);
    }

    #[test]
    fn all_target_writes_through_overrides() {
        let backend = Backend::default();
        backend.set_level(Level::Error, Target::Module("db"));
        backend.set_level(Level::Debug, Target::All);
        assert_eq!(backend.level_of("db"), Level::Debug);
        assert_eq!(backend.default_level(), Level::Debug);
    }

    #[test]
    fn emit_drops_below_threshold() {
        let output = MemoryOutput::new();
        let backend = backend_with(&output);

        let here = Location::caller();
        assert!(!backend.emit(Level::Debug, "net", "hidden", here, None).unwrap());
        assert!(backend.emit(Level::Warning, "net", "shown", here, None).unwrap());
        assert_eq!(output.lines(), vec!["WARNING net shown".to_string()]);
    }

    #[test]
    fn ids_increase_per_written_record() {
        let output = MemoryOutput::new();
        let backend = backend_with(&output);
        backend.set_formatter(Formatter::parse("%{id}").unwrap());

        let here = Location::caller();
        backend.emit(Level::Info, "a", "", here, None).unwrap();
        backend.emit(Level::Debug, "a", "", here, None).unwrap();
        backend.emit(Level::Info, "a", "", here, None).unwrap();
        assert_eq!(output.lines(), vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn configure_clears_overrides() {
        let output = MemoryOutput::new();
        let backend = backend_with(&output);
        backend.set_level(Level::Debug, Target::Module("net"));
        backend.configure(Formatter::default(), Arc::new(output), Level::Warning);
        assert!(!backend.has_override("net"));
        assert_eq!(backend.level_of("net"), Level::Warning);
    }

    #[test]
    fn target_from_text() {
        assert_eq!(Target::from(""), Target::All);
        assert_eq!(Target::from("all"), Target::All);
        assert_eq!(Target::from("net"), Target::Module("net"));
    }
}
