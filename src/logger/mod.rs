//! Logger handles are what application code holds on to. A handle knows only its
//! module name and the backend; it asks the backend for the module's threshold on
//! every call, so level changes reach handles issued long before.

mod macros;

use crate::backend::Backend;
use crate::level::Level;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct Logger {
    module: Arc<str>,
    backend: Arc<Backend>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub(crate) fn new(module: &str, backend: Arc<Backend>) -> Self {
        Self {
            module: Arc::from(module),
            backend,
        }
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Threshold currently in effect for this handle's module.
    #[must_use]
    pub fn level(&self) -> Level {
        self.backend.level_of(&self.module)
    }

    /// Lets callers skip building expensive messages that would be dropped.
    #[must_use]
    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.backend.is_enabled_for(level, &self.module)
    }

    /// Emits `msg` if `level` passes the module's threshold. Output errors are
    /// swallowed; logging never fails the caller.
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str) {
        let _ = self
            .backend
            .emit(level, &self.module, msg, Location::caller(), None);
    }

    /// Like [`Logger::log`] but records the calling function for `%{shortfunc}`.
    /// The logging macros call this.
    #[doc(hidden)]
    #[track_caller]
    pub fn log_from(&self, level: Level, msg: &str, function: &'static str) {
        let _ = self
            .backend
            .emit(level, &self.module, msg, Location::caller(), Some(function));
    }

    #[track_caller]
    pub fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }

    #[track_caller]
    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    #[track_caller]
    pub fn notice(&self, msg: &str) {
        self.log(Level::Notice, msg);
    }

    #[track_caller]
    pub fn warning(&self, msg: &str) {
        self.log(Level::Warning, msg);
    }

    #[track_caller]
    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    #[track_caller]
    pub fn critical(&self, msg: &str) {
        self.log(Level::Critical, msg);
    }
}

/// Strips the helper item and closure frames from a `type_name` path so only the
/// enclosing function remains.
#[doc(hidden)]
#[must_use]
pub fn trim_function_name(raw: &'static str) -> &'static str {
    let mut name = raw.strip_suffix("::__f").unwrap_or(raw);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_helper_suffix() {
        assert_eq!(trim_function_name("app::net::serve::__f"), "app::net::serve");
    }

    #[test]
    fn trims_closure_frames() {
        assert_eq!(
            trim_function_name("app::run::{{closure}}::{{closure}}::__f"),
            "app::run"
        );
    }

    #[test]
    fn function_name_macro_names_enclosing_fn() {
        let name = crate::function_name!();
        assert!(name.ends_with("function_name_macro_names_enclosing_fn"));
    }
}
