//! `modlog` - per-module log levels that operators can change at runtime.
//!
//! Applications ask a [`Registry`] for a [`Logger`] per logical module. Each
//! module has its own severity threshold, and thresholds can be changed for one
//! module, for all modules, or for every known module matching a regular
//! expression, while logging continues on other threads. Handles never cache a
//! level, so changes apply to handles that were issued earlier.
//!
//! # Example
//!
//! ```
//! use modlog::{Level, Registry, output::MemoryOutput};
//!
//! let lines = MemoryOutput::new();
//! let registry = Registry::builder()
//!     .format("%{level} [%{module}] %{message}")
//!     .output(lines.clone())
//!     .build()
//!     .unwrap();
//!
//! let server = registry.logger("net.server").unwrap();
//! server.debug("dropped: default is INFO");
//! assert_eq!(registry.module_level("net.server"), Level::Info);
//!
//! registry.set_module_level(r"net\..*", "debug").unwrap();
//! server.debug("now visible");
//! assert_eq!(lines.lines(), vec!["DEBUG [net.server] now visible".to_string()]);
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `modlog` binary with an interactive operator shell

pub mod backend;
pub mod config;
pub mod error;
pub mod fmt;
pub mod global;
pub mod level;
pub mod logger;
pub mod output;
pub mod registry;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub mod shell;

pub use backend::{Backend, Target};
pub use config::Config;
pub use error::Error;
pub use fmt::{DEFAULT_FORMAT, Formatter};
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use output::{Destination, FileOutput, MemoryOutput, Output, TerminalOutput};
pub use registry::{INTERNAL_MODULE, Registry, RegistryBuilder};
