//! Destinations for rendered log lines.
//!
//! The backend renders a record once and hands the finished line to exactly one
//! `Output`. Built-ins cover the terminal streams, append-only files and an
//! in-memory capture; anything else can implement the trait.

mod file;
mod memory;
mod terminal;

pub use file::FileOutput;
pub use memory::MemoryOutput;
pub use terminal::{Stream, TerminalOutput};

use crate::error::Error;
use crate::level::Level;
use chrono::{DateTime, Local};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Everything a formatter can substitute into one line.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Sequence number assigned by the backend when the record passes the level check.
    pub id: u64,
    pub time: DateTime<Local>,
    pub level: Level,
    pub module: &'a str,
    pub message: &'a str,
    pub location: &'static Location<'static>,
    /// Fully qualified function path, when the call site recorded one.
    pub function: Option<&'static str>,
}

/// `Send + Sync` so one destination can be shared by every logger handle in the process.
pub trait Output: Send + Sync {
    /// Writes one already-formatted line; the output adds the line terminator.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn write_line(&self, line: &str) -> Result<(), Error>;

    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), Error>;

    /// Whether `%{color}` placeholders should produce ANSI escapes.
    fn supports_color(&self) -> bool {
        false
    }
}

/// Where a configuration wants lines to go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Stderr,
    Stdout,
    File(String),
}

impl Destination {
    /// Opens the destination.
    ///
    /// # Errors
    /// [`Error::Io`] when a file destination cannot be created or opened.
    pub fn open(&self, colors: bool) -> Result<Arc<dyn Output>, Error> {
        Ok(match self {
            Self::Stderr => Arc::new(TerminalOutput::new(Stream::Stderr).colors(colors)),
            Self::Stdout => Arc::new(TerminalOutput::new(Stream::Stdout).colors(colors)),
            Self::File(path) => Arc::new(FileOutput::open(path)?),
        })
    }
}

/// `stderr` and `stdout` name the streams; any other text is a file path.
impl From<&str> for Destination {
    fn from(s: &str) -> Self {
        match s.trim() {
            "" | "stderr" => Self::Stderr,
            "stdout" => Self::Stdout,
            path => Self::File(path.to_string()),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => f.write_str(path),
        }
    }
}
