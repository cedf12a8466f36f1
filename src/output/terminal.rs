//! Standard error is the bootstrap destination; standard output is available for
//! tools that pipe their logs.

use super::Output;
use crate::error::Error;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Writes each line to one of the process's standard streams.
#[derive(Debug, Clone)]
pub struct TerminalOutput {
    stream: Stream,
    /// Piped output and CI logs can't render ANSI escape codes.
    colors_enabled: bool,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new(Stream::Stderr)
    }
}

impl TerminalOutput {
    #[must_use]
    pub const fn new(stream: Stream) -> Self {
        Self {
            stream,
            colors_enabled: true,
        }
    }

    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn stream(&self) -> Stream {
        self.stream
    }
}

impl Output for TerminalOutput {
    fn write_line(&self, line: &str) -> Result<(), Error> {
        // Locking keeps concurrent lines from interleaving mid-line.
        match self.stream {
            Stream::Stderr => writeln!(io::stderr().lock(), "{line}")?,
            Stream::Stdout => writeln!(io::stdout().lock(), "{line}")?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        match self.stream {
            Stream::Stderr => io::stderr().flush()?,
            Stream::Stdout => io::stdout().flush()?,
        }
        Ok(())
    }

    fn supports_color(&self) -> bool {
        self.colors_enabled
    }
}
