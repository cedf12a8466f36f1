//! Append-only file destination. Rotation is left to external tools.

use super::Output;
use crate::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Appends lines to a single file, creating it and its parent directories on open.
#[derive(Debug)]
pub struct FileOutput {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileOutput {
    /// Opens `path` for appending. A leading `~` expands to the home directory.
    ///
    /// # Errors
    /// [`Error::Io`] when the directory or file cannot be created.
    pub fn open(path: impl AsRef<str>) -> Result<Self, Error> {
        let expanded = shellexpand::tilde(path.as_ref());
        let path = PathBuf::from(expanded.as_ref());

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Output for FileOutput {
    fn write_line(&self, line: &str) -> Result<(), Error> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()?;
        Ok(())
    }
}

impl Drop for FileOutput {
    fn drop(&mut self) {
        let _ = self
            .writer
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
    }
}
