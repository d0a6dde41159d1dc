//! Log file output.

use crate::fmt::format_timestamp;
use crate::internal;
use crate::record::LogRecord;

use super::Output;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends one line per record to the target file.
///
/// The file is opened for every write, so deleting or moving it from outside
/// never leaves the sink holding a stale handle.
#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    /// Prepares `path` for logging and writes the session header.
    ///
    /// With `append == false` any existing content is discarded first.
    ///
    /// # Errors
    /// Returns the I/O error if the parent directory or the file cannot be created.
    pub fn create(path: impl Into<PathBuf>, append: bool) -> Result<Self, crate::Error> {
        let output = Self { path: path.into() };
        output.ensure_parent()?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&output.path)?;
        writeln!(
            file,
            "\nLogging started {}\n",
            format_timestamp(&Local::now())
        )?;

        internal::debug(
            "FILE",
            &format!(
                "Opened {} ({})",
                output.path.display(),
                if append { "append" } else { "truncate" }
            ),
        );
        Ok(output)
    }

    /// Wraps `path` without touching the filesystem.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Points later writes at `target`. Nothing already written is moved.
    pub fn set_path(&mut self, target: impl Into<PathBuf>) {
        let target = target.into();
        internal::debug(
            "FILE",
            &format!("Retarget {} -> {}", self.path.display(), target.display()),
        );
        self.path = target;
    }

    fn ensure_parent(&self) -> Result<(), crate::Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            match fs::create_dir_all(parent) {
                Ok(()) => {
                    internal::debug("FILE", &format!("Created directory: {}", parent.display()));
                }
                Err(e) => {
                    internal::error(
                        "FILE",
                        &format!("Failed to create directory {}: {}", parent.display(), e),
                    );
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }
}

impl Output for FileOutput {
    fn emit(&self, record: &LogRecord) -> Result<(), crate::Error> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Single write so concurrent processes appending to the same file don't interleave mid-line.
        let mut line = record.line();
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
