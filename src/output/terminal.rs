//! Console output on stdout.

use super::{Channel, Output};
use crate::record::LogRecord;
use std::io::{self, Write};

/// Writes the same line layout as the file output, one record per line.
#[derive(Debug, Clone, Copy)]
pub struct TerminalOutput {
    timestamps: bool,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    #[must_use]
    pub const fn new() -> Self {
        Self { timestamps: true }
    }

    /// Interactive sessions often don't need the timestamp and level prefix.
    #[must_use]
    pub const fn timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    fn format_record(&self, record: &LogRecord) -> String {
        if self.timestamps {
            record.line()
        } else {
            record.body()
        }
    }
}

impl Output for TerminalOutput {
    fn emit(&self, record: &LogRecord) -> Result<(), crate::Error> {
        if Channel::for_severity(record.severity) == Channel::Silent {
            return Ok(());
        }
        let mut line = self.format_record(record);
        line.push('\n');
        let mut stdout = io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        io::stdout().flush()?;
        Ok(())
    }
}
