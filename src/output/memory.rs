//! In-memory output for embedding hosts that render logs themselves, and for tests.

use super::Output;
use crate::record::LogRecord;
use std::sync::{Arc, Mutex, PoisonError};

/// Cloning shares the buffer, so one clone can go into the sink while the host keeps another.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Message texts only, handy for asserting on order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|r| r.text.clone())
            .collect()
    }

    /// Fully rendered lines, as a file output would write them.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(LogRecord::line)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the buffer and returns what it held.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Output for MemoryOutput {
    fn emit(&self, record: &LogRecord) -> Result<(), crate::Error> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
