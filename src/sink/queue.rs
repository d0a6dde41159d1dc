//! Deferred records waiting for a dump trigger.

use crate::record::LogRecord;
use std::collections::VecDeque;

/// Default capacity: enough context for a few seconds of per-poll debug output.
pub const DEFAULT_QUEUE_CAPACITY: usize = 500;

/// FIFO with oldest-first eviction once `capacity` is reached. Capacity `0` is unbounded.
#[derive(Debug, Clone)]
pub struct DeferredQueue {
    records: VecDeque<LogRecord>,
    capacity: usize,
    evicted: u64,
}

impl Default for DeferredQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl DeferredQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
            evicted: 0,
        }
    }

    /// Appends `record`, returning the record evicted to make room, if any.
    pub fn push(&mut self, record: LogRecord) -> Option<LogRecord> {
        let evicted = if self.capacity > 0 && self.records.len() >= self.capacity {
            self.evicted += 1;
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Hands records to `emit` front to back, removing each only after `emit` accepted it.
    ///
    /// On the first failure the failing record and everything behind it stay queued.
    ///
    /// # Errors
    /// Whatever `emit` returned for the record that could not be written.
    pub fn drain_with<E>(
        &mut self,
        mut emit: impl FnMut(&LogRecord) -> Result<(), E>,
    ) -> Result<usize, E> {
        let mut written = 0;
        while let Some(front) = self.records.front() {
            emit(front)?;
            self.records.pop_front();
            written += 1;
        }
        Ok(written)
    }

    /// Drops everything without writing it. Returns how many records were discarded.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records lost to eviction since construction.
    #[must_use]
    pub const fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }
}
