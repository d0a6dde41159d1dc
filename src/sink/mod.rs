//! The routing core: three thresholds, a deferred queue, and the dump trigger.
//!
//! Every record is checked against one snapshot of the thresholds:
//!
//! 1. `severity <= save` is written immediately.
//! 2. otherwise `severity <= queue` is held back in the deferred queue.
//! 3. `severity <= dump_trigger` flushes the queue, oldest first, before the
//!    triggering record is written, so the output reads in arrival order.
//! 4. anything else is dropped.
//!
//! Verbose context therefore costs nothing on disk until something bad happens,
//! and then shows up right before the record that explains it.

mod builder;
mod from_config;
mod queue;

pub use builder::SinkBuilder;
pub use queue::{DEFAULT_QUEUE_CAPACITY, DeferredQueue};

use crate::fmt::NO_NODE;
use crate::internal;
use crate::level::Severity;
use crate::output::{FileOutput, Output};
use crate::record::LogRecord;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// First line of a non-empty dump.
pub const DUMP_BEGIN: &str = "Dumping queued log messages";
/// Last line of a non-empty dump.
pub const DUMP_END: &str = "End of queued log message dump";

/// The three levels that drive routing. Always read and replaced as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Thresholds {
    /// Highest severity written immediately.
    pub save: Severity,
    /// Highest severity held in the deferred queue.
    pub queue: Severity,
    /// Highest severity that flushes the deferred queue.
    pub dump_trigger: Severity,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(Severity::Detail, Severity::Debug, Severity::Warning)
    }
}

impl Thresholds {
    #[must_use]
    pub const fn new(save: Severity, queue: Severity, dump_trigger: Severity) -> Self {
        Self {
            save,
            queue,
            dump_trigger,
        }
    }

    /// What should happen to a record of `severity` under these thresholds.
    ///
    /// `None` records never trigger a dump: they mark "no level", not an event.
    #[must_use]
    pub fn route(self, severity: Severity) -> Route {
        let save = severity <= self.save;
        Route {
            save,
            queue: !save && severity <= self.queue,
            dump: severity != Severity::None && severity <= self.dump_trigger,
        }
    }
}

/// Outcome of [`Thresholds::route`]. `save` and `queue` are never both set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Route {
    pub save: bool,
    pub queue: bool,
    pub dump: bool,
}

impl Route {
    /// Nothing to write, queue, or flush.
    #[must_use]
    pub const fn is_dropped(self) -> bool {
        !self.save && !self.queue && !self.dump
    }
}

/// What happens to still-queued records when the sink is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Teardown {
    /// Queued context is thrown away; a clean shutdown is not an event worth explaining.
    #[default]
    Discard,
    /// Queued context is dumped like a trigger would.
    Flush,
}

impl Teardown {
    /// Config spelling: `"discard"` or `"flush"`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "discard" | "clear" => Some(Self::Discard),
            "flush" | "dump" => Some(Self::Flush),
            _ => None,
        }
    }
}

/// Snapshot of the sink's mutable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    pub thresholds: Thresholds,
    /// Persistence destination. `None` when the sink has no file output.
    pub target: Option<PathBuf>,
    pub append: bool,
    pub console: bool,
}

/// The file output is kept apart from the rest so the target can be changed at runtime.
#[derive(Default)]
struct Outputs {
    file: Option<FileOutput>,
    others: Vec<Box<dyn Output>>,
}

impl Outputs {
    /// Offers `record` to every output, even after one has failed.
    fn deliver(&self, record: &LogRecord) -> Delivery {
        let mut delivery = Delivery::default();
        if let Some(file) = &self.file {
            delivery.record(file.emit(record));
        }
        for output in &self.others {
            delivery.record(output.emit(record));
        }
        delivery
    }

    /// Every output gets the record; the first error wins.
    fn emit(&self, record: &LogRecord) -> Result<(), crate::Error> {
        self.deliver(record).error.map_or(Ok(()), Err)
    }

    fn flush(&self) -> Result<(), crate::Error> {
        if let Some(file) = &self.file {
            file.flush()?;
        }
        for output in &self.others {
            output.flush()?;
        }
        Ok(())
    }

    fn len(&self) -> usize {
        usize::from(self.file.is_some()) + self.others.len()
    }
}

/// Outcome of offering one record to every output.
#[derive(Default)]
struct Delivery {
    accepted: usize,
    error: Option<crate::Error>,
}

impl Delivery {
    fn record(&mut self, result: Result<(), crate::Error>) {
        match result {
            Ok(()) => self.accepted += 1,
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
    }
}

struct SinkState {
    config: SinkConfig,
    queue: DeferredQueue,
    outputs: Outputs,
}

impl SinkState {
    fn route(&mut self, record: LogRecord) -> Result<(), crate::Error> {
        let route = self.config.thresholds.route(record.severity);

        let immediate = if route.save {
            Some(record)
        } else {
            if route.queue {
                self.queue.push(record);
            }
            None
        };

        let dumped = if route.dump {
            self.dump().map(|_| ())
        } else {
            Ok(())
        };
        let written = immediate.map_or(Ok(()), |r| self.outputs.emit(&r));
        dumped.and(written)
    }

    /// Writes the queue between banner lines.
    ///
    /// A record leaves the queue once at least one output accepted it. A record that no
    /// output accepted stops the dump and stays queued, with everything behind it.
    fn dump(&mut self) -> Result<usize, crate::Error> {
        if self.queue.is_empty() {
            return Ok(0);
        }

        let Self { queue, outputs, .. } = self;
        let mut partial: Option<crate::Error> = None;
        let mut offer = |record: &LogRecord| -> Result<(), crate::Error> {
            let delivery = outputs.deliver(record);
            match delivery.error {
                Some(e) if delivery.accepted == 0 => Err(e),
                Some(e) => {
                    partial.get_or_insert(e);
                    Ok(())
                }
                None => Ok(()),
            }
        };

        offer(&LogRecord::new(Severity::Internal, NO_NODE, DUMP_BEGIN))?;
        let written = queue.drain_with(&mut offer).inspect_err(|e| {
            internal::warn(
                "SINK",
                &format!("Dump stopped with {} records still queued: {e}", queue.len()),
            );
        })?;
        offer(&LogRecord::new(Severity::Internal, NO_NODE, DUMP_END))?;

        match partial {
            Some(e) => {
                internal::warn("SINK", &format!("Dump missed at least one output: {e}"));
                Err(e)
            }
            None => Ok(written),
        }
    }
}

/// Owns the thresholds, the deferred queue, and the outputs behind one lock.
///
/// Construct it once at startup and share it (`Arc<Sink>`) with every producer.
/// Dropping it applies the configured [`Teardown`] policy.
pub struct Sink {
    state: Mutex<SinkState>,
    teardown: Teardown,
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Sink")
            .field("config", &state.config)
            .field("queued", &state.queue.len())
            .field("outputs", &state.outputs.len())
            .field("teardown", &self.teardown)
            .finish()
    }
}

impl Sink {
    #[must_use]
    pub fn builder() -> SinkBuilder {
        SinkBuilder::new()
    }

    // A panic elsewhere while holding the lock must not take logging down with it.
    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Formats and routes one message. Use [`log_write!`](crate::log_write) for the
    /// `format!`-style call form.
    ///
    /// Records that would be dropped are not formatted at all.
    ///
    /// # Errors
    /// The first output error hit while writing the record or dumping the queue.
    pub fn write(
        &self,
        severity: Severity,
        node_id: u8,
        args: fmt::Arguments<'_>,
    ) -> Result<(), crate::Error> {
        if self.thresholds().route(severity).is_dropped() {
            return Ok(());
        }
        self.write_record(LogRecord::format(severity, node_id, args))
    }

    /// Routes an already formatted record.
    ///
    /// # Errors
    /// The first output error hit while writing the record or dumping the queue.
    pub fn write_record(&self, record: LogRecord) -> Result<(), crate::Error> {
        self.lock().route(record)
    }

    /// Replaces all three thresholds at once. Already queued records stay queued.
    pub fn set_thresholds(&self, thresholds: Thresholds) {
        let mut state = self.lock();
        internal::debug(
            "SINK",
            &format!(
                "Thresholds save={} queue={} dump={}",
                thresholds.save, thresholds.queue, thresholds.dump_trigger
            ),
        );
        state.config.thresholds = thresholds;
    }

    /// Positional form of [`set_thresholds`](Self::set_thresholds).
    pub fn set_logging_state(&self, save: Severity, queue: Severity, dump_trigger: Severity) {
        self.set_thresholds(Thresholds::new(save, queue, dump_trigger));
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.lock().config.thresholds
    }

    /// Sends later immediate writes and dumps to `target`.
    ///
    /// A sink built without a file gains one here; the file is appended to, never truncated.
    pub fn set_target(&self, target: impl AsRef<Path>) {
        let target = target.as_ref();
        let mut state = self.lock();
        match &mut state.outputs.file {
            Some(file) => file.set_path(target),
            None => state.outputs.file = Some(FileOutput::new(target)),
        }
        state.config.target = Some(target.to_path_buf());
    }

    /// Alias of [`set_target`](Self::set_target).
    pub fn set_log_file_name(&self, name: impl AsRef<Path>) {
        self.set_target(name);
    }

    /// Writes out and empties the deferred queue without a trigger record.
    ///
    /// Returns how many queued records were written.
    ///
    /// # Errors
    /// On an output error the unwritten records remain queued, in order.
    pub fn flush_queue(&self) -> Result<usize, crate::Error> {
        self.lock().dump()
    }

    /// Alias of [`flush_queue`](Self::flush_queue).
    ///
    /// # Errors
    /// See [`flush_queue`](Self::flush_queue).
    pub fn queue_dump(&self) -> Result<usize, crate::Error> {
        self.flush_queue()
    }

    /// Discards queued records without writing them. Returns how many were dropped.
    pub fn clear_queue(&self) -> usize {
        let count = self.lock().queue.clear();
        if count > 0 {
            internal::debug("SINK", &format!("Cleared {count} queued records"));
        }
        count
    }

    /// Alias of [`clear_queue`](Self::clear_queue).
    pub fn queue_clear(&self) -> usize {
        self.clear_queue()
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.lock().queue.len()
    }

    /// Copy of the queued records, oldest first.
    #[must_use]
    pub fn queued(&self) -> Vec<LogRecord> {
        self.lock().queue.iter().cloned().collect()
    }

    /// Records lost to the queue capacity so far.
    #[must_use]
    pub fn evicted_count(&self) -> u64 {
        self.lock().queue.evicted()
    }

    #[must_use]
    pub fn config(&self) -> SinkConfig {
        self.lock().config.clone()
    }

    #[must_use]
    pub const fn teardown(&self) -> Teardown {
        self.teardown
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.lock().outputs.len()
    }

    /// Flushes every output. The deferred queue is left alone.
    ///
    /// # Errors
    /// Returns the first I/O error encountered across all outputs.
    pub fn flush(&self) -> Result<(), crate::Error> {
        self.lock().outputs.flush()
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);

        match self.teardown {
            Teardown::Discard => {
                let count = state.queue.clear();
                if count > 0 {
                    internal::debug(
                        "SINK",
                        &format!("Teardown discarded {count} queued records"),
                    );
                }
            }
            Teardown::Flush => {
                if let Err(e) = state.dump() {
                    internal::warn("SINK", &format!("Teardown dump failed: {e}"));
                }
            }
        }

        if let Err(e) = state.outputs.flush() {
            internal::warn("SINK", &format!("Teardown flush failed: {e}"));
        }
    }
}
