//! Stepwise construction of a [`Sink`], mirroring the runtime knobs it exposes later.

use super::{
    DEFAULT_QUEUE_CAPACITY, DeferredQueue, Outputs, Sink, SinkConfig, SinkState, Teardown,
    Thresholds,
};
use crate::internal;
use crate::level::Severity;
use crate::output::{FileOutput, Output, TerminalOutput};
use std::path::PathBuf;
use std::sync::Mutex;

/// Collects construction parameters; nothing touches the filesystem until [`build`](Self::build).
pub struct SinkBuilder {
    target: Option<PathBuf>,
    append: bool,
    console: bool,
    thresholds: Thresholds,
    queue_capacity: usize,
    teardown: Teardown,
    outputs: Vec<Box<dyn Output>>,
}

impl Default for SinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SinkBuilder {
    /// No file, no console, `Detail`/`Debug`/`Warning` thresholds, 500-record queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: None,
            append: false,
            console: false,
            thresholds: Thresholds::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            teardown: Teardown::default(),
            outputs: Vec::new(),
        }
    }

    /// Log file receiving immediate writes and dumps.
    #[must_use]
    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Some(path.into());
        self
    }

    /// Keep the existing file content instead of truncating it at startup.
    #[must_use]
    pub const fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Mirror every written line to stdout.
    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    #[must_use]
    pub const fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub const fn save_level(mut self, level: Severity) -> Self {
        self.thresholds.save = level;
        self
    }

    #[must_use]
    pub const fn queue_level(mut self, level: Severity) -> Self {
        self.thresholds.queue = level;
        self
    }

    #[must_use]
    pub const fn dump_trigger(mut self, level: Severity) -> Self {
        self.thresholds.dump_trigger = level;
        self
    }

    /// Oldest queued records are evicted beyond this many. `0` disables the bound.
    #[must_use]
    pub const fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn teardown(mut self, teardown: Teardown) -> Self {
        self.teardown = teardown;
        self
    }

    /// Adds a backend that receives everything the file does.
    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    /// Opens the target file (truncating it unless appending) and assembles the sink.
    ///
    /// A file that cannot be prepared is reported on the internal channel and kept
    /// as the target anyway; later writes return the error to their callers.
    #[must_use]
    pub fn build(self) -> Sink {
        let file = self.target.as_ref().map(|path| {
            FileOutput::create(path, self.append).unwrap_or_else(|e| {
                internal::error(
                    "SINK",
                    &format!("Cannot prepare log file {}: {e}", path.display()),
                );
                FileOutput::new(path)
            })
        });

        let mut others = Vec::with_capacity(self.outputs.len() + 1);
        if self.console {
            others.push(Box::new(TerminalOutput::new()) as Box<dyn Output>);
        }
        others.extend(self.outputs);

        internal::debug(
            "SINK",
            &format!(
                "Sink ready: file={} console={} save={} queue={} dump={} capacity={}",
                self.target
                    .as_ref()
                    .map_or_else(|| "none".to_string(), |p| p.display().to_string()),
                self.console,
                self.thresholds.save,
                self.thresholds.queue,
                self.thresholds.dump_trigger,
                self.queue_capacity,
            ),
        );

        Sink {
            state: Mutex::new(SinkState {
                config: SinkConfig {
                    thresholds: self.thresholds,
                    target: self.target,
                    append: self.append,
                    console: self.console,
                },
                queue: DeferredQueue::new(self.queue_capacity),
                outputs: Outputs { file, others },
            }),
            teardown: self.teardown,
        }
    }
}
