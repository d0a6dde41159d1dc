// unsafe is confined to the modules that call into libc; each opts in with allow(unsafe_code)
#![deny(unsafe_code)]

//! `nodelog` - leveled device logging with deferred context dumps.
//!
//! Records carry a severity, a device node id and the emitting thread's tag. A
//! [`Sink`] writes severe records immediately, holds verbose ones in a bounded
//! in-memory queue, and dumps that queue when a trigger-level record arrives, so
//! the log shows what led up to a failure without persisting every poll.
//!
//! On unix the [`cancel`] module adds signal-assisted cooperative cancellation for
//! worker threads blocked on device I/O.
//!
//! # Example
//!
//! ```
//! use nodelog::{MemoryOutput, Severity, Sink, log_write};
//!
//! let memory = MemoryOutput::new();
//! let sink = Sink::builder()
//!     .save_level(Severity::Warning)
//!     .queue_level(Severity::Debug)
//!     .dump_trigger(Severity::Error)
//!     .output(memory.clone())
//!     .build();
//!
//! log_write!(sink, Severity::Debug, 5, "poll {} bytes", 12).unwrap();
//! assert!(memory.is_empty());
//!
//! log_write!(sink, Severity::Error, 5, "no ack").unwrap();
//! assert_eq!(sink.queue_len(), 0);
//! assert!(memory.texts().contains(&"poll 12 bytes".to_string()));
//! ```
//!
//! # Features
//!
//! - `cli` (default): builds the `nodelog` command-line tool

pub mod config;
pub mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod output;
pub mod record;
pub mod sink;

#[cfg(unix)]
pub mod cancel;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::Config;
pub use error::Error;
pub use level::{Severity, display_name};
pub use output::{Channel, FileOutput, MemoryOutput, Output, TerminalOutput};
pub use record::LogRecord;
pub use sink::{Sink, SinkBuilder, SinkConfig, Teardown, Thresholds};

/// Formats and routes a message through a [`Sink`], `format!`-style.
///
/// Expands to [`Sink::write`] and returns its `Result`.
///
/// ```
/// # use nodelog::{Severity, Sink, log_write};
/// let sink = Sink::builder().build();
/// log_write!(sink, Severity::Info, 255, "controller version {}.{}", 4, 61).unwrap();
/// ```
#[macro_export]
macro_rules! log_write {
    ($sink:expr, $severity:expr, $node:expr, $($arg:tt)+) => {
        $sink.write($severity, $node, ::std::format_args!($($arg)+))
    };
}
