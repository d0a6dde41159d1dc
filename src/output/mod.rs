//! Where finished records end up. The sink decides *whether* a record is written;
//! an `Output` only decides *how*.
//!
//! Backends: a log file, stdout, an in-memory buffer, and (on Android) logcat.
//! Callers can add their own by implementing [`Output`].

mod file;
#[cfg(target_os = "android")]
mod logcat;
mod memory;
mod terminal;

pub use file::FileOutput;
#[cfg(target_os = "android")]
pub use logcat::LogcatOutput;
pub use memory::MemoryOutput;
pub use terminal::TerminalOutput;

use crate::level::Severity;
use crate::record::LogRecord;

/// `Send + Sync` so a sink holding boxed outputs can be shared across worker threads.
pub trait Output: Send + Sync {
    /// Writes one finished record.
    ///
    /// # Errors
    /// I/O errors from the underlying destination.
    fn emit(&self, record: &LogRecord) -> Result<(), crate::Error>;

    /// Pushes buffered data down to the destination.
    ///
    /// # Errors
    /// I/O errors from the underlying destination.
    fn flush(&self) -> Result<(), crate::Error>;
}

/// Console priority buckets, modelled on the Android log priorities.
///
/// Severities with no natural bucket fall into `Unknown` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Unknown,
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Silent,
}

impl Channel {
    #[must_use]
    pub const fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::None => Self::Silent,
            Severity::Fatal => Self::Fatal,
            Severity::Error => Self::Error,
            Severity::Warning | Severity::Alert => Self::Warn,
            Severity::Info => Self::Info,
            Severity::Detail => Self::Verbose,
            Severity::Debug | Severity::StreamDetail => Self::Debug,
            Severity::Always | Severity::Internal | Severity::Invalid => Self::Unknown,
        }
    }

    /// `android_LogPriority` value for this bucket.
    #[must_use]
    pub const fn android_priority(self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::Verbose => 2,
            Self::Debug => 3,
            Self::Info => 4,
            Self::Warn => 5,
            Self::Error => 6,
            Self::Fatal => 7,
            Self::Silent => 8,
        }
    }
}
