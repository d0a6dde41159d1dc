//! One formatted log record, plus the line layout shared by every output.

use crate::fmt::{format_timestamp, node_prefix, render_bounded, thread_tag};
use crate::level::Severity;
use chrono::{DateTime, Local};
use std::fmt;

/// Lives only until it is written or evicted from the deferred queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    /// `0` unattributed, `255` controller, `1..=254` device.
    pub node_id: u8,
    pub thread_tag: String,
    /// Captured when the record is formatted, not when it is finally written,
    /// so dumped context keeps its original time.
    pub timestamp: DateTime<Local>,
    /// At most [`MAX_TEXT_LEN`](crate::fmt::MAX_TEXT_LEN) bytes.
    pub text: String,
}

impl LogRecord {
    /// Renders `args` on the calling thread and stamps it with that thread's tag.
    #[must_use]
    pub fn format(severity: Severity, node_id: u8, args: fmt::Arguments<'_>) -> Self {
        Self {
            severity,
            node_id,
            thread_tag: thread_tag(),
            timestamp: Local::now(),
            text: render_bounded(args),
        }
    }

    /// Same as [`format`](Self::format) for text that is already a string.
    #[must_use]
    pub fn new(severity: Severity, node_id: u8, text: &str) -> Self {
        Self::format(severity, node_id, format_args!("{text}"))
    }

    /// `"<timestamp> <Level, >"`, the optional part of a persisted line.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!(
            "{} {}",
            format_timestamp(&self.timestamp),
            self.severity.display_name()
        )
    }

    /// `"<thread-tag> <node-prefix><text>"`.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "{} {}{}",
            self.thread_tag,
            node_prefix(self.node_id),
            self.text
        )
    }

    /// Full persisted line without the trailing newline.
    #[must_use]
    pub fn line(&self) -> String {
        let mut line = self.prefix();
        line.push_str(&self.body());
        line
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line())
    }
}
