//! One-shot write: the quickest way to see where a single record lands under the
//! current thresholds.

use crate::internal;
use crate::level::Severity;
use crate::sink::Sink;
use std::process::ExitCode;

/// Joins `message` with spaces and routes it through `sink`.
#[must_use]
pub fn cmd_write(sink: &Sink, level: Severity, node: u8, message: &[String]) -> ExitCode {
    match sink.write(level, node, format_args!("{}", message.join(" "))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            internal::error("CLI", &format!("Write failed: {e}"));
            ExitCode::FAILURE
        }
    }
}
