//! Replays `LEVEL NODE message` lines, e.g. a captured session, through a sink.

use crate::cli::util::parse_pipe_line;
use crate::internal;
use crate::sink::Sink;
use std::io::BufRead;
use std::process::ExitCode;

/// Writes each line of `input` through `sink`.
///
/// Malformed lines are reported and skipped; the exit code is a failure if any line
/// was skipped or any write failed.
#[must_use]
pub fn cmd_pipe<R: BufRead>(sink: &Sink, input: R) -> ExitCode {
    let mut failures = 0usize;

    for (idx, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                internal::error("CLI", &format!("stdin: {e}"));
                return ExitCode::FAILURE;
            }
        };

        let result = parse_pipe_line(&line).and_then(|parsed| match parsed {
            Some((severity, node, message)) => {
                sink.write(severity, node, format_args!("{message}"))
            }
            None => Ok(()),
        });

        if let Err(e) = result {
            internal::warn("CLI", &format!("line {}: {e}", idx + 1));
            failures += 1;
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
