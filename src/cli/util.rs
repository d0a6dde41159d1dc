//! Utility functions for the CLI.

use super::SinkArgs;
use crate::config::Config;
use crate::level::Severity;
use crate::sink::{Sink, SinkBuilder};

/// Loads `--config` if given, the default config file otherwise.
///
/// # Errors
/// A config file that exists but does not parse.
pub fn load_config(args: &SinkArgs) -> Result<Config, crate::Error> {
    match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Builds a sink from `config` with the command-line overrides applied.
#[must_use]
pub fn build_sink(args: &SinkArgs, config: &Config) -> Sink {
    let mut builder = SinkBuilder::from_config(config);
    let mut thresholds = config.thresholds();

    if let Some(path) = &args.file {
        builder = builder.target(path);
    }
    if args.append {
        builder = builder.append(true);
    }
    if args.console {
        builder = builder.console(true);
    }
    if let Some(level) = args.save_level {
        thresholds.save = level;
    }
    if let Some(level) = args.queue_level {
        thresholds.queue = level;
    }
    if let Some(level) = args.dump_trigger {
        thresholds.dump_trigger = level;
    }

    builder.thresholds(thresholds).build()
}

/// Splits a `LEVEL NODE message` line.
///
/// Returns `None` for blank lines. The message may be empty.
///
/// # Errors
/// [`Error::InvalidLevel`](crate::Error::InvalidLevel) for an unknown level,
/// [`Error::InvalidNode`](crate::Error::InvalidNode) for a node outside `0..=255`.
pub fn parse_pipe_line(line: &str) -> Result<Option<(Severity, u8, &str)>, crate::Error> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.is_empty() {
        return Ok(None);
    }

    let (level, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let severity: Severity = level.parse()?;

    let rest = rest.trim_start();
    let (node, message) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let node_id = node
        .parse::<u8>()
        .map_err(|_| crate::Error::InvalidNode(node.to_string()))?;

    Ok(Some((severity, node_id, message)))
}
