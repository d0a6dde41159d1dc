//! CLI module for nodelog.
//!
//! Drives a [`Sink`](crate::Sink) from the shell so thresholds and dump behavior can be
//! tried without a device attached.

pub mod commands;
pub mod util;

use crate::level::Severity;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// nodelog - leveled device logging with deferred dumps.
#[derive(Parser, Debug)]
#[command(
    name = "nodelog",
    version,
    about = "Route log messages through a nodelog sink"
)]
pub struct Cli {
    #[command(flatten)]
    pub sink: SinkArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides applied on top of the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct SinkArgs {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Log file target
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Append to the log file instead of truncating it
    #[arg(long, global = true)]
    pub append: bool,
    /// Also echo records to stdout
    #[arg(long, global = true)]
    pub console: bool,
    /// Records at or above this severity are written immediately
    #[arg(long, global = true, value_name = "LEVEL")]
    pub save_level: Option<Severity>,
    /// Records at or above this severity (and not saved) are queued
    #[arg(long, global = true, value_name = "LEVEL")]
    pub queue_level: Option<Severity>,
    /// Records at or above this severity dump the queue
    #[arg(long, global = true, value_name = "LEVEL")]
    pub dump_trigger: Option<Severity>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a single record.
    Write {
        /// Severity name (e.g. warning, detail)
        level: Severity,
        /// Device node id (0 = none, 255 = controller)
        node: u8,
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Read `LEVEL NODE message` lines from stdin and write each one.
    Pipe,
    /// List severity names with their ordinals.
    Levels,
}

pub use commands::{cmd_levels, cmd_pipe, cmd_write};
pub use util::{build_sink, load_config, parse_pipe_line};
