//! `nodelog` - route messages through a sink from the shell.
//!
//! Usage:
//!   nodelog write <level> <node> <message..>   Write one record
//!   nodelog pipe                               Write `LEVEL NODE message` lines from stdin
//!   nodelog levels                             List severities
//!
//! Global flags (`--file`, `--save-level`, ...) override the config file.

use clap::Parser;
use nodelog::cli::{Cli, Command, build_sink, cmd_levels, cmd_pipe, cmd_write, load_config};
use nodelog::internal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if matches!(cli.command, Command::Levels) {
        return cmd_levels();
    }

    let config = match load_config(&cli.sink) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Must precede the sink so file-open failures are reported
    internal::init_with_config(&config);

    let sink = build_sink(&cli.sink, &config);
    match cli.command {
        Command::Write {
            level,
            node,
            message,
        } => cmd_write(&sink, level, node, &message),
        Command::Pipe => cmd_pipe(&sink, std::io::stdin().lock()),
        Command::Levels => cmd_levels(),
    }
}
