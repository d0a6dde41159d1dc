#![cfg(feature = "cli")]

use clap::Parser;
use nodelog::cli::{Cli, Command, SinkArgs, build_sink, cmd_pipe, cmd_write, parse_pipe_line};
use nodelog::{Config, Severity};
use std::io::Cursor;
use std::path::PathBuf;
use std::process::ExitCode;
use tempfile::TempDir;

#[test]
fn parse_write_command() {
    let cli = Cli::parse_from([
        "nodelog",
        "--save-level",
        "debug",
        "write",
        "warning",
        "17",
        "no",
        "ack",
    ]);
    assert_eq!(cli.sink.save_level, Some(Severity::Debug));
    match cli.command {
        Command::Write {
            level,
            node,
            message,
        } => {
            assert_eq!(level, Severity::Warning);
            assert_eq!(node, 17);
            assert_eq!(message, ["no", "ack"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::parse_from(["nodelog", "pipe", "--file", "/tmp/x.log", "--append"]);
    assert!(matches!(cli.command, Command::Pipe));
    assert_eq!(cli.sink.file, Some(PathBuf::from("/tmp/x.log")));
    assert!(cli.sink.append);
}

#[test]
fn rejects_bad_level_and_node() {
    assert!(Cli::try_parse_from(["nodelog", "write", "loud", "1", "x"]).is_err());
    assert!(Cli::try_parse_from(["nodelog", "write", "info", "256", "x"]).is_err());
    assert!(Cli::try_parse_from(["nodelog", "write", "info", "1"]).is_err());
}

#[test]
fn pipe_line_parsing() {
    assert_eq!(
        parse_pipe_line("debug 5 sent  two spaces\n").unwrap(),
        Some((Severity::Debug, 5, "sent  two spaces"))
    );
    assert_eq!(
        parse_pipe_line("  ERROR   255 gone").unwrap(),
        Some((Severity::Error, 255, "gone"))
    );
    assert_eq!(parse_pipe_line("info 0").unwrap(), Some((Severity::Info, 0, "")));
    assert_eq!(parse_pipe_line("   \r\n").unwrap(), None);

    assert!(matches!(
        parse_pipe_line("loud 1 x"),
        Err(nodelog::Error::InvalidLevel(_))
    ));
    assert!(matches!(
        parse_pipe_line("info 300 x"),
        Err(nodelog::Error::InvalidNode(_))
    ));
    assert!(matches!(
        parse_pipe_line("info"),
        Err(nodelog::Error::InvalidNode(_))
    ));
}

#[test]
fn flags_override_config() {
    let config = Config::parse("[sink]\nsave_level = \"error\"\nqueue_level = \"info\"\n").unwrap();
    let args = SinkArgs {
        save_level: Some(Severity::Warning),
        dump_trigger: Some(Severity::Fatal),
        ..SinkArgs::default()
    };

    let sink = build_sink(&args, &config);
    let thresholds = sink.thresholds();
    assert_eq!(thresholds.save, Severity::Warning);
    assert_eq!(thresholds.queue, Severity::Info);
    assert_eq!(thresholds.dump_trigger, Severity::Fatal);
}

#[test]
fn pipe_replays_into_file() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("pipe.log");
    let args = SinkArgs {
        file: Some(log.clone()),
        save_level: Some(Severity::Warning),
        queue_level: Some(Severity::Debug),
        dump_trigger: Some(Severity::Error),
        ..SinkArgs::default()
    };
    let sink = build_sink(&args, &Config::default());

    let input = "debug 4 tx 01 02\n\ndetail 4 rx 06\nerror 4 checksum mismatch\n";
    assert_eq!(cmd_pipe(&sink, Cursor::new(input)), ExitCode::SUCCESS);

    let content = std::fs::read_to_string(&log).unwrap();
    let tx = content.find("Node004, tx 01 02").unwrap();
    let rx = content.find("Node004, rx 06").unwrap();
    let err = content.find("Node004, checksum mismatch").unwrap();
    assert!(tx < rx && rx < err);
}

#[test]
fn pipe_reports_bad_lines_but_keeps_going() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("pipe.log");
    let args = SinkArgs {
        file: Some(log.clone()),
        save_level: Some(Severity::Info),
        ..SinkArgs::default()
    };
    let sink = build_sink(&args, &Config::default());

    let input = "info 1 first\nnonsense\ninfo 1 second\n";
    assert_eq!(cmd_pipe(&sink, Cursor::new(input)), ExitCode::FAILURE);

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.contains("first") && content.contains("second"));
}

#[test]
fn write_command() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("write.log");
    let args = SinkArgs {
        file: Some(log.clone()),
        ..SinkArgs::default()
    };
    let sink = build_sink(&args, &Config::default());

    let message = vec!["controller".to_string(), "ready".to_string()];
    assert_eq!(
        cmd_write(&sink, Severity::Info, 255, &message),
        ExitCode::SUCCESS
    );
    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.contains("Info, "));
    assert!(content.contains("contrlr, controller ready"));
}
