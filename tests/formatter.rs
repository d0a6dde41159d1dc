//! Tests for record rendering: node prefix, thread tag, truncation, line layout.

use chrono::NaiveDateTime;
use nodelog::LogRecord;
use nodelog::Severity;
use nodelog::fmt::{CONTROLLER_NODE, MAX_TEXT_LEN, NO_NODE, node_prefix, render_bounded, thread_tag};

#[test]
fn node_prefix_encoding() {
    assert_eq!(node_prefix(NO_NODE), "");
    assert_eq!(node_prefix(CONTROLLER_NODE), "contrlr, ");
    assert_eq!(node_prefix(1), "Node001, ");
    assert_eq!(node_prefix(42), "Node042, ");
    assert_eq!(node_prefix(254), "Node254, ");
}

#[test]
fn thread_tag_is_hex_and_stable() {
    let tag = thread_tag();
    assert!(tag.len() >= 8);
    assert!(tag.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(tag, thread_tag());
}

#[test]
fn thread_tags_differ_between_live_threads() {
    let here = thread_tag();
    let (tx, rx) = std::sync::mpsc::channel();
    let (done_tx, done_rx) = std::sync::mpsc::channel::<()>();

    let worker = std::thread::spawn(move || {
        tx.send(thread_tag()).unwrap();
        // Stay alive until compared so the id is not reused.
        done_rx.recv().unwrap();
    });

    let there = rx.recv().unwrap();
    assert_ne!(here, there);
    done_tx.send(()).unwrap();
    worker.join().unwrap();
}

#[test]
fn long_text_is_truncated() {
    let long = "x".repeat(5000);
    let text = render_bounded(format_args!("{long}"));
    assert_eq!(text.len(), MAX_TEXT_LEN);
    assert_eq!(MAX_TEXT_LEN, 1023);
}

#[test]
fn short_text_is_untouched() {
    assert_eq!(render_bounded(format_args!("poll {} bytes", 12)), "poll 12 bytes");
    assert_eq!(render_bounded(format_args!("")), "");
}

#[test]
fn truncation_respects_char_boundaries() {
    let long = "\u{00e9}".repeat(1000);
    let text = render_bounded(format_args!("{long}"));
    assert!(text.len() <= MAX_TEXT_LEN);
    assert_eq!(text.len(), 1022);
    assert!(text.chars().all(|c| c == '\u{00e9}'));
}

#[test]
fn record_captures_thread_and_node() {
    let record = LogRecord::format(Severity::Detail, 7, format_args!("reply {:#04x}", 0x13));
    assert_eq!(record.severity, Severity::Detail);
    assert_eq!(record.node_id, 7);
    assert_eq!(record.thread_tag, thread_tag());
    assert_eq!(record.text, "reply 0x13");
}

#[test]
fn line_layout() {
    let record = LogRecord::new(Severity::Warning, 3, "timeout");
    let line = record.line();

    let expected_tail = format!("Warning, {} Node003, timeout", record.thread_tag);
    assert!(line.ends_with(&expected_tail), "{line}");

    // "YYYY-MM-DD HH:MM:SS.mmm " leads the line.
    let stamp = &line[..23];
    assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S%.3f").is_ok());
    assert_eq!(&line[23..24], " ");
    assert_eq!(line, record.to_string());
}

#[test]
fn controller_and_unattributed_lines() {
    let controller = LogRecord::new(Severity::Info, CONTROLLER_NODE, "ready");
    assert!(controller.body().ends_with(" contrlr, ready"));

    let plain = LogRecord::new(Severity::Info, NO_NODE, "ready");
    assert_eq!(plain.body(), format!("{} ready", plain.thread_tag));
}
