//! nodelog's own diagnostics: file errors, config fallbacks, teardown notes.
//!
//! These go to stderr, never through a [`Sink`](crate::Sink), so a broken sink can
//! still report why it is broken. Silent until [`init`] is called; `OnceLock` makes
//! the first call win when several entry points race to initialize.

use crate::config::Config;
use crate::level::Severity;
use std::io::Write;
use std::sync::OnceLock;

static INTERNAL_LEVEL: OnceLock<Severity> = OnceLock::new();

/// Enables reporting of everything at or above `level` in severity.
pub fn init(level: Severity) {
    if INTERNAL_LEVEL.set(level).is_ok() {
        debug("INTERNAL", &format!("Internal diagnostics at {level}"));
    }
}

/// Reuses an already-loaded config to pick the level.
pub fn init_with_config(config: &Config) {
    init(config.internal_level());
}

#[must_use]
pub fn level() -> Severity {
    INTERNAL_LEVEL.get().copied().unwrap_or(Severity::None)
}

/// Pre-init calls vanish rather than failing, so this is safe during early startup.
fn log(severity: Severity, scope: &str, msg: &str) {
    let Some(&max) = INTERNAL_LEVEL.get() else {
        return;
    };
    if severity > max || max == Severity::None {
        return;
    }
    // stderr may be closed in a daemon; nothing sensible to do about it here.
    let _ = writeln!(
        std::io::stderr().lock(),
        "nodelog: {}{scope}: {msg}",
        severity.display_name()
    );
}

pub fn debug(scope: &str, msg: &str) {
    log(Severity::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Severity::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Severity::Warning, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Severity::Error, scope, msg);
}
