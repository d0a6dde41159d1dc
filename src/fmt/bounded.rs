//! Fixed-capacity message rendering.
//!
//! A record's text never exceeds [`MAX_TEXT_LEN`] bytes. Anything past that is dropped
//! without an error, and the cut always lands on a UTF-8 character boundary.

use std::fmt::{self, Write};

/// Usable bytes per message; the C-era buffer was 1024 including the terminator.
pub const MAX_TEXT_LEN: usize = 1023;

/// `fmt::Write` sink that stops accepting bytes once the capacity is reached.
#[derive(Debug, Clone)]
pub struct BoundedText {
    buf: String,
    capacity: usize,
    truncated: bool,
}

impl Default for BoundedText {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundedText {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_TEXT_LEN)
    }

    /// Smaller capacities are used by tests and by callers with tighter line limits.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity.min(256)),
            capacity,
            truncated: false,
        }
    }

    /// Whether any input was discarded.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl Write for BoundedText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }

        let room = self.capacity - self.buf.len();
        if s.len() <= room {
            self.buf.push_str(s);
            return Ok(());
        }

        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf.push_str(&s[..cut]);
        self.truncated = true;
        Ok(())
    }
}

/// Renders `args` into at most [`MAX_TEXT_LEN`] bytes.
#[must_use]
pub fn render_bounded(args: fmt::Arguments<'_>) -> String {
    // Plain literals skip the formatting machinery entirely.
    if let Some(s) = args.as_str() {
        return truncate_str(s, MAX_TEXT_LEN).to_string();
    }

    let mut text = BoundedText::new();
    // BoundedText never fails, so the only error source is a Display impl; keep what we have.
    let _ = text.write_fmt(args);
    text.into_string()
}

fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    &s[..cut]
}
