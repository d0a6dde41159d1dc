//! Android logcat output.

#![allow(unsafe_code)]

use super::{Channel, Output};
use crate::record::LogRecord;
use std::ffi::{CString, c_char, c_int};

#[link(name = "log")]
unsafe extern "C" {
    fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
}

/// Sends each record's body to logcat under a fixed tag.
///
/// Logcat stamps its own time and priority, so only the thread/node/text part is sent.
#[derive(Debug, Clone)]
pub struct LogcatOutput {
    tag: CString,
}

impl Default for LogcatOutput {
    fn default() -> Self {
        Self::new("nodelog")
    }
}

impl LogcatOutput {
    /// Interior NUL bytes in `tag` are dropped.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: to_cstring(tag),
        }
    }
}

fn to_cstring(s: &str) -> CString {
    let bytes: Vec<u8> = s.bytes().filter(|&b| b != 0).collect();
    CString::new(bytes).unwrap_or_default()
}

impl Output for LogcatOutput {
    fn emit(&self, record: &LogRecord) -> Result<(), crate::Error> {
        let text = to_cstring(&record.body());
        let priority = Channel::for_severity(record.severity).android_priority();
        // SAFETY: both pointers come from live CStrings that outlive the call.
        unsafe {
            __android_log_write(priority, self.tag.as_ptr(), text.as_ptr());
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
