//! Severity levels that decide whether a record is saved, queued, dropped, or triggers a dump.

use std::fmt;
use std::str::FromStr;

/// Ordered from most severe to most verbose, so thresholds compare with `<=`.
///
/// `Invalid` is a sentinel that sorts after every real level: no threshold admits it
/// unless the threshold itself is `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// Disables everything when used as a threshold.
    None = 0,
    /// Shown regardless of configuration.
    Always = 1,
    /// The process cannot continue.
    Fatal = 2,
    /// A device operation failed.
    Error = 3,
    /// Unexpected but recoverable.
    Warning = 4,
    /// Notable state changes worth flagging.
    Alert = 5,
    /// Normal operational milestones.
    #[default]
    Info = 6,
    /// Per-message protocol detail.
    Detail = 7,
    /// Developer diagnostics.
    Debug = 8,
    /// Raw byte streams to and from the device.
    StreamDetail = 9,
    /// The sink's own bookkeeping lines (dump banners).
    Internal = 10,
    /// Sentinel for unrecognized values.
    Invalid = 11,
}

const NAMES: [&str; 11] = [
    "None",
    "Always",
    "Fatal",
    "Error",
    "Warning",
    "Alert",
    "Info",
    "Detail",
    "Debug",
    "StreamDetail",
    "Internal",
];

const DISPLAY_NAMES: [&str; 11] = [
    "None, ",
    "Always, ",
    "Fatal, ",
    "Error, ",
    "Warning, ",
    "Alert, ",
    "Info, ",
    "Detail, ",
    "Debug, ",
    "StreamDetail, ",
    "Internal, ",
];

/// Returned for ordinals outside `[None, Internal]`.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown, ";

/// Line-assembly name for a raw ordinal, suffixed with `", "`.
///
/// Out-of-range values (and `Invalid`) land in the `"Unknown, "` bucket.
#[must_use]
pub fn display_name(ordinal: i32) -> &'static str {
    usize::try_from(ordinal)
        .ok()
        .and_then(|i| DISPLAY_NAMES.get(i))
        .copied()
        .unwrap_or(UNKNOWN_DISPLAY_NAME)
}

impl Severity {
    /// Canonical name, or `"Unknown"` for the sentinel.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "Unknown",
            other => NAMES[other as usize],
        }
    }

    /// Same as [`display_name`] for a typed value.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Invalid => UNKNOWN_DISPLAY_NAME,
            other => DISPLAY_NAMES[other as usize],
        }
    }

    #[must_use]
    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    /// Maps a raw ordinal back to a level; `None` for anything outside `0..=11`.
    #[must_use]
    pub const fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(Self::None),
            1 => Some(Self::Always),
            2 => Some(Self::Fatal),
            3 => Some(Self::Error),
            4 => Some(Self::Warning),
            5 => Some(Self::Alert),
            6 => Some(Self::Info),
            7 => Some(Self::Detail),
            8 => Some(Self::Debug),
            9 => Some(Self::StreamDetail),
            10 => Some(Self::Internal),
            11 => Some(Self::Invalid),
            _ => None,
        }
    }

    /// Every real level in order, without the sentinel. Used by help output and tests.
    #[must_use]
    pub const fn all() -> [Self; 11] {
        [
            Self::None,
            Self::Always,
            Self::Fatal,
            Self::Error,
            Self::Warning,
            Self::Alert,
            Self::Info,
            Self::Detail,
            Self::Debug,
            Self::StreamDetail,
            Self::Internal,
        ]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity: '{}'", self.0)
    }
}

impl std::error::Error for ParseSeverityError {}

impl From<ParseSeverityError> for crate::Error {
    fn from(e: ParseSeverityError) -> Self {
        Self::InvalidLevel(e.0)
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "always" => Ok(Self::Always),
            "fatal" => Ok(Self::Fatal),
            "error" | "err" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "alert" => Ok(Self::Alert),
            "info" => Ok(Self::Info),
            "detail" => Ok(Self::Detail),
            "debug" => Ok(Self::Debug),
            "streamdetail" | "stream_detail" | "stream" => Ok(Self::StreamDetail),
            "internal" => Ok(Self::Internal),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}
