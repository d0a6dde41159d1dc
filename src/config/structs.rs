//! Configuration struct definitions.

use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Most verbose severity reported on the internal diagnostics channel.
    pub internal_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            internal_level: "warning".to_string(),
        }
    }
}

/// Sink construction parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SinkSection {
    /// Log file path; `~` is expanded. No file output when absent.
    pub file: Option<String>,
    /// Keep existing file content instead of truncating at startup.
    pub append: bool,
    /// Mirror written lines to stdout.
    pub console: bool,
    /// Highest severity written immediately.
    pub save_level: String,
    /// Highest severity held in the deferred queue.
    pub queue_level: String,
    /// Highest severity that dumps the deferred queue.
    pub dump_trigger: String,
    /// Deferred queue bound; `0` is unbounded.
    pub queue_capacity: usize,
    /// `"discard"` or `"flush"` queued records on shutdown.
    pub teardown: String,
}

impl Default for SinkSection {
    fn default() -> Self {
        Self {
            file: None,
            append: false,
            console: false,
            save_level: "detail".to_string(),
            queue_level: "debug".to_string(),
            dump_trigger: "warning".to_string(),
            queue_capacity: crate::sink::DEFAULT_QUEUE_CAPACITY,
            teardown: "discard".to_string(),
        }
    }
}
