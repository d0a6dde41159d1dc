//! Sink construction from a nodelog config file.

use super::{Sink, SinkBuilder};
use crate::config::Config;
use crate::internal;

impl SinkBuilder {
    /// Seeds every builder field from `config`; later builder calls still override.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new()
            .thresholds(config.thresholds())
            .append(config.sink.append)
            .console(config.sink.console)
            .queue_capacity(config.sink.queue_capacity)
            .teardown(config.teardown());

        if let Some(path) = config.file_path() {
            internal::debug("SINK", &format!("Log file: {}", path.display()));
            builder = builder.target(path);
        } else {
            internal::debug("SINK", "No log file configured");
        }

        builder
    }
}

impl Sink {
    /// Loads the default config file and builds a sink from it.
    ///
    /// A missing or unreadable config degrades to defaults rather than failing.
    #[must_use]
    pub fn from_default_config() -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            internal::warn("SINK", &format!("Config unavailable ({e}), using defaults"));
            Config::default()
        });
        Self::from_config(&config)
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        SinkBuilder::from_config(config).build()
    }
}
