//! TOML configuration loading.
//!
//! A missing file is not an error: every field has a default, so an absent or empty
//! config still yields a working sink.

mod structs;

pub use structs::{GeneralConfig, SinkSection};

use crate::internal;
use crate::level::Severity;
use crate::sink::{Teardown, Thresholds};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "nodelog.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub sink: SinkSection,
}

impl Config {
    /// Loads from the default location, falling back to defaults when the file is absent.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or the TOML is malformed.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let config_path = Self::get_config_path()?;
        let config = Self::load_from(&config_path)?;
        internal::info(
            "CONFIG",
            &format!("Config loaded from {}", config_path.display()),
        );
        Ok(config)
    }

    /// Loads from an explicit path. A path that does not exist yields defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses config text directly.
    ///
    /// # Errors
    /// Returns the TOML error for malformed input.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// `$XDG_CONFIG_HOME/nodelog/nodelog.toml` (or the platform equivalent).
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "nodelog")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Level names are strings in TOML; unknown names fall back to `fallback` with a warning.
    fn parse_severity(value: &str, key: &str, fallback: Severity) -> Severity {
        value.parse().unwrap_or_else(|_| {
            internal::warn(
                "CONFIG",
                &format!("Invalid {key} '{value}', using {fallback}"),
            );
            fallback
        })
    }

    #[must_use]
    pub fn internal_level(&self) -> Severity {
        Self::parse_severity(
            &self.general.internal_level,
            "general.internal_level",
            Severity::Warning,
        )
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds::new(
            Self::parse_severity(&self.sink.save_level, "sink.save_level", defaults.save),
            Self::parse_severity(&self.sink.queue_level, "sink.queue_level", defaults.queue),
            Self::parse_severity(
                &self.sink.dump_trigger,
                "sink.dump_trigger",
                defaults.dump_trigger,
            ),
        )
    }

    #[must_use]
    pub fn teardown(&self) -> Teardown {
        Teardown::parse(&self.sink.teardown).unwrap_or_else(|| {
            internal::warn(
                "CONFIG",
                &format!("Invalid sink.teardown '{}', using discard", self.sink.teardown),
            );
            Teardown::Discard
        })
    }

    /// Log file path with `~` and environment variables expanded.
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        self.sink.file.as_deref().map(|raw| {
            shellexpand::full(raw).map_or_else(
                |_| PathBuf::from(shellexpand::tilde(raw).as_ref()),
                |expanded| PathBuf::from(expanded.as_ref()),
            )
        })
    }
}
