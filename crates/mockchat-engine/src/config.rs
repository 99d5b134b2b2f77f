//! Configuration types for mockchat.
//!
//! Stored as JSON. Every field has a default, so an empty object or a
//! missing file both yield a working configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::responder::{DEFAULT_REPLY_TEMPLATE, INPUT_PLACEHOLDER};

/// Directory holding the config file and logs.
pub const CONFIG_DIR: &str = ".mockchat";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Main configuration for mockchat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Delay before the simulated reply is appended, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Reply text; `{input}` is replaced by the submitted message.
    #[serde(default = "default_reply_template")]
    pub reply_template: String,

    /// Title shown above the transcript.
    #[serde(default = "default_title")]
    pub title: String,

    /// Widest a bubble may grow, as a percentage of the transcript width.
    #[serde(default = "default_bubble_max_width_percent")]
    pub bubble_max_width_percent: u16,

    /// UI tick interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_reply_template() -> String {
    DEFAULT_REPLY_TEMPLATE.into()
}

fn default_title() -> String {
    "mockchat".into()
}

fn default_bubble_max_width_percent() -> u16 {
    70
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            reply_template: default_reply_template(),
            title: default_title(),
            bubble_max_width_percent: default_bubble_max_width_percent(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_delay_ms == 0 {
            return Err(ConfigError::InvalidDelay);
        }
        if !self.reply_template.contains(INPUT_PLACEHOLDER) {
            return Err(ConfigError::InvalidTemplate(self.reply_template.clone()));
        }
        Ok(())
    }

    /// Default config file location under `root`.
    pub fn default_path(root: &Path) -> std::path::PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Reply template does not embed the submitted text.
    #[error("Reply template must contain {{input}}: {0:?}")]
    InvalidTemplate(String),

    /// Reply delay of zero.
    #[error("Reply delay must be greater than zero")]
    InvalidDelay,
}
