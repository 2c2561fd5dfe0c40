//! TOML-based bot configuration.
//!
//! Sections:
//! - `[tracker]`: valid floor range and idle-clear interval
//! - `[telegram]`: bot token and long-poll settings
//! - `[logging]`: log level and optional log file
//!
//! Configuration is stored at `~/.config/firealarm/config.toml` unless a path
//! is given explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::tracker::FloorRange;

/// Environment variable that overrides `telegram.token`.
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Longest long-poll wait the Bot API honours.
pub const MAX_POLL_TIMEOUT_SECS: u64 = 50;

/// Floor tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_min_floor")]
    pub min_floor: i32,
    #[serde(default = "default_max_floor")]
    pub max_floor: i32,
    /// Seconds without an accepted check before all checks are wiped.
    #[serde(default = "default_idle_clear_secs")]
    pub idle_clear_secs: u64,
}

/// Telegram Bot API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token. `TELEGRAM_BOT_TOKEN` takes precedence when set.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append log lines to this file in addition to stderr.
    #[serde(default)]
    pub file: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_min_floor() -> i32 {
    2
}
fn default_max_floor() -> i32 {
    25
}
fn default_idle_clear_secs() -> u64 {
    60 * 60
}
fn default_poll_timeout_secs() -> u64 {
    30
}
fn default_api_base() -> String {
    "https://api.telegram.org".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_floor: default_min_floor(),
            max_floor: default_max_floor(),
            idle_clear_secs: default_idle_clear_secs(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            poll_timeout_secs: default_poll_timeout_secs(),
            api_base: default_api_base(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl TrackerConfig {
    /// The inclusive range of floors that may be recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_floor` exceeds `max_floor`.
    pub fn range(&self) -> Result<FloorRange, ConfigError> {
        FloorRange::new(self.min_floor, self.max_floor)
    }

    pub fn idle_clear_interval(&self) -> Duration {
        Duration::from_secs(self.idle_clear_secs)
    }

    /// Check the section for values the tracker cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range()?;
        if self.idle_clear_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tracker.idle_clear_secs".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

impl TelegramConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_timeout_secs > MAX_POLL_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue {
                key: "telegram.poll_timeout_secs".into(),
                message: format!("must be at most {MAX_POLL_TIMEOUT_SECS}"),
            });
        }
        Ok(())
    }

    /// Token from the environment, falling back to the config file.
    pub fn resolved_token(&self) -> Option<String> {
        self.token_with_override(std::env::var(TOKEN_ENV_VAR).ok())
    }

    fn token_with_override(&self, env: Option<String>) -> Option<String> {
        env.filter(|t| !t.trim().is_empty())
            .or_else(|| Some(self.token.clone()).filter(|t| !t.trim().is_empty()))
    }
}

/// Returns `~/.config/firealarm[-dev]/` based on FIREALARM_ENV.
///
/// Set FIREALARM_ENV=dev to use the development config directory.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FIREALARM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("firealarm-dev")
    } else {
        base_dir.join("firealarm")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if key.is_empty() {
            return Err(unknown());
        }
        let mut parts = key.split('.').peekable();

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as integer")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from `path`, writing the defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, if
    /// the tracker section is invalid, or if the defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        let cfg = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str::<Config>(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                cfg
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every section for values the bot cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tracker.validate()?;
        self.telegram.validate()
    }

    /// Persist to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The new value must have the
    /// same type as the current one and the result must still validate.
    /// Nothing is written to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
