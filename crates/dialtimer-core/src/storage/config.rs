//! TOML-based application configuration.
//!
//! Stores:
//! - Default duration and tick cadence
//! - Dial layout (center and radius in viewBox units)
//! - Snapping grid and preset marks
//! - Notification preferences
//!
//! Configuration is stored at `~/.config/dialtimer/config.toml` unless a
//! path is given explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::controller::DialSettings;
use crate::error::{ConfigError, Result};
use crate::geometry::DialGeometry;
use crate::snap::SnapRules;
use crate::timer::MAX_DURATION_SECS;

/// Timer-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Dial layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialConfig {
    #[serde(default = "default_center")]
    pub center: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell on completion.
    #[serde(default = "default_true")]
    pub bell: bool,
    #[serde(default = "default_message")]
    pub message: String,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub dial: DialConfig,
    #[serde(default)]
    pub snap: SnapRules,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_minutes() -> u32 {
    25
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_center() -> f64 {
    50.0
}
fn default_radius() -> f64 {
    50.0
}
fn default_true() -> bool {
    true
}
fn default_message() -> String {
    "Timer Finished!".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            radius: default_radius(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
            message: default_message(),
        }
    }
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

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let (parent_key, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown().into());
        }

        let mut current = root;
        for part in parent_key.into_iter().flat_map(|p| p.split('.')) {
            current = current.get_mut(part).ok_or_else(unknown)?;
        }
        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let parse_failed = || ConfigError::ParseFailed(format!("cannot parse '{value}' for {key}"));
        let new_value = match existing {
            serde_json::Value::Bool(_) => {
                serde_json::Value::Bool(value.parse::<bool>().map_err(|_| parse_failed())?)
            }
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else {
                    value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(parse_failed)?
                }
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|_| parse_failed())?
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, fails
    /// validation, or if the default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "writing default config");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    /// Persist to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
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

    /// Set a config value by key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)
            .map_err(|e| ConfigError::ParseFailed(format!("{key}: {e}")))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values the dial cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer.default_minutes > MAX_DURATION_SECS / 60 {
            return Err(ConfigError::invalid(
                "timer.default_minutes",
                "must be between 0 and 60",
            ));
        }
        if self.timer.tick_interval_ms == 0 {
            return Err(ConfigError::invalid("timer.tick_interval_ms", "must be positive"));
        }
        if !(self.dial.radius.is_finite() && self.dial.radius > 0.0) {
            return Err(ConfigError::invalid("dial.radius", "must be a positive number"));
        }
        if !self.dial.center.is_finite() {
            return Err(ConfigError::invalid("dial.center", "must be a finite number"));
        }
        if self.snap.coarse_step_secs == 0 {
            return Err(ConfigError::invalid("snap.coarse_step_secs", "must be positive"));
        }
        if self.snap.fine_step_secs == 0 {
            return Err(ConfigError::invalid("snap.fine_step_secs", "must be positive"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.timer.tick_interval_ms)
    }

    pub fn dial_settings(&self) -> DialSettings {
        DialSettings {
            geometry: DialGeometry::new(self.dial.center, self.dial.radius),
            snap: self.snap.clone(),
            initial_secs: self.timer.default_minutes * 60,
        }
    }
}
