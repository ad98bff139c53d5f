//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Work and meal session lengths
//! - The work-hours and meal windows
//! - Notification behaviour
//! - How streak gaps are measured
//!
//! Configuration is stored at `~/.config/deskhealth/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, Result};
use crate::schedule::{ScheduleSettings, TimeOfDay, TimeWindow};
use crate::stats::DayGap;

/// Session lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_duration")]
    pub work_duration_min: u32,
    #[serde(default = "default_meal_duration")]
    pub meal_duration_min: u32,
}

/// Work hours. Outside them the countdown is suspended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkScheduleConfig {
    #[serde(default = "default_work_start")]
    pub start: TimeOfDay,
    #[serde(default = "default_work_end")]
    pub end: TimeOfDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealScheduleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_meal_start")]
    pub start: TimeOfDay,
    #[serde(default = "default_meal_end")]
    pub end: TimeOfDay,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Raise the window when a countdown finishes.
    #[serde(default = "default_true")]
    pub pop_to_front: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub day_gap: DayGap,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/deskhealth/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub work_schedule: WorkScheduleConfig,
    #[serde(default)]
    pub meal_schedule: MealScheduleConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

// Default functions
fn default_work_duration() -> u32 {
    45
}
fn default_meal_duration() -> u32 {
    60
}
fn default_true() -> bool {
    true
}
fn default_work_start() -> TimeOfDay {
    TimeOfDay::clamped(9, 0)
}
fn default_work_end() -> TimeOfDay {
    TimeOfDay::clamped(17, 0)
}
fn default_meal_start() -> TimeOfDay {
    TimeOfDay::clamped(12, 0)
}
fn default_meal_end() -> TimeOfDay {
    TimeOfDay::clamped(13, 0)
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration_min: default_work_duration(),
            meal_duration_min: default_meal_duration(),
        }
    }
}

impl Default for WorkScheduleConfig {
    fn default() -> Self {
        Self {
            start: default_work_start(),
            end: default_work_end(),
        }
    }
}

impl Default for MealScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start: default_meal_start(),
            end: default_meal_end(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pop_to_front: true,
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
        key.split('.').try_fold(root, |node, part| node.get(part))
    }

    /// Replace the leaf at `key`, coercing `value` to the leaf's JSON type.
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

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }
        let parent = match parent_path {
            Some(path) => path
                .split('.')
                .try_fold(&mut *root, |node, part| node.get_mut(part))
                .ok_or_else(unknown)?,
            None => root,
        };
        let obj = parent.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
            serde_json::Value::Object(_) => return Err(invalid("not a leaf key".into())),
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// `<dir>/config.toml`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join("config.toml")
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check invariants the evaluation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, minutes) in [
            ("timer.work_duration_min", self.timer.work_duration_min),
            ("timer.meal_duration_min", self.timer.meal_duration_min),
        ] {
            if minutes == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "must be at least 1 minute".into(),
                });
            }
        }
        self.work_window().validate("work")?;
        self.meal_window().validate("meal")?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key.
    ///
    /// The result is validated as a whole; on error `self` is unchanged.
    /// Persisting is left to the caller.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| {
            CoreError::Config(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn work_duration_secs(&self) -> u32 {
        self.timer.work_duration_min.saturating_mul(60)
    }

    pub fn meal_duration_secs(&self) -> u32 {
        self.timer.meal_duration_min.saturating_mul(60)
    }

    pub fn work_window(&self) -> TimeWindow {
        TimeWindow::new(self.work_schedule.start, self.work_schedule.end)
    }

    pub fn meal_window(&self) -> TimeWindow {
        TimeWindow::new(self.meal_schedule.start, self.meal_schedule.end)
    }

    /// The subset of configuration the schedule engine reads.
    pub fn schedule_settings(&self) -> ScheduleSettings {
        ScheduleSettings {
            work_window: self.work_window(),
            meal_window: self.meal_window(),
            meal_enabled: self.meal_schedule.enabled,
            work_duration_secs: self.work_duration_secs(),
            meal_duration_secs: self.meal_duration_secs(),
        }
    }
}
