//! TOML-based engine configuration.
//!
//! Stores the tunables of the Plans screen navigation engine:
//! - Day window size and rest weekdays
//! - Week strip snap thresholds, animation timing and overflow policy
//! - Month view snap thresholds
//! - Day carousel commit thresholds and spring
//! - Haptic feedback toggle
//!
//! Configuration is stored at `~/.config/fitplan/config.toml`.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::carousel::CarouselConfig;
use crate::days::{RestDayPolicy, WindowSpan};
use crate::error::{ConfigError, CoreError, Result};
use crate::motion::SpringConfig;
use crate::pager::SnapConfig;
use crate::scroll_sync::WeekSyncOverflow;

/// Day window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_days_before")]
    pub days_before: u32,
    #[serde(default = "default_days_after")]
    pub days_after: u32,
    #[serde(default = "default_rest_days")]
    pub rest_days: Vec<Weekday>,
}

/// Week strip configuration (shared by the main and sticky strips).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekPagerConfig {
    #[serde(default = "default_page_width")]
    pub page_width: f64,
    #[serde(default = "default_half")]
    pub snap_distance_fraction: f64,
    #[serde(default = "default_snap_velocity")]
    pub snap_velocity: f64,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    #[serde(default = "default_settle_debounce_ms")]
    pub settle_debounce_ms: u64,
    #[serde(default)]
    pub overflow: WeekSyncOverflow,
}

/// Month view configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthPagerConfig {
    #[serde(default = "default_page_width")]
    pub page_width: f64,
    #[serde(default = "default_half")]
    pub snap_distance_fraction: f64,
    #[serde(default = "default_snap_velocity")]
    pub snap_velocity: f64,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
}

/// Day carousel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselSection {
    #[serde(default = "default_page_width")]
    pub screen_width: f64,
    #[serde(default = "default_commit_fraction")]
    pub commit_fraction: f64,
    #[serde(default = "default_commit_velocity")]
    pub commit_velocity: f64,
    #[serde(default = "default_preview_min_scale")]
    pub preview_min_scale: f64,
    #[serde(default = "default_spring_stiffness")]
    pub spring_stiffness: f64,
    #[serde(default = "default_spring_damping_ratio")]
    pub spring_damping_ratio: f64,
}

/// Feedback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default = "default_true")]
    pub haptics_enabled: bool,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/fitplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub week_pager: WeekPagerConfig,
    #[serde(default)]
    pub month_pager: MonthPagerConfig,
    #[serde(default)]
    pub carousel: CarouselSection,
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

// Default functions
fn default_days_before() -> u32 {
    14
}
fn default_days_after() -> u32 {
    20
}
fn default_rest_days() -> Vec<Weekday> {
    RestDayPolicy::default().weekdays
}
fn default_page_width() -> f64 {
    375.0
}
fn default_half() -> f64 {
    0.5
}
fn default_snap_velocity() -> f64 {
    300.0
}
fn default_animation_ms() -> u64 {
    250
}
fn default_settle_debounce_ms() -> u64 {
    80
}
fn default_commit_fraction() -> f64 {
    0.3
}
fn default_commit_velocity() -> f64 {
    500.0
}
fn default_preview_min_scale() -> f64 {
    0.9
}
fn default_spring_stiffness() -> f64 {
    SpringConfig::default().stiffness
}
fn default_spring_damping_ratio() -> f64 {
    SpringConfig::default().damping_ratio
}
fn default_true() -> bool {
    true
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            days_before: default_days_before(),
            days_after: default_days_after(),
            rest_days: default_rest_days(),
        }
    }
}

impl Default for WeekPagerConfig {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            snap_distance_fraction: default_half(),
            snap_velocity: default_snap_velocity(),
            animation_ms: default_animation_ms(),
            settle_debounce_ms: default_settle_debounce_ms(),
            overflow: WeekSyncOverflow::default(),
        }
    }
}

impl Default for MonthPagerConfig {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            snap_distance_fraction: default_half(),
            snap_velocity: default_snap_velocity(),
            animation_ms: default_animation_ms(),
        }
    }
}

impl Default for CarouselSection {
    fn default() -> Self {
        Self {
            screen_width: default_page_width(),
            commit_fraction: default_commit_fraction(),
            commit_velocity: default_commit_velocity(),
            preview_min_scale: default_preview_min_scale(),
            spring_stiffness: default_spring_stiffness(),
            spring_damping_ratio: default_spring_damping_ratio(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            haptics_enabled: true,
        }
    }
}

impl WindowConfig {
    pub fn span(&self) -> WindowSpan {
        WindowSpan {
            days_before: self.days_before,
            days_after: self.days_after,
        }
    }

    pub fn rest_day_policy(&self) -> RestDayPolicy {
        RestDayPolicy {
            weekdays: self.rest_days.clone(),
        }
    }
}

impl WeekPagerConfig {
    pub fn snap(&self) -> SnapConfig {
        SnapConfig {
            distance_fraction: self.snap_distance_fraction,
            velocity_threshold: self.snap_velocity,
            animation_ms: self.animation_ms,
        }
    }
}

impl MonthPagerConfig {
    pub fn snap(&self) -> SnapConfig {
        SnapConfig {
            distance_fraction: self.snap_distance_fraction,
            velocity_threshold: self.snap_velocity,
            animation_ms: self.animation_ms,
        }
    }
}

impl CarouselSection {
    pub fn carousel(&self) -> CarouselConfig {
        CarouselConfig {
            screen_width: self.screen_width,
            commit_fraction: self.commit_fraction,
            commit_velocity: self.commit_velocity,
            preview_min_scale: self.preview_min_scale,
            spring: SpringConfig {
                stiffness: self.spring_stiffness,
                damping_ratio: self.spring_damping_ratio,
            },
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

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
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

    /// Default config file location.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return (and persist) the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
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

    /// Set a config value by key in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Overwrite the stored config with defaults and return them.
    pub fn reset() -> Result<Self> {
        let cfg = Self::default();
        cfg.save()?;
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }
}
