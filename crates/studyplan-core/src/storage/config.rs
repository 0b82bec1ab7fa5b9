//! TOML-based planner configuration.
//!
//! Stores the defaults a fresh profile starts from:
//! - Focus/break cadence
//! - Revision cadence and slot length
//! - Plan span and rest buffer
//! - Daily availability window and hour budget
//!
//! Configuration is stored at `~/.config/studyplan/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::profile::{Profile, StudyWindow};

/// Planner defaults applied to newly created profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerDefaults {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default = "default_revision_frequency_days")]
    pub revision_frequency_days: u32,
    #[serde(default = "default_revision_slot_minutes")]
    pub revision_slot_minutes: u32,
    #[serde(default = "default_span_days")]
    pub span_days: u32,
    #[serde(default)]
    pub rest_buffer_minutes: u32,
    #[serde(default = "default_daily_study_hours")]
    pub daily_study_hours: f32,
    #[serde(default = "default_window_start")]
    pub window_start: String,
    #[serde(default = "default_window_end")]
    pub window_end: String,
    /// 0=Mon ... 6=Sun
    #[serde(default = "default_preferred_days")]
    pub preferred_days: Vec<u8>,
}

// Default functions
fn default_focus_minutes() -> u32 {
    50
}
fn default_break_minutes() -> u32 {
    10
}
fn default_revision_frequency_days() -> u32 {
    3
}
fn default_revision_slot_minutes() -> u32 {
    20
}
fn default_span_days() -> u32 {
    14
}
fn default_daily_study_hours() -> f32 {
    4.0
}
fn default_window_start() -> String {
    "09:00".to_string()
}
fn default_window_end() -> String {
    "17:00".to_string()
}
fn default_preferred_days() -> Vec<u8> {
    vec![0, 1, 2, 3, 4]
}

impl Default for PlannerDefaults {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
            revision_frequency_days: default_revision_frequency_days(),
            revision_slot_minutes: default_revision_slot_minutes(),
            span_days: default_span_days(),
            rest_buffer_minutes: 0,
            daily_study_hours: default_daily_study_hours(),
            window_start: default_window_start(),
            window_end: default_window_end(),
            preferred_days: default_preferred_days(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerDefaults,
}

impl Config {
    /// Default config file path.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/studyplan"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default path; a missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| match e {
            ConfigError::LoadFailed { path, message } => ConfigError::SaveFailed { path, message },
            other => other,
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Seed a fresh profile from the configured defaults.
    pub fn seed_profile(&self, name: impl Into<String>) -> Profile {
        let mut profile = Profile::new(name);
        profile.preferred_days = self.planner.preferred_days.clone();
        profile.daily_study_hours = self.planner.daily_study_hours;
        profile.window = StudyWindow::new(&self.planner.window_start, &self.planner.window_end);
        profile.focus_minutes = self.planner.focus_minutes;
        profile.break_minutes = self.planner.break_minutes;
        profile.revision_frequency_days = self.planner.revision_frequency_days;
        profile.revision_slot_minutes = self.planner.revision_slot_minutes;
        profile.span_days = self.planner.span_days;
        profile.rest_buffer_minutes = self.planner.rest_buffer_minutes;
        profile
    }
}
