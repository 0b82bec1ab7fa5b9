//! JSON snapshot of planner state.
//!
//! One plain-data document holding the saved profiles, the active profile
//! id, and the most recently generated plan. Stored at
//! `~/.config/studyplan/snapshot.json`; no binary encoding.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StorageError;
use crate::plan::Plan;
use crate::profile::Profile;

/// Persisted planner state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub active_profile_id: Option<String>,
    #[serde(default)]
    pub last_plan: Option<Plan>,
}

impl PlannerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default snapshot file path.
    pub fn path() -> Result<PathBuf, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::LoadFailed {
            path: PathBuf::from("~/.config/studyplan"),
            message: e.to_string(),
        })?;
        Ok(dir.join("snapshot.json"))
    }

    /// Load from the default path; a missing file yields an empty snapshot.
    pub fn load() -> Result<Self, StorageError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, StorageError> {
        let raw = fs::read_to_string(path).map_err(|e| StorageError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| StorageError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(self).map_err(|e| StorageError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        fs::write(path, raw).map_err(|e| StorageError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<(), StorageError> {
        let path = Self::path().map_err(|e| match e {
            StorageError::LoadFailed { path, message } => {
                StorageError::SaveFailed { path, message }
            }
            other => other,
        })?;
        self.save_to(&path)
    }

    /// The profile the UI is currently working with.
    pub fn active_profile(&self) -> Option<&Profile> {
        let id = self.active_profile_id.as_deref()?;
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Record a freshly generated plan and make its profile active.
    pub fn remember_plan(&mut self, plan: Plan) {
        self.active_profile_id = Some(plan.profile_id.clone());
        self.last_plan = Some(plan);
    }
}
