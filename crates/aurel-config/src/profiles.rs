//! Named settings snapshots.
//!
//! A [`ProfileStore`] is an ordered list of [`SavedProfile`]s backed by one
//! TOML file. Names are unique keys: saving under an existing name replaces
//! that profile and moves it to the end of the list.
//!
//! # TOML Format
//!
//! ```toml
//! [[profiles]]
//! name = "Office"
//!
//! [profiles.settings]
//! masterVolume = 45.0
//! highFreq = 8.0
//! lowFreq = -3.0
//! balance = 0.0
//! preset = "quiet"
//! ```

use crate::ConfigError;
use crate::paths::{ensure_parent_dir, profiles_path};
use aurel_core::AudioSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One saved settings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProfile {
    /// Unique, trimmed, non-empty name.
    pub name: String,
    /// The settings captured when the profile was saved.
    pub settings: AudioSettings,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profiles: Vec<SavedProfile>,
}

/// Saved profiles, persisted to a TOML file.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<SavedProfile>,
}

impl ProfileStore {
    /// Open the store at the default location.
    pub fn open_default() -> Result<Self, ConfigError> {
        Self::open(profiles_path())
    }

    /// Open the store backed by `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let profiles = if path.is_file() {
            let content =
                std::fs::read_to_string(&path).map_err(|e| ConfigError::read_file(&path, e))?;
            toml::from_str::<ProfileFile>(&content)?.profiles
        } else {
            Vec::new()
        };
        Ok(Self { path, profiles })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store to its backing file, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        ensure_parent_dir(&self.path)?;
        let file = ProfileFile {
            profiles: self.profiles.clone(),
        };
        let content = toml::to_string_pretty(&file)?;
        std::fs::write(&self.path, content).map_err(|e| ConfigError::write_file(&self.path, e))?;
        Ok(())
    }

    /// Save `settings` under `name`.
    ///
    /// The name is trimmed. An existing profile with the same name is
    /// replaced and the new one goes to the end of the list.
    pub fn upsert(
        &mut self,
        name: &str,
        settings: AudioSettings,
    ) -> Result<&SavedProfile, ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidProfileName);
        }
        self.profiles.retain(|p| p.name != name);
        self.profiles.push(SavedProfile {
            name: name.to_string(),
            settings,
        });
        Ok(&self.profiles[self.profiles.len() - 1])
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.profiles.iter().position(|p| p.name == name)
    }

    /// Delete the profile called `name`, trimmed as in [`upsert`](Self::upsert).
    pub fn remove(&mut self, name: &str) -> Result<SavedProfile, ConfigError> {
        let idx = self
            .position(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.trim().to_string()))?;
        Ok(self.profiles.remove(idx))
    }

    /// Look up a profile by name, ignoring surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&SavedProfile> {
        self.position(name).map(|idx| &self.profiles[idx])
    }

    /// Settings of the profile called `name`.
    pub fn load(&self, name: &str) -> Result<AudioSettings, ConfigError> {
        self.get(name)
            .map(|p| p.settings.clone())
            .ok_or_else(|| ConfigError::ProfileNotFound(name.trim().to_string()))
    }

    /// All profiles, oldest save first.
    pub fn list(&self) -> &[SavedProfile] {
        &self.profiles
    }

    /// Number of saved profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no profiles are saved.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
