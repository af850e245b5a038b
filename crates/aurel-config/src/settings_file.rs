//! The persisted current settings.
//!
//! The last-used [`AudioSettings`] survive restarts in a small TOML file.
//! Loading never fails on a missing file; it falls back to defaults.

use crate::ConfigError;
use crate::paths::{ensure_parent_dir, settings_path};
use aurel_core::AudioSettings;
use std::path::Path;

/// Load settings from `path`, or defaults when the file does not exist.
///
/// Values outside their ranges are clamped on the way in.
pub fn load_settings(path: impl AsRef<Path>) -> Result<AudioSettings, ConfigError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(AudioSettings::default());
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    Ok(toml::from_str(&content)?)
}

/// Write `settings` to `path`, creating parent directories.
pub fn save_settings(path: impl AsRef<Path>, settings: &AudioSettings) -> Result<(), ConfigError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
}

/// [`load_settings`] from the default location.
pub fn load_user_settings() -> Result<AudioSettings, ConfigError> {
    load_settings(settings_path())
}

/// [`save_settings`] to the default location.
pub fn save_user_settings(settings: &AudioSettings) -> Result<(), ConfigError> {
    save_settings(settings_path(), settings)
}
