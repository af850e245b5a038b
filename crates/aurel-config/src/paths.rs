//! Platform-specific paths for persisted settings.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/aurel/` (Linux), `~/Library/Application Support/aurel/` (macOS), `%APPDATA%\aurel\` (Windows)
//! - **Current settings**: `<user config>/settings.toml`
//! - **Saved profiles**: `<user config>/profiles.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use aurel_config::paths;
//!
//! println!("Profiles live in {:?}", paths::profiles_path());
//! ```

use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Application name used for directory paths.
pub const APP_NAME: &str = "aurel";

/// File name of the persisted current settings.
pub const SETTINGS_FILE: &str = "settings.toml";

/// File name of the saved-profile list.
pub const PROFILES_FILE: &str = "profiles.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Location of the persisted current settings.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Location of the saved-profile list.
pub fn profiles_path() -> PathBuf {
    user_config_dir().join(PROFILES_FILE)
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    ensure_parent_dir(&dir.join(SETTINGS_FILE))?;
    Ok(dir)
}

/// Create the parent directory of `path` if it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
    }
    Ok(())
}
