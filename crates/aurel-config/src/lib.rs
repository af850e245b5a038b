//! Settings persistence for aurel.
//!
//! The audio core only ever receives a complete [`AudioSettings`] value. This
//! crate is where those values come from:
//!
//! - **Presets**: the four factory listening situations
//! - **Profiles**: user-named snapshots, unique by name, last write wins
//! - **Settings file**: the last-used settings, restored on the next run
//! - **Paths**: platform-specific config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use aurel_config::{ProfileStore, preset, save_user_settings};
//!
//! let street = preset("street").unwrap();
//!
//! let mut profiles = ProfileStore::open_default().unwrap();
//! profiles.upsert("Commute", street.clone()).unwrap();
//! profiles.save().unwrap();
//!
//! save_user_settings(&street).unwrap();
//! ```

mod error;
mod profiles;
mod settings_file;

/// Platform-specific paths for persisted settings.
pub mod paths;

/// Factory presets bundled with the library.
pub mod presets;

pub use aurel_core::AudioSettings;
pub use error::{ConfigError, IoOp};
pub use paths::{ensure_user_config_dir, profiles_path, settings_path, user_config_dir};
pub use presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset, preset,
};
pub use profiles::{ProfileStore, SavedProfile};
pub use settings_file::{load_settings, load_user_settings, save_settings, save_user_settings};
