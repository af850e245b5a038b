//! Shared command-line helpers.

use aurel_config::{ProfileStore, load_user_settings, preset};
use aurel_core::AudioSettings;
use clap::Args;

/// Volume above which listening for long periods is discouraged.
pub const VOLUME_CAUTION: f32 = 80.0;

/// Volume above which hearing damage becomes a real risk.
pub const VOLUME_DANGER: f32 = 85.0;

/// Where the starting settings come from, plus per-field overrides.
///
/// Precedence: `--profile`, then `--preset`, then the last saved settings.
/// Field flags are applied on top and clamped to their ranges.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Start from a factory preset (normal, quiet, street, tv)
    #[arg(long, conflicts_with = "profile")]
    pub preset: Option<String>,

    /// Start from a saved profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Master volume, 0 to 100
    #[arg(long)]
    pub volume: Option<f32>,

    /// High-shelf gain above 3 kHz in dB, -20 to 20
    #[arg(long, allow_hyphen_values = true)]
    pub high: Option<f32>,

    /// Low-shelf gain below 300 Hz in dB, -20 to 20
    #[arg(long, allow_hyphen_values = true)]
    pub low: Option<f32>,

    /// Balance, -100 (left) to 100 (right)
    #[arg(long, allow_hyphen_values = true)]
    pub balance: Option<f32>,
}

impl SettingsArgs {
    /// Resolve the starting settings and apply overrides.
    pub fn resolve(&self) -> anyhow::Result<AudioSettings> {
        let base = if let Some(name) = &self.profile {
            ProfileStore::open_default()?.load(name)?
        } else if let Some(name) = &self.preset {
            preset(name)?
        } else {
            load_user_settings()?
        };
        Ok(self.apply_overrides(base))
    }

    /// Apply the per-field flags to `base`.
    pub fn apply_overrides(&self, mut settings: AudioSettings) -> AudioSettings {
        if let Some(v) = self.volume {
            settings = settings.with_master_volume(v);
        }
        if let Some(v) = self.high {
            settings = settings.with_high_freq(v);
        }
        if let Some(v) = self.low {
            settings = settings.with_low_freq(v);
        }
        if let Some(v) = self.balance {
            settings = settings.with_balance(v);
        }
        settings
    }
}

/// Hearing-safety notice for a master volume, if one is due.
pub fn volume_warning(volume: f32) -> Option<&'static str> {
    if volume > VOLUME_DANGER {
        Some("volume above 85%: risk of hearing damage, turn it down")
    } else if volume > VOLUME_CAUTION {
        Some("volume above 80%: avoid listening at this level for long")
    } else {
        None
    }
}

/// One-line summary of a settings value.
pub fn describe(settings: &AudioSettings) -> String {
    format!(
        "volume {:>3.0}%  high {:>+5.1} dB  low {:>+5.1} dB  balance {:>+4.0}",
        settings.master_volume(),
        settings.high_freq(),
        settings.low_freq(),
        settings.balance()
    )
}
