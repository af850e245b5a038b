//! Typed settings contract between the settings layer and the signal chain.
//!
//! [`AudioSettings`] is the only value the chain accepts from outside. Every
//! numeric field is clamped at the point it is set, so an out-of-range value
//! can never reach a stage. [`DerivedParams`] is the pure projection of a
//! settings value onto the four shaping stages.
//!
//! | Field | Range | Stage | Derived value |
//! |-------|-------|-------|---------------|
//! | `master_volume` | 0..=100 | gain | `master_volume / 100` |
//! | `high_freq` | -20..=20 dB | high shelf @ 3 kHz | `high_freq` dB |
//! | `low_freq` | -20..=20 dB | low shelf @ 300 Hz | `low_freq` dB |
//! | `balance` | -100..=100 | panner | `balance / 100` |

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Corner frequency of the high-shelf stage in Hz.
pub const HIGH_SHELF_HZ: f32 = 3000.0;

/// Corner frequency of the low-shelf stage in Hz.
pub const LOW_SHELF_HZ: f32 = 300.0;

/// Master volume range (percent of unity gain).
pub const VOLUME_RANGE: (f32, f32) = (0.0, 100.0);

/// Shelf gain range in dB, shared by both shelves.
pub const SHELF_RANGE_DB: (f32, f32) = (-20.0, 20.0);

/// Balance range; negative weights left, positive weights right.
pub const BALANCE_RANGE: (f32, f32) = (-100.0, 100.0);

/// Preset label applied to default settings.
pub const DEFAULT_PRESET: &str = "normal";

#[inline]
fn clamp_to(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// User-facing processing settings.
///
/// Fields are private so that the clamping invariant holds for every value
/// in existence; use the constructors and `with_*` methods.
///
/// ```rust
/// use aurel_core::AudioSettings;
///
/// let settings = AudioSettings::default().with_master_volume(140.0).with_balance(-30.0);
/// assert_eq!(settings.master_volume(), 100.0);
/// assert_eq!(settings.balance(), -30.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawSettings", into = "RawSettings")
)]
pub struct AudioSettings {
    master_volume: f32,
    high_freq: f32,
    low_freq: f32,
    balance: f32,
    preset: String,
}

impl AudioSettings {
    /// Build settings from raw values, clamping each field independently.
    pub fn new(master_volume: f32, high_freq: f32, low_freq: f32, balance: f32) -> Self {
        Self {
            master_volume: clamp_to(master_volume, VOLUME_RANGE, 50.0),
            high_freq: clamp_to(high_freq, SHELF_RANGE_DB, 0.0),
            low_freq: clamp_to(low_freq, SHELF_RANGE_DB, 0.0),
            balance: clamp_to(balance, BALANCE_RANGE, 0.0),
            preset: String::from(DEFAULT_PRESET),
        }
    }

    /// Master volume, 0..=100.
    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// High-shelf gain in dB.
    pub fn high_freq(&self) -> f32 {
        self.high_freq
    }

    /// Low-shelf gain in dB.
    pub fn low_freq(&self) -> f32 {
        self.low_freq
    }

    /// Balance, -100 (left) ..= 100 (right).
    pub fn balance(&self) -> f32 {
        self.balance
    }

    /// Informational preset label. Has no effect on processing.
    pub fn preset(&self) -> &str {
        &self.preset
    }

    /// Copy with a new master volume (clamped).
    pub fn with_master_volume(mut self, value: f32) -> Self {
        self.master_volume = clamp_to(value, VOLUME_RANGE, self.master_volume);
        self
    }

    /// Copy with a new high-shelf gain (clamped).
    pub fn with_high_freq(mut self, value: f32) -> Self {
        self.high_freq = clamp_to(value, SHELF_RANGE_DB, self.high_freq);
        self
    }

    /// Copy with a new low-shelf gain (clamped).
    pub fn with_low_freq(mut self, value: f32) -> Self {
        self.low_freq = clamp_to(value, SHELF_RANGE_DB, self.low_freq);
        self
    }

    /// Copy with a new balance (clamped).
    pub fn with_balance(mut self, value: f32) -> Self {
        self.balance = clamp_to(value, BALANCE_RANGE, self.balance);
        self
    }

    /// Copy with a new preset label.
    pub fn with_preset(mut self, label: impl Into<String>) -> Self {
        self.preset = label.into();
        self
    }

    /// Project onto the four stage parameters.
    pub fn derive(&self) -> DerivedParams {
        DerivedParams::from(self)
    }
}

impl Default for AudioSettings {
    /// `master_volume = 50`, shelves flat, centered, preset `normal`.
    fn default() -> Self {
        Self::new(50.0, 0.0, 0.0, 0.0)
    }
}

/// Unclamped wire form; every deserialized value passes through
/// [`AudioSettings::new`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    master_volume: f32,
    high_freq: f32,
    low_freq: f32,
    balance: f32,
    #[serde(default = "default_preset")]
    preset: String,
}

#[cfg(feature = "serde")]
fn default_preset() -> String {
    String::from(DEFAULT_PRESET)
}

#[cfg(feature = "serde")]
impl From<RawSettings> for AudioSettings {
    fn from(raw: RawSettings) -> Self {
        AudioSettings::new(raw.master_volume, raw.high_freq, raw.low_freq, raw.balance)
            .with_preset(raw.preset)
    }
}

#[cfg(feature = "serde")]
impl From<AudioSettings> for RawSettings {
    fn from(settings: AudioSettings) -> Self {
        Self {
            master_volume: settings.master_volume,
            high_freq: settings.high_freq,
            low_freq: settings.low_freq,
            balance: settings.balance,
            preset: settings.preset,
        }
    }
}

/// Stage parameters derived from one [`AudioSettings`] value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedParams {
    /// Linear gain multiplier, 0.0..=1.0.
    pub gain: f32,
    /// Pan position, -1.0 (left) ..= 1.0 (right).
    pub pan: f32,
    /// High-shelf gain in dB.
    pub high_shelf_db: f32,
    /// Low-shelf gain in dB.
    pub low_shelf_db: f32,
}

impl From<&AudioSettings> for DerivedParams {
    fn from(settings: &AudioSettings) -> Self {
        Self {
            gain: settings.master_volume / 100.0,
            pan: settings.balance / 100.0,
            high_shelf_db: settings.high_freq,
            low_shelf_db: settings.low_freq,
        }
    }
}

impl Default for DerivedParams {
    /// Neutral node values: unity gain, centered, flat shelves.
    fn default() -> Self {
        Self {
            gain: 1.0,
            pan: 0.0,
            high_shelf_db: 0.0,
            low_shelf_db: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_settings_layer() {
        let s = AudioSettings::default();
        assert_eq!(s.master_volume(), 50.0);
        assert_eq!(s.high_freq(), 0.0);
        assert_eq!(s.low_freq(), 0.0);
        assert_eq!(s.balance(), 0.0);
        assert_eq!(s.preset(), "normal");
    }

    #[test]
    fn new_clamps_each_field_independently() {
        let s = AudioSettings::new(-5.0, 40.0, -40.0, 250.0);
        assert_eq!(s.master_volume(), 0.0);
        assert_eq!(s.high_freq(), 20.0);
        assert_eq!(s.low_freq(), -20.0);
        assert_eq!(s.balance(), 100.0);
    }

    #[test]
    fn nan_is_replaced() {
        let s = AudioSettings::new(f32::NAN, f32::NAN, 3.0, f32::NAN);
        assert_eq!(s.master_volume(), 50.0);
        assert_eq!(s.high_freq(), 0.0);
        assert_eq!(s.low_freq(), 3.0);
        assert_eq!(s.balance(), 0.0);

        let kept = s.with_high_freq(f32::NAN);
        assert_eq!(kept.high_freq(), 0.0);
    }

    #[test]
    fn derived_values() {
        let street = AudioSettings::new(70.0, 15.0, 5.0, 0.0);
        let d = street.derive();
        assert!((d.gain - 0.70).abs() < 1e-6);
        assert_eq!(d.high_shelf_db, 15.0);
        assert_eq!(d.low_shelf_db, 5.0);
        assert_eq!(d.pan, 0.0);
    }

    #[test]
    fn balance_extremes_map_to_full_pan() {
        assert_eq!(AudioSettings::default().with_balance(-100.0).derive().pan, -1.0);
        assert_eq!(AudioSettings::default().with_balance(100.0).derive().pan, 1.0);
    }

    #[test]
    fn preset_label_does_not_change_derivation() {
        let a = AudioSettings::new(40.0, 10.0, -5.0, 0.0);
        let b = a.clone().with_preset("quiet");
        assert_eq!(a.derive(), b.derive());
        assert_eq!(b.preset(), "quiet");
    }
}
