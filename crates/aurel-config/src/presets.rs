//! Factory presets bundled with aurel.
//!
//! Four listening situations ship with the library. Each is embedded as a
//! TOML settings table and parsed on demand through the same serde path as
//! the persisted settings file, so a preset and a saved file can never drift
//! apart in format.

use crate::ConfigError;
use aurel_core::AudioSettings;

/// Factory preset names, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &["normal", "quiet", "street", "tv"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("normal", NORMAL_PRESET),
    ("quiet", QUIET_PRESET),
    ("street", STREET_PRESET),
    ("tv", TV_PRESET),
];

/// Flat response at half volume.
const NORMAL_PRESET: &str = r#"
masterVolume = 50.0
highFreq = 0.0
lowFreq = 0.0
balance = 0.0
preset = "normal"
"#;

/// Quiet room: lift speech presence, trim rumble, keep the level down.
const QUIET_PRESET: &str = r#"
masterVolume = 40.0
highFreq = 10.0
lowFreq = -5.0
balance = 0.0
preset = "quiet"
"#;

/// Street noise: strong presence boost at a higher level.
const STREET_PRESET: &str = r#"
masterVolume = 70.0
highFreq = 15.0
lowFreq = 5.0
balance = 0.0
preset = "street"
"#;

/// Television: mild treble lift for dialogue.
const TV_PRESET: &str = r#"
masterVolume = 60.0
highFreq = 5.0
lowFreq = 0.0
balance = 0.0
preset = "tv"
"#;

/// All factory presets as `(name, settings)` pairs, in display order.
pub fn factory_presets() -> Vec<(&'static str, AudioSettings)> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(name, content)| parse(name, content).map(|s| (*name, s)))
        .collect()
}

/// Get a factory preset by name (case-insensitive).
pub fn get_factory_preset(name: &str) -> Option<AudioSettings> {
    FACTORY_PRESETS_TOML
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .and_then(|(n, content)| parse(n, content))
}

/// Like [`get_factory_preset`], but an unknown name is an error.
pub fn preset(name: &str) -> Result<AudioSettings, ConfigError> {
    get_factory_preset(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
}

/// Check whether a name refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESET_NAMES
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}

fn parse(name: &str, content: &str) -> Option<AudioSettings> {
    match toml::from_str(content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::error!(preset = name, error = %e, "factory preset failed to parse");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_factory_presets_parse() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESET_NAMES.len());
        for ((name, settings), expected) in presets.iter().zip(FACTORY_PRESET_NAMES) {
            assert_eq!(name, expected);
            assert_eq!(settings.preset(), *expected);
        }
    }

    #[test]
    fn preset_values_match_listening_situations() {
        let quiet = preset("quiet").unwrap();
        assert_eq!(quiet.master_volume(), 40.0);
        assert_eq!(quiet.high_freq(), 10.0);
        assert_eq!(quiet.low_freq(), -5.0);
        assert_eq!(quiet.balance(), 0.0);

        let street = preset("street").unwrap();
        assert_eq!(street.master_volume(), 70.0);
        assert_eq!(street.high_freq(), 15.0);
        assert_eq!(street.low_freq(), 5.0);

        let tv = preset("tv").unwrap();
        assert_eq!(tv.master_volume(), 60.0);
        assert_eq!(tv.high_freq(), 5.0);
        assert_eq!(tv.low_freq(), 0.0);
    }

    #[test]
    fn normal_matches_defaults() {
        assert_eq!(preset("normal").unwrap(), AudioSettings::default());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(get_factory_preset("STREET").is_some());
        assert!(is_factory_preset("Tv"));
        assert!(!is_factory_preset("concert"));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(matches!(
            preset("concert"),
            Err(ConfigError::UnknownPreset(name)) if name == "concert"
        ));
    }
}
