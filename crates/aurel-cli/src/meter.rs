//! Terminal rendering of the eight-band level meter.

use aurel_analysis::{AudioLevels, BAND_LABELS};
use serde::Serialize;

/// Display zone of one band level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// At or below 0.4.
    Normal,
    /// Above 0.4.
    Medium,
    /// Above 0.7.
    Loud,
}

impl Zone {
    /// Classify a normalized level.
    pub fn of(level: f32) -> Self {
        if level > 0.7 {
            Zone::Loud
        } else if level > 0.4 {
            Zone::Medium
        } else {
            Zone::Normal
        }
    }

    fn glyph(self) -> char {
        match self {
            Zone::Normal => '▮',
            Zone::Medium => '▰',
            Zone::Loud => '█',
        }
    }
}

/// A bar of `width` cells filled in proportion to `level`.
pub fn bar(level: f32, width: usize) -> String {
    let level = level.clamp(0.0, 1.0);
    let filled = ((level * width as f32).round() as usize).min(width);
    let glyph = Zone::of(level).glyph();
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat_n(glyph, filled));
    out.extend(std::iter::repeat_n('·', width - filled));
    out
}

/// One line with every band: `60Hz ▮▮··  170Hz ...`.
pub fn render(levels: &AudioLevels, width: usize) -> String {
    levels
        .labeled()
        .map(|(label, level)| format!("{label:>5} {}", bar(level, width)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Machine-readable form of one tick.
#[derive(Debug, Serialize)]
pub struct LevelsRecord {
    /// Band labels, low to high.
    pub bands: [&'static str; 8],
    /// Normalized levels, same order.
    pub levels: [f32; 8],
    /// Zone of each level.
    pub zones: [Zone; 8],
}

impl From<&AudioLevels> for LevelsRecord {
    fn from(levels: &AudioLevels) -> Self {
        let values: [f32; 8] = (*levels).into();
        Self {
            bands: BAND_LABELS,
            levels: values,
            zones: values.map(Zone::of),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_follow_thresholds() {
        assert_eq!(Zone::of(0.0), Zone::Normal);
        assert_eq!(Zone::of(0.4), Zone::Normal);
        assert_eq!(Zone::of(0.41), Zone::Medium);
        assert_eq!(Zone::of(0.7), Zone::Medium);
        assert_eq!(Zone::of(0.71), Zone::Loud);
    }

    #[test]
    fn bar_has_fixed_width() {
        for level in [0.0, 0.25, 0.5, 0.99, 1.0, 3.0, -1.0] {
            assert_eq!(bar(level, 10).chars().count(), 10);
        }
        assert_eq!(bar(1.0, 4), "████");
        assert_eq!(bar(0.0, 3), "···");
    }

    #[test]
    fn render_lists_all_bands() {
        let line = render(&AudioLevels::silent(), 4);
        for label in BAND_LABELS {
            assert!(line.contains(label), "missing {label} in {line}");
        }
    }

    #[test]
    fn record_serializes_zones_lowercase() {
        let levels = AudioLevels::new([0.1, 0.5, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let json = serde_json::to_string(&LevelsRecord::from(&levels)).unwrap();
        assert!(json.contains("\"zones\":[\"normal\",\"medium\",\"loud\""), "got: {json}");
        assert!(json.contains("\"1kHz\""), "got: {json}");
    }
}
