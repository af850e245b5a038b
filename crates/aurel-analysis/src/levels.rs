//! Banded level snapshots and their cross-thread publisher.
//!
//! The analyzer thread is the only writer; any number of display readers
//! take the latest snapshot. Publishing swaps an `Arc` (last write wins),
//! so readers never block the writer and stale frames are simply dropped.

use arc_swap::ArcSwap;
use std::sync::Arc;

/// Number of meter bands.
pub const BAND_COUNT: usize = 8;

/// Display labels of the meter bands, in order.
pub const BAND_LABELS: [&str; BAND_COUNT] = [
    "60Hz", "170Hz", "310Hz", "600Hz", "1kHz", "3kHz", "6kHz", "12kHz",
];

/// Eight normalized band magnitudes, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioLevels([f32; BAND_COUNT]);

impl AudioLevels {
    /// All bands at zero (idle meter).
    pub const fn silent() -> Self {
        Self([0.0; BAND_COUNT])
    }

    /// Build from raw band values, clamping each into `0.0..=1.0`.
    ///
    /// NaN maps to zero.
    pub fn new(bands: [f32; BAND_COUNT]) -> Self {
        Self(bands.map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }))
    }

    /// Band values as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Value of band `index`, or `None` past the last band.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }

    /// `(label, value)` pairs in band order.
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        BAND_LABELS.iter().copied().zip(self.0.iter().copied())
    }

    /// Largest band value.
    pub fn peak(&self) -> f32 {
        self.0.iter().copied().fold(0.0, f32::max)
    }

    /// Whether every band is zero.
    pub fn is_silent(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }
}

impl From<AudioLevels> for [f32; BAND_COUNT] {
    fn from(levels: AudioLevels) -> Self {
        levels.0
    }
}

/// Copy-on-publish holder of the latest [`AudioLevels`].
///
/// Cloning yields another handle to the same slot.
#[derive(Debug, Clone)]
pub struct LevelMeter {
    slot: Arc<ArcSwap<AudioLevels>>,
}

impl LevelMeter {
    /// Create a meter showing silence.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(ArcSwap::from_pointee(AudioLevels::silent())),
        }
    }

    /// Replace the published snapshot.
    pub fn publish(&self, levels: AudioLevels) {
        self.slot.store(Arc::new(levels));
    }

    /// Latest published snapshot.
    pub fn latest(&self) -> AudioLevels {
        **self.slot.load()
    }

    /// Publish silence.
    pub fn reset(&self) {
        self.publish(AudioLevels::silent());
    }
}

impl Default for LevelMeter {
    fn default() -> Self {
        Self::new()
    }
}
