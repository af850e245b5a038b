//! Master volume stage.
//!
//! The gain stage sits after both shelves, so equalizer boosts and the
//! master volume stay independent: the stage only multiplies by a linear
//! factor in `0.0..=1.0` (`master_volume / 100`).

use crate::{Effect, SmoothedParam};

/// Upper bound of the gain multiplier (100% volume = unity).
pub const MAX_GAIN: f32 = 1.0;

/// Linear gain with a smoothed multiplier.
#[derive(Debug, Clone)]
pub struct GainStage {
    gain: SmoothedParam,
}

impl GainStage {
    /// Create a gain stage at unity.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            gain: SmoothedParam::standard(1.0, sample_rate),
        }
    }

    /// Set the linear gain target, clamped to `0.0..=MAX_GAIN`.
    #[inline]
    pub fn set_gain(&mut self, gain: f32) {
        self.gain.set_target(gain.clamp(0.0, MAX_GAIN));
    }

    /// Set the gain and skip the ramp.
    pub fn set_gain_immediate(&mut self, gain: f32) {
        self.set_gain(gain);
        self.gain.snap_to_target();
    }

    /// Change the ramp time.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.gain.set_smoothing_time_ms(time_ms);
    }

    /// Gain target.
    #[inline]
    pub fn gain(&self) -> f32 {
        self.gain.target()
    }
}

impl Effect for GainStage {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let g = self.gain.advance();
        (left * g, right * g)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.gain.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.gain.snap_to_target();
    }
}
