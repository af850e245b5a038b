//! Equal-power stereo panner.
//!
//! Position runs linearly from -1.0 (full left) through 0.0 (center) to
//! 1.0 (full right). Two laws are supported, selected by the capture
//! channel count:
//!
//! - **Mono source**: `θ = (pan + 1) · π/4`, `L = x·cos θ`, `R = x·sin θ`.
//!   Center sits at -3 dB per side.
//! - **Stereo source**: at `pan ≤ 0` the right channel is folded into the
//!   left with `θ = (pan + 1) · π/2`; at `pan > 0` the left channel is folded
//!   into the right with `θ = pan · π/2`. Center passes both channels through.

use crate::{Effect, SmoothedParam};
use core::f32::consts::FRAC_PI_2;
use libm::{cosf, sinf};

/// Smoothed stereo panner.
#[derive(Debug, Clone)]
pub struct Panner {
    pan: SmoothedParam,
    mono_source: bool,
    /// Pan value the cached gains belong to.
    cached_pan: f32,
    cos_gain: f32,
    sin_gain: f32,
}

impl Panner {
    /// Create a centered panner.
    ///
    /// `mono_source` selects the mono law; the left input carries the signal
    /// and the right input is ignored.
    pub fn new(sample_rate: f32, mono_source: bool) -> Self {
        let mut panner = Self {
            pan: SmoothedParam::standard(0.0, sample_rate),
            mono_source,
            cached_pan: f32::NAN,
            cos_gain: 0.0,
            sin_gain: 0.0,
        };
        panner.update_gains(0.0);
        panner
    }

    /// Set the pan target, clamped to `-1.0..=1.0`.
    #[inline]
    pub fn set_pan(&mut self, pan: f32) {
        self.pan.set_target(pan.clamp(-1.0, 1.0));
    }

    /// Set the pan position and skip the ramp.
    pub fn set_pan_immediate(&mut self, pan: f32) {
        self.set_pan(pan);
        self.pan.snap_to_target();
    }

    /// Change the ramp time.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.pan.set_smoothing_time_ms(time_ms);
    }

    /// Pan target.
    #[inline]
    pub fn pan(&self) -> f32 {
        self.pan.target()
    }

    /// Whether the mono law is active.
    pub fn is_mono_source(&self) -> bool {
        self.mono_source
    }

    fn update_gains(&mut self, pan: f32) {
        let x = if self.mono_source {
            (pan + 1.0) * 0.5
        } else if pan <= 0.0 {
            pan + 1.0
        } else {
            pan
        };
        self.cos_gain = cosf(x * FRAC_PI_2);
        self.sin_gain = sinf(x * FRAC_PI_2);
        self.cached_pan = pan;
    }
}

impl Effect for Panner {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let pan = self.pan.advance();
        if pan != self.cached_pan {
            self.update_gains(pan);
        }

        if self.mono_source {
            (left * self.cos_gain, left * self.sin_gain)
        } else if pan <= 0.0 {
            (left + right * self.cos_gain, right * self.sin_gain)
        } else {
            (left * self.cos_gain, right + left * self.sin_gain)
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.pan.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.pan.snap_to_target();
    }
}
