//! Parameter smoothing for click-free live adjustments.
//!
//! Settings arrive from the UI at slider-drag rate, far below audio rate.
//! Jumping a gain or pan value between two samples produces an audible
//! click ("zipper noise"), so every shaping stage ramps toward its newest
//! target with a one-pole lowpass.
//!
//! ```rust
//! use aurel_core::SmoothedParam;
//!
//! let mut gain = SmoothedParam::standard(0.5, 48000.0);
//! gain.set_target(0.7);
//!
//! // In the audio callback, advance once per sample
//! for _ in 0..480 {
//!     let _g = gain.advance();
//! }
//! assert!(gain.get() > 0.6);
//! ```

use libm::expf;

/// Smoothing time used by every stage in the signal chain.
pub const STANDARD_SMOOTHING_MS: f32 = 10.0;

/// One-pole ramp toward a target value.
///
/// `advance` is called once per sample on the audio thread; the setters are
/// called from the same thread when a new parameter snapshot is picked up.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    value: f32,
    target: f32,
    /// Fraction of the remaining distance covered per sample. 1.0 jumps.
    step: f32,
    sample_rate: f32,
    time_ms: f32,
}

impl SmoothedParam {
    /// Ramp with time constant `time_ms` at `sample_rate`. A zero time
    /// makes every change instant.
    pub fn new(initial: f32, sample_rate: f32, time_ms: f32) -> Self {
        let mut param = Self {
            value: initial,
            target: initial,
            step: 1.0,
            sample_rate,
            time_ms,
        };
        param.update_step();
        param
    }

    /// Ramp with [`STANDARD_SMOOTHING_MS`].
    pub fn standard(initial: f32, sample_rate: f32) -> Self {
        Self::new(initial, sample_rate, STANDARD_SMOOTHING_MS)
    }

    /// Start ramping toward `target`.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` with no ramp.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.value = value;
    }

    /// Finish the current ramp at once.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.value = self.target;
    }

    /// Change the sample rate, keeping the time constant.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_step();
    }

    /// Change the time constant. Zero disables smoothing.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.time_ms = time_ms;
        self.update_step();
    }

    /// Move one sample along the ramp and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let remaining = self.target - self.value;
        let next = self.value + self.step * remaining;
        // Snap once the step drops below f32 resolution, or the ramp stalls.
        self.value = if remaining.abs() < 1e-6 || next == self.value {
            self.target
        } else {
            next
        };
        self.value
    }

    /// Value at the current position of the ramp.
    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Where the ramp is heading.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the ramp has arrived.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }

    // step = 1 - e^(-1 / (tau * fs)); within 0.7% of target after 5 tau.
    fn update_step(&mut self) {
        self.step = if self.time_ms > 0.0 && self.sample_rate > 0.0 {
            let tau_samples = self.time_ms * 0.001 * self.sample_rate;
            1.0 - expf(-1.0 / tau_samples)
        } else {
            1.0
        };
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0, 48000.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_time_jumps() {
        let mut param = SmoothedParam::new(1.0, 48000.0, 0.0);
        param.set_target(0.5);
        assert_eq!(param.advance(), 0.5);
        assert!(param.is_settled());
    }

    #[test]
    fn reaches_target_within_five_time_constants() {
        let mut param = SmoothedParam::standard(0.0, 48000.0);
        param.set_target(1.0);
        for _ in 0..2400 {
            param.advance();
        }
        assert!((param.get() - 1.0).abs() < 0.01, "got {}", param.get());
    }

    #[test]
    fn one_time_constant_covers_63_percent() {
        let mut param = SmoothedParam::new(0.0, 48000.0, 10.0);
        param.set_target(1.0);
        for _ in 0..480 {
            param.advance();
        }
        let expected = 1.0 - expf(-1.0);
        assert!((param.get() - expected).abs() < 0.05, "got {}", param.get());
    }

    #[test]
    fn sample_rate_change_keeps_time_constant() {
        let mut param = SmoothedParam::standard(0.0, 48000.0);
        param.set_sample_rate(96000.0);
        param.set_target(1.0);
        for _ in 0..960 {
            param.advance();
        }
        assert!((param.get() - (1.0 - expf(-1.0))).abs() < 0.05);
    }

    #[test]
    fn first_step_is_small() {
        let mut param = SmoothedParam::standard(0.0, 48000.0);
        param.set_target(1.0);
        let first = param.advance();
        assert!(first > 0.0 && first < 0.01, "first step {first}");
    }

    #[test]
    fn set_immediate_skips_ramp() {
        let mut param = SmoothedParam::standard(0.0, 48000.0);
        param.set_immediate(0.7);
        assert_eq!(param.get(), 0.7);
        assert!(param.is_settled());
    }
}
