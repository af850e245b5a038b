//! Shelving tone-control stage.
//!
//! A [`ShelfFilter`] boosts or cuts everything below (low shelf) or above
//! (high shelf) a fixed corner by a constant gain. The corner never moves;
//! only the gain is a live parameter. Gain changes ramp through a
//! [`SmoothedParam`] and the coefficients follow the ramp, so a slider drag
//! never steps the filter response.

use crate::biquad::{Biquad, Corner, high_shelf_at, low_shelf_at};
use crate::settings::{HIGH_SHELF_HZ, LOW_SHELF_HZ, SHELF_RANGE_DB};
use crate::{Effect, SmoothedParam};

/// Which side of the corner the shelf acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelfKind {
    /// Gain applies below the corner.
    Low,
    /// Gain applies above the corner.
    High,
}

/// Stereo shelving filter with a fixed corner and a smoothed gain.
#[derive(Debug, Clone)]
pub struct ShelfFilter {
    kind: ShelfKind,
    frequency: f32,
    corner: Corner,
    gain_db: SmoothedParam,
    /// Gain the current coefficients were computed for.
    applied_db: f32,
    left: Biquad,
    right: Biquad,
}

impl ShelfFilter {
    /// Create a flat (0 dB) shelf at `frequency` Hz.
    pub fn new(kind: ShelfKind, frequency: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            kind,
            frequency,
            corner: Corner::new(frequency, sample_rate),
            gain_db: SmoothedParam::standard(0.0, sample_rate),
            applied_db: 0.0,
            left: Biquad::new(),
            right: Biquad::new(),
        };
        filter.update_coefficients(0.0);
        filter
    }

    /// High shelf at the chain's fixed 3 kHz corner.
    pub fn high(sample_rate: f32) -> Self {
        Self::new(ShelfKind::High, HIGH_SHELF_HZ, sample_rate)
    }

    /// Low shelf at the chain's fixed 300 Hz corner.
    pub fn low(sample_rate: f32) -> Self {
        Self::new(ShelfKind::Low, LOW_SHELF_HZ, sample_rate)
    }

    /// Shelf side.
    pub fn kind(&self) -> ShelfKind {
        self.kind
    }

    /// Corner frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set the shelf gain target in dB, clamped to ±20 dB.
    pub fn set_gain_db(&mut self, gain_db: f32) {
        let (min, max) = SHELF_RANGE_DB;
        self.gain_db.set_target(gain_db.clamp(min, max));
    }

    /// Set the shelf gain and jump straight to it.
    pub fn set_gain_db_immediate(&mut self, gain_db: f32) {
        self.set_gain_db(gain_db);
        self.gain_db.snap_to_target();
        self.update_coefficients(self.gain_db.get());
    }

    /// Change the gain ramp time.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.gain_db.set_smoothing_time_ms(time_ms);
    }

    /// Gain target in dB (what the stage is ramping toward).
    pub fn gain_db(&self) -> f32 {
        self.gain_db.target()
    }

    fn update_coefficients(&mut self, gain_db: f32) {
        let coefficients = match self.kind {
            ShelfKind::Low => low_shelf_at(self.corner, gain_db),
            ShelfKind::High => high_shelf_at(self.corner, gain_db),
        };
        self.left.set(coefficients);
        self.right.set(coefficients);
        self.applied_db = gain_db;
    }
}

impl Effect for ShelfFilter {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let gain_db = self.gain_db.advance();
        if (gain_db - self.applied_db).abs() > 1e-4 {
            self.update_coefficients(gain_db);
        }
        (self.left.process(left), self.right.process(right))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.corner = Corner::new(self.frequency, sample_rate);
        self.gain_db.set_sample_rate(sample_rate);
        self.update_coefficients(self.gain_db.get());
    }

    fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
        self.gain_db.snap_to_target();
        self.update_coefficients(self.gain_db.get());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db_to_linear;

    fn settle_dc(filter: &mut ShelfFilter, samples: usize) -> f32 {
        let mut out = 0.0;
        for _ in 0..samples {
            out = filter.process_stereo(1.0, 1.0).0;
        }
        out
    }

    #[test]
    fn flat_by_default() {
        let mut filter = ShelfFilter::low(48000.0);
        assert_eq!(filter.gain_db(), 0.0);
        assert!((settle_dc(&mut filter, 2000) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn low_shelf_ramps_to_target_gain() {
        let mut filter = ShelfFilter::low(48000.0);
        filter.set_gain_db(6.0);
        let out = settle_dc(&mut filter, 8000);
        assert!((out - db_to_linear(6.0)).abs() < 0.02, "got {out}");
    }

    #[test]
    fn high_shelf_leaves_dc_alone() {
        let mut filter = ShelfFilter::high(48000.0);
        filter.set_gain_db_immediate(15.0);
        let out = settle_dc(&mut filter, 4000);
        assert!((out - 1.0).abs() < 0.02, "got {out}");
    }

    #[test]
    fn high_shelf_boosts_nyquist() {
        let mut filter = ShelfFilter::high(48000.0);
        filter.set_gain_db_immediate(12.0);
        let mut peak = 0.0_f32;
        for i in 0..4000 {
            let x = if i % 2 == 0 { 0.1 } else { -0.1 };
            let (l, _) = filter.process_stereo(x, x);
            if i > 3000 {
                peak = peak.max(l.abs());
            }
        }
        assert!((peak - 0.1 * db_to_linear(12.0)).abs() < 0.01, "got {peak}");
    }

    #[test]
    fn gain_is_clamped() {
        let mut filter = ShelfFilter::high(48000.0);
        filter.set_gain_db(45.0);
        assert_eq!(filter.gain_db(), 20.0);
        filter.set_gain_db(-45.0);
        assert_eq!(filter.gain_db(), -20.0);
    }

    #[test]
    fn channels_are_independent() {
        let mut filter = ShelfFilter::low(48000.0);
        filter.set_gain_db_immediate(-6.0);
        for _ in 0..4000 {
            let (_, r) = filter.process_stereo(1.0, 0.0);
            assert_eq!(r, 0.0);
        }
    }

    #[test]
    fn reset_clears_history() {
        let mut filter = ShelfFilter::low(48000.0);
        filter.set_gain_db_immediate(10.0);
        settle_dc(&mut filter, 100);
        filter.reset();
        let (l, r) = filter.process_stereo(0.0, 0.0);
        assert_eq!((l, r), (0.0, 0.0));
    }
}
