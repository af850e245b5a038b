//! Second-order IIR section and the shelf designs that drive it.
//!
//! Shelf coefficients follow the RBJ Audio EQ Cookbook with slope `S = 1`,
//! the steepest shelf that does not overshoot.

use core::f32::consts::{FRAC_1_SQRT_2, TAU};
use libm::{cosf, powf, sinf, sqrtf};

/// Unnormalized `(b0, b1, b2, a0, a1, a2)` as the cookbook writes them.
pub type Coefficients = (f32, f32, f32, f32, f32, f32);

/// Biquad in transposed direct form II.
///
/// ```text
/// y  = b0*x + s1
/// s1 = b1*x - a1*y + s2
/// s2 = b2*x - a2*y
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    /// `[b0, b1, b2]`, divided by a0.
    b: [f32; 3],
    /// `[a1, a2]`, divided by a0.
    a: [f32; 2],
    s1: f32,
    s2: f32,
}

impl Biquad {
    /// A section that passes its input through unchanged.
    pub fn new() -> Self {
        Self {
            b: [1.0, 0.0, 0.0],
            a: [0.0, 0.0],
            s1: 0.0,
            s2: 0.0,
        }
    }

    /// Load raw coefficients; they are normalized by `a0` here.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        let norm = 1.0 / a0;
        self.b = [b0 * norm, b1 * norm, b2 * norm];
        self.a = [a1 * norm, a2 * norm];
    }

    /// [`set_coefficients`](Self::set_coefficients) from a design tuple.
    #[inline]
    pub fn set(&mut self, (b0, b1, b2, a0, a1, a2): Coefficients) {
        self.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let [b0, b1, b2] = self.b;
        let [a1, a2] = self.a;
        let y = b0 * x + self.s1;
        self.s1 = crate::flush_denormal(b1 * x - a1 * y + self.s2);
        self.s2 = crate::flush_denormal(b2 * x - a2 * y);
        y
    }

    /// Forget past samples; coefficients stay.
    pub fn clear(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Trig terms of a fixed corner frequency.
///
/// Shelf corners never move, so only the gain terms are redesigned while a
/// gain ramps.
#[derive(Debug, Clone, Copy)]
pub struct Corner {
    cos_w: f32,
    sin_w: f32,
}

impl Corner {
    /// Corner at `frequency` Hz, kept strictly below Nyquist.
    pub fn new(frequency: f32, sample_rate: f32) -> Self {
        let w = TAU * frequency.clamp(1.0, sample_rate * 0.499) / sample_rate;
        Self {
            cos_w: cosf(w),
            sin_w: sinf(w),
        }
    }
}

/// Low shelf: `gain_db` below `frequency`, unity above.
pub fn low_shelf_coefficients(frequency: f32, gain_db: f32, sample_rate: f32) -> Coefficients {
    low_shelf_at(Corner::new(frequency, sample_rate), gain_db)
}

/// High shelf: unity below `frequency`, `gain_db` above.
pub fn high_shelf_coefficients(frequency: f32, gain_db: f32, sample_rate: f32) -> Coefficients {
    high_shelf_at(Corner::new(frequency, sample_rate), gain_db)
}

/// Low shelf for a precomputed corner.
pub fn low_shelf_at(corner: Corner, gain_db: f32) -> Coefficients {
    shelf(corner, gain_db, 1.0)
}

/// High shelf for a precomputed corner.
pub fn high_shelf_at(corner: Corner, gain_db: f32) -> Coefficients {
    shelf(corner, gain_db, -1.0)
}

// The two cookbook shelves differ only in the sign of every cos(w) term
// and of b1/a1, which `sign` folds in (+1 low, -1 high).
fn shelf(corner: Corner, gain_db: f32, sign: f32) -> Coefficients {
    let a = powf(10.0, gain_db / 40.0);
    let c = sign * corner.cos_w;
    // alpha = sin(w)/2 * sqrt(2) when S = 1
    let k = 2.0 * sqrtf(a) * corner.sin_w * FRAC_1_SQRT_2;
    let (ap, am) = (a + 1.0, a - 1.0);

    (
        a * (ap - am * c + k),
        sign * 2.0 * a * (am - ap * c),
        a * (ap - am * c - k),
        ap + am * c + k,
        -sign * 2.0 * (am + ap * c),
        ap + am * c - k,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db_to_linear;

    /// |H| at DC: sum(b) / sum(a).
    fn dc_gain((b0, b1, b2, a0, a1, a2): Coefficients) -> f32 {
        (b0 + b1 + b2) / (a0 + a1 + a2)
    }

    /// |H| at Nyquist.
    fn nyquist_gain((b0, b1, b2, a0, a1, a2): Coefficients) -> f32 {
        ((b0 - b1 + b2) / (a0 - a1 + a2)).abs()
    }

    #[test]
    fn new_section_is_transparent() {
        let mut filter = Biquad::new();
        for i in 0..10 {
            let x = i as f32 * 0.1;
            assert!((filter.process(x) - x).abs() < 1e-6);
        }
    }

    #[test]
    fn clear_forgets_history() {
        let coeffs = low_shelf_coefficients(300.0, 12.0, 48000.0);
        let mut filter = Biquad::new();
        filter.set(coeffs);
        for _ in 0..10 {
            filter.process(1.0);
        }
        filter.clear();
        assert_eq!((filter.s1, filter.s2), (0.0, 0.0));

        let mut fresh = Biquad::new();
        fresh.set(coeffs);
        assert_eq!(filter.process(0.5), fresh.process(0.5));
    }

    #[test]
    fn designs_stay_finite_over_the_tone_range() {
        for gain in [-20.0, -6.0, 0.0, 6.0, 20.0] {
            for (b0, b1, b2, a0, a1, a2) in [
                low_shelf_coefficients(300.0, gain, 48000.0),
                high_shelf_coefficients(3000.0, gain, 48000.0),
            ] {
                assert!([b0, b1, b2, a0, a1, a2].iter().all(|c| c.is_finite()), "{gain} dB");
            }
        }
    }

    #[test]
    fn low_shelf_lifts_dc_only() {
        let coeffs = low_shelf_coefficients(300.0, 12.0, 48000.0);
        assert!((dc_gain(coeffs) - db_to_linear(12.0)).abs() < 0.01);
        assert!((nyquist_gain(coeffs) - 1.0).abs() < 0.01);
    }

    #[test]
    fn high_shelf_cuts_nyquist_only() {
        let coeffs = high_shelf_coefficients(3000.0, -9.0, 48000.0);
        assert!((dc_gain(coeffs) - 1.0).abs() < 0.01);
        assert!((nyquist_gain(coeffs) - db_to_linear(-9.0)).abs() < 0.01);
    }

    #[test]
    fn flat_shelves_pass_signal_unchanged() {
        let mut low = Biquad::new();
        low.set(low_shelf_coefficients(300.0, 0.0, 44100.0));
        let mut high = Biquad::new();
        high.set(high_shelf_coefficients(3000.0, 0.0, 44100.0));

        for i in 0..256 {
            let x = libm::sinf(i as f32 * 0.37);
            assert!((low.process(x) - x).abs() < 1e-4);
            assert!((high.process(x) - x).abs() < 1e-4);
        }
    }

    #[test]
    fn low_shelf_settles_at_its_gain_for_dc() {
        let mut filter = Biquad::new();
        filter.set(low_shelf_coefficients(300.0, 6.0, 48000.0));
        let mut y = 0.0;
        for _ in 0..4000 {
            y = filter.process(1.0);
        }
        assert!((y - db_to_linear(6.0)).abs() < 0.02, "settled at {y}");
    }
}
