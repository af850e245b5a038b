//! Level conversions and small sample helpers.
//!
//! Allocation-free and `no_std`.

use core::f32::consts::LN_10;
use libm::{expf, logf};

/// Floor applied before taking a logarithm; maps to -200 dB.
const LOG_FLOOR: f32 = 1e-10;

/// Decibels to a linear amplitude factor.
///
/// ```rust
/// use aurel_core::db_to_linear;
///
/// assert!((db_to_linear(20.0) - 10.0).abs() < 1e-3);
/// assert!((db_to_linear(-6.0206) - 0.5).abs() < 1e-3);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    expf(db * (LN_10 / 20.0))
}

/// Linear amplitude to decibels. Silence reads as -200 dB, never `-inf`.
///
/// ```rust
/// use aurel_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-3);
/// assert!((linear_to_db(0.0) + 200.0).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    logf(linear.max(LOG_FLOOR)) * (20.0 / LN_10)
}

/// Zero out values small enough to drift into the subnormal range.
///
/// Filter state decaying toward zero otherwise lands on subnormals, which
/// are very slow on most CPUs.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Average of two channels.
#[inline]
pub fn mono_sum(left: f32, right: f32) -> f32 {
    0.5 * (left + right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_conversions_invert_each_other() {
        for db in [-60.0, -20.0, -6.0, 0.0, 6.0, 20.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 1e-3, "{db} dB came back as {back}");
        }
    }

    #[test]
    fn shelf_extremes_map_to_tenfold() {
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-3);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-5);
    }

    #[test]
    fn silence_is_floored() {
        assert!(linear_to_db(0.0).is_finite());
        assert!(linear_to_db(-1.0).is_finite());
    }

    #[test]
    fn subnormals_flush() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(0.25), 0.25);
    }

    #[test]
    fn mono_sum_averages() {
        assert_eq!(mono_sum(1.0, 0.0), 0.5);
        assert_eq!(mono_sum(-0.5, 0.5), 0.0);
    }
}
