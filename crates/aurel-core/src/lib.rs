//! Per-sample signal shaping for aurel.
//!
//! Everything that runs inside the audio callback lives here, next to the
//! settings type that configures it. The processing path never allocates.
//!
//! The chain is fixed: high shelf at [`HIGH_SHELF_HZ`], low shelf at
//! [`LOW_SHELF_HZ`], master [`GainStage`], then the equal-power [`Panner`].
//! [`SignalChain`] owns all four; [`AudioSettings::derive`] turns user values
//! into the [`DerivedParams`] it consumes, and each stage ramps toward new
//! values through a [`SmoothedParam`].
//!
//! Building with `default-features = false` gives a `no_std` crate; `serde`
//! adds (de)serialization of [`AudioSettings`].
//!
//! ```rust
//! use aurel_core::{AudioSettings, Effect, SignalChain};
//!
//! let street = AudioSettings::new(70.0, 15.0, 5.0, 0.0);
//! let mut chain = SignalChain::new(48000.0, true);
//! chain.snap_to_params(&street.derive());
//!
//! let (left, right) = chain.process_stereo(0.25, 0.25);
//! assert!(left.is_finite() && right.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod chain;
pub mod effect;
pub mod gain;
pub mod math;
pub mod pan;
pub mod param;
pub mod settings;
pub mod shelf;

pub use biquad::{
    Biquad, Coefficients, Corner, high_shelf_at, high_shelf_coefficients, low_shelf_at,
    low_shelf_coefficients,
};
pub use chain::SignalChain;
pub use effect::Effect;
pub use gain::{GainStage, MAX_GAIN};
pub use math::{db_to_linear, flush_denormal, linear_to_db, mono_sum};
pub use pan::Panner;
pub use param::{STANDARD_SMOOTHING_MS, SmoothedParam};
pub use settings::{
    AudioSettings, BALANCE_RANGE, DEFAULT_PRESET, DerivedParams, HIGH_SHELF_HZ, LOW_SHELF_HZ,
    SHELF_RANGE_DB, VOLUME_RANGE,
};
pub use shelf::{ShelfFilter, ShelfKind};
