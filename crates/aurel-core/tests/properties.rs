//! Property-based tests for aurel-core.
//!
//! Tests shelf stability, settings clamping, and derived parameter ranges
//! using proptest for randomized input generation.

use aurel_core::{
    AudioSettings, Biquad, Effect, SignalChain, SmoothedParam, high_shelf_coefficients,
    low_shelf_coefficients,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any shelf gain in the settings range and any corner in the audible
    /// band, both shelf types produce finite output for random finite input.
    #[test]
    fn shelf_stability(
        freq in 20.0f32..20000.0f32,
        gain_db in -20.0f32..=20.0f32,
        high in any::<bool>(),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut biquad = Biquad::new();
        let coefficients = if high {
            high_shelf_coefficients(freq, gain_db, 48000.0)
        } else {
            low_shelf_coefficients(freq, gain_db, 48000.0)
        };
        biquad.set(coefficients);

        for _ in 0..32 {
            for &sample in &input {
                let out = biquad.process(sample);
                prop_assert!(out.is_finite(), "non-finite output at {freq} Hz, {gain_db} dB");
            }
        }
    }

    /// Whatever raw values come in, every field lands inside its range.
    #[test]
    fn settings_always_clamped(
        volume in -1000.0f32..1000.0f32,
        high in -1000.0f32..1000.0f32,
        low in -1000.0f32..1000.0f32,
        balance in -1000.0f32..1000.0f32,
    ) {
        let s = AudioSettings::new(volume, high, low, balance);
        prop_assert!((0.0..=100.0).contains(&s.master_volume()));
        prop_assert!((-20.0..=20.0).contains(&s.high_freq()));
        prop_assert!((-20.0..=20.0).contains(&s.low_freq()));
        prop_assert!((-100.0..=100.0).contains(&s.balance()));
    }

    /// Derived stage parameters stay in their node ranges.
    #[test]
    fn derived_params_in_range(
        volume in -500.0f32..500.0f32,
        balance in -500.0f32..500.0f32,
    ) {
        let d = AudioSettings::default()
            .with_master_volume(volume)
            .with_balance(balance)
            .derive();
        prop_assert!((0.0..=1.0).contains(&d.gain));
        prop_assert!((-1.0..=1.0).contains(&d.pan));
    }

    /// The chain never produces non-finite output, even while every stage
    /// ramps between arbitrary settings.
    #[test]
    fn chain_finite_under_retargeting(
        a in (0.0f32..=100.0, -20.0f32..=20.0, -20.0f32..=20.0, -100.0f32..=100.0),
        b in (0.0f32..=100.0, -20.0f32..=20.0, -20.0f32..=20.0, -100.0f32..=100.0),
        mono in any::<bool>(),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut chain = SignalChain::new(48000.0, mono);
        chain.set_params(&AudioSettings::new(a.0, a.1, a.2, a.3).derive());
        for &sample in &input {
            let (l, r) = chain.process_stereo(sample, -sample);
            prop_assert!(l.is_finite() && r.is_finite());
        }
        chain.set_params(&AudioSettings::new(b.0, b.1, b.2, b.3).derive());
        for _ in 0..16 {
            for &sample in &input {
                let (l, r) = chain.process_stereo(sample, -sample);
                prop_assert!(l.is_finite() && r.is_finite());
            }
        }
    }

    /// A smoothed parameter converges to any target within one second.
    #[test]
    fn smoothed_param_converges(
        initial in -100.0f32..100.0f32,
        target in -100.0f32..100.0f32,
    ) {
        let mut param = SmoothedParam::standard(initial, 48000.0);
        param.set_target(target);
        for _ in 0..48000 {
            param.advance();
        }
        prop_assert!((param.get() - target).abs() < 1e-3);
    }
}
