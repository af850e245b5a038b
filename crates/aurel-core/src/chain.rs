//! The fixed four-stage shaping chain.
//!
//! ```text
//! capture ─► high shelf (3 kHz) ─► low shelf (300 Hz) ─► gain ─► panner ─► output
//! ```
//!
//! Stage order never changes. Parameters reach the chain as a
//! [`DerivedParams`] value; each stage ramps toward its new target on its own
//! smoother.

use crate::gain::GainStage;
use crate::pan::Panner;
use crate::settings::DerivedParams;
use crate::shelf::ShelfFilter;
use crate::Effect;

/// High shelf, low shelf, gain and panner in series.
#[derive(Debug, Clone)]
pub struct SignalChain {
    high_shelf: ShelfFilter,
    low_shelf: ShelfFilter,
    gain: GainStage,
    panner: Panner,
}

impl SignalChain {
    /// Build a chain with neutral parameters (flat, unity, centered).
    ///
    /// `mono_source` selects the panner's mono law for single-channel capture.
    pub fn new(sample_rate: f32, mono_source: bool) -> Self {
        Self {
            high_shelf: ShelfFilter::high(sample_rate),
            low_shelf: ShelfFilter::low(sample_rate),
            gain: GainStage::new(sample_rate),
            panner: Panner::new(sample_rate, mono_source),
        }
    }

    /// Ramp every stage toward `params`.
    pub fn set_params(&mut self, params: &DerivedParams) {
        self.high_shelf.set_gain_db(params.high_shelf_db);
        self.low_shelf.set_gain_db(params.low_shelf_db);
        self.gain.set_gain(params.gain);
        self.panner.set_pan(params.pan);
    }

    /// Jump every stage to `params` without ramping.
    ///
    /// Used once when a session is built, so the first buffer already carries
    /// the configured shaping.
    pub fn snap_to_params(&mut self, params: &DerivedParams) {
        self.high_shelf.set_gain_db_immediate(params.high_shelf_db);
        self.low_shelf.set_gain_db_immediate(params.low_shelf_db);
        self.gain.set_gain_immediate(params.gain);
        self.panner.set_pan_immediate(params.pan);
    }

    /// Set the parameter ramp time of every stage.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.high_shelf.set_smoothing_time_ms(time_ms);
        self.low_shelf.set_smoothing_time_ms(time_ms);
        self.gain.set_smoothing_time_ms(time_ms);
        self.panner.set_smoothing_time_ms(time_ms);
    }

    /// Current stage targets.
    pub fn params(&self) -> DerivedParams {
        DerivedParams {
            gain: self.gain.gain(),
            pan: self.panner.pan(),
            high_shelf_db: self.high_shelf.gain_db(),
            low_shelf_db: self.low_shelf.gain_db(),
        }
    }

    /// High-shelf stage.
    pub fn high_shelf(&self) -> &ShelfFilter {
        &self.high_shelf
    }

    /// Low-shelf stage.
    pub fn low_shelf(&self) -> &ShelfFilter {
        &self.low_shelf
    }
}

impl Effect for SignalChain {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (l, r) = self.high_shelf.process_stereo(left, right);
        let (l, r) = self.low_shelf.process_stereo(l, r);
        let (l, r) = self.gain.process_stereo(l, r);
        self.panner.process_stereo(l, r)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.high_shelf.set_sample_rate(sample_rate);
        self.low_shelf.set_sample_rate(sample_rate);
        self.gain.set_sample_rate(sample_rate);
        self.panner.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.high_shelf.reset();
        self.low_shelf.reset();
        self.gain.reset();
        self.panner.reset();
    }
}
