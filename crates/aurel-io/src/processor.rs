//! Real-time side of a session: shared parameters and the playback callback.
//!
//! The control thread writes four scalars into [`ChainParams`]; the playback
//! callback reads them once per buffer and hands them to the chain's
//! smoothers. Neither side blocks or allocates.
//!
//! ```text
//! capture cb ──try_send──► input queue ──► SignalProcessor ──► playback buffer
//!                                              │
//!                                              └──try_send──► analysis tap
//! ```

use aurel_core::{
    BALANCE_RANGE, DerivedParams, Effect, MAX_GAIN, SHELF_RANGE_DB, SignalChain, mono_sum,
};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// A thread-safe atomic parameter using bit-cast f32.
///
/// Control thread writes, audio thread reads. No locks, no allocations.
#[derive(Debug)]
pub struct AtomicParam {
    value: AtomicU32,
    min: f32,
    max: f32,
}

impl AtomicParam {
    /// Create a new atomic parameter with range and initial value.
    pub fn new(initial: f32, min: f32, max: f32) -> Self {
        Self {
            value: AtomicU32::new(initial.clamp(min, max).to_bits()),
            min,
            max,
        }
    }

    /// Set the parameter value, clamped to range. NaN is ignored.
    #[inline]
    pub fn set(&self, v: f32) {
        if v.is_nan() {
            return;
        }
        let clamped = v.clamp(self.min, self.max);
        self.value.store(clamped.to_bits(), Ordering::Release);
    }

    /// Get the parameter value.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Acquire))
    }

    /// Get the minimum value.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Get the maximum value.
    pub fn max(&self) -> f32 {
        self.max
    }
}

/// The four live stage parameters of one session.
///
/// Each field is written independently; the audio thread may observe a mix
/// of old and new fields for one buffer, which is harmless because every
/// stage reads only its own value.
#[derive(Debug)]
pub struct ChainParams {
    /// Linear master gain, `0.0..=1.0`.
    pub gain: AtomicParam,
    /// Pan position, `-1.0..=1.0`.
    pub pan: AtomicParam,
    /// High-shelf gain in dB.
    pub high_shelf_db: AtomicParam,
    /// Low-shelf gain in dB.
    pub low_shelf_db: AtomicParam,
}

impl ChainParams {
    /// Create parameters holding `initial`.
    pub fn new(initial: &DerivedParams) -> Self {
        let (shelf_min, shelf_max) = SHELF_RANGE_DB;
        let pan_limit = BALANCE_RANGE.1 / 100.0;
        Self {
            gain: AtomicParam::new(initial.gain, 0.0, MAX_GAIN),
            pan: AtomicParam::new(initial.pan, -pan_limit, pan_limit),
            high_shelf_db: AtomicParam::new(initial.high_shelf_db, shelf_min, shelf_max),
            low_shelf_db: AtomicParam::new(initial.low_shelf_db, shelf_min, shelf_max),
        }
    }

    /// Replace all four values.
    pub fn store(&self, params: &DerivedParams) {
        self.gain.set(params.gain);
        self.pan.set(params.pan);
        self.high_shelf_db.set(params.high_shelf_db);
        self.low_shelf_db.set(params.low_shelf_db);
    }

    /// Read all four values.
    pub fn load(&self) -> DerivedParams {
        DerivedParams {
            gain: self.gain.get(),
            pan: self.pan.get(),
            high_shelf_db: self.high_shelf_db.get(),
            low_shelf_db: self.low_shelf_db.get(),
        }
    }
}

/// Playback-side processor owned by the output callback.
pub(crate) struct SignalProcessor {
    chain: SignalChain,
    params: Arc<ChainParams>,
    running: Arc<AtomicBool>,
    input_rx: Receiver<f32>,
    tap_tx: Sender<f32>,
    in_ch: usize,
    out_ch: usize,
}

impl SignalProcessor {
    pub(crate) fn new(
        mut chain: SignalChain,
        params: Arc<ChainParams>,
        running: Arc<AtomicBool>,
        input_rx: Receiver<f32>,
        tap_tx: Sender<f32>,
        in_ch: usize,
        out_ch: usize,
    ) -> Self {
        chain.snap_to_params(&params.load());
        Self {
            chain,
            params,
            running,
            input_rx,
            tap_tx,
            in_ch: in_ch.max(1),
            out_ch: out_ch.max(1),
        }
    }

    /// Pull one capture frame; missing samples read as silence.
    #[inline]
    fn next_frame(&mut self) -> (f32, f32) {
        let sanitize = |s: f32| if s.is_finite() { s } else { 0.0 };
        if self.in_ch >= 2 {
            let l = self.input_rx.try_recv().unwrap_or(0.0);
            let r = self.input_rx.try_recv().unwrap_or(0.0);
            for _ in 2..self.in_ch {
                let _ = self.input_rx.try_recv();
            }
            (sanitize(l), sanitize(r))
        } else {
            let s = sanitize(self.input_rx.try_recv().unwrap_or(0.0));
            (s, s)
        }
    }

    /// Drop the oldest queued capture so at most two buffers of `frames`
    /// remain. Capture and playback run on separate device clocks; a head
    /// start or drift on the capture side would otherwise stay audible as
    /// delay for the rest of the session.
    #[inline]
    fn trim_backlog(&mut self, frames: usize) {
        let limit = 2 * frames * self.in_ch;
        let queued = self.input_rx.len();
        if queued <= limit {
            return;
        }
        let excess = queued - limit;
        for _ in 0..excess - excess % self.in_ch {
            if self.input_rx.try_recv().is_err() {
                break;
            }
        }
    }

    /// Fill one interleaved playback buffer.
    pub(crate) fn process_buffer(&mut self, data: &mut [f32]) {
        if !self.running.load(Ordering::Acquire) {
            data.fill(0.0);
            return;
        }

        self.chain.set_params(&self.params.load());
        self.trim_backlog(data.len() / self.out_ch);

        for frame in data.chunks_mut(self.out_ch) {
            let (in_l, in_r) = self.next_frame();
            let (l, r) = self.chain.process_stereo(in_l, in_r);

            match frame {
                [mono] => *mono = mono_sum(l, r),
                [left, right, rest @ ..] => {
                    *left = l;
                    *right = r;
                    rest.fill(0.0);
                }
                [] => {}
            }

            // Full tap means the analyzer is behind; drop the sample.
            let _ = self.tap_tx.try_send(mono_sum(l, r));
        }
    }
}
