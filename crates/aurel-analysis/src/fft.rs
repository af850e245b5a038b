//! Planned forward FFT and the analysis window.

use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::TAU;
use std::fmt;
use std::sync::Arc;

/// Taper applied to a frame before the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// Leave the frame as is.
    Rectangular,
    /// Three-term Blackman (a0 = 0.42), as used by browser analyser nodes.
    #[default]
    Blackman,
}

impl Window {
    /// Weight of sample `i` in a frame of `len` samples.
    #[inline]
    pub fn weight(self, i: usize, len: usize) -> f32 {
        match self {
            Window::Rectangular => 1.0,
            Window::Blackman => {
                let phase = TAU * i as f32 / len as f32;
                0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
            }
        }
    }

    /// Multiply `frame` by the window in place.
    pub fn apply(self, frame: &mut [f32]) {
        let len = frame.len();
        for (i, sample) in frame.iter_mut().enumerate() {
            *sample *= self.weight(i, len);
        }
    }

    /// The window as a table of `len` weights.
    pub fn coefficients(self, len: usize) -> Vec<f32> {
        (0..len).map(|i| self.weight(i, len)).collect()
    }
}

/// Forward complex FFT of a fixed length, planned once.
pub struct Fft {
    plan: Arc<dyn rustfft::Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    len: usize,
}

impl Fft {
    /// Plan a transform of `len` points.
    pub fn new(len: usize) -> Self {
        let plan = FftPlanner::new().plan_fft_forward(len);
        let scratch = vec![Complex::default(); plan.get_inplace_scratch_len()];
        Self { plan, scratch, len }
    }

    /// Transform length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the plan has zero points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Transform the real `input` into `out`, which must hold `len` bins.
    ///
    /// Missing input samples are treated as zero and extra ones are ignored.
    pub fn forward_into(&mut self, input: &[f32], out: &mut [Complex<f32>]) {
        debug_assert_eq!(out.len(), self.len);
        let padded = input.iter().copied().chain(std::iter::repeat(0.0));
        for (bin, sample) in out.iter_mut().zip(padded) {
            *bin = Complex::new(sample, 0.0);
        }
        self.plan.process_with_scratch(out, &mut self.scratch);
    }
}

impl fmt::Debug for Fft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fft").field("len", &self.len).finish()
    }
}
