//! Windowed-FFT level analyzer.
//!
//! [`SpectralAnalyzer`] keeps the most recent `fft_size` samples from the
//! analysis tap. Each [`tick`](SpectralAnalyzer::tick) turns that window into
//! a byte magnitude spectrum and folds it into [`BAND_COUNT`] levels:
//!
//! 1. Blackman window, forward FFT.
//! 2. Magnitude per bin, normalized by the FFT size.
//! 3. Exponential smoothing across ticks: `m = τ·m_prev + (1 − τ)·|X|`.
//! 4. dB conversion, then linear mapping of `[min_db, max_db]` onto `0..=255`.
//! 5. Bins chunked by index into eight equal groups; each group's mean byte
//!    divided by 255.
//!
//! The chunking in step 5 is positional. Band labels describe the meter, not
//! the exact frequency span each chunk covers.

use crate::fft::{Fft, Window};
use crate::levels::{AudioLevels, BAND_COUNT};
use rustfft::num_complex::Complex;

/// Smallest FFT size the analyzer accepts.
pub const MIN_FFT_SIZE: usize = 32;

/// Largest FFT size the analyzer accepts.
pub const MAX_FFT_SIZE: usize = 32768;

/// Analyzer parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerConfig {
    /// Transform size in samples. Normalized to a power of two in
    /// `MIN_FFT_SIZE..=MAX_FFT_SIZE`.
    pub fft_size: usize,
    /// Smoothing time constant `τ` in `0.0..=1.0`.
    pub smoothing: f32,
    /// Level mapped to byte 0.
    pub min_db: f32,
    /// Level mapped to byte 255.
    pub max_db: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 256,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

impl AnalyzerConfig {
    /// Copy with every field forced into its valid range.
    ///
    /// An inverted or empty dB range falls back to the defaults.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let fft_size = self
            .fft_size
            .clamp(MIN_FFT_SIZE, MAX_FFT_SIZE)
            .next_power_of_two();
        let smoothing = if self.smoothing.is_nan() {
            defaults.smoothing
        } else {
            self.smoothing.clamp(0.0, 1.0)
        };
        let (min_db, max_db) = if self.min_db < self.max_db {
            (self.min_db, self.max_db)
        } else {
            (defaults.min_db, defaults.max_db)
        };
        Self {
            fft_size,
            smoothing,
            min_db,
            max_db,
        }
    }

    /// Number of magnitude bins (`fft_size / 2`).
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }
}

/// Streaming spectral analyzer feeding the level meter.
#[derive(Debug)]
pub struct SpectralAnalyzer {
    config: AnalyzerConfig,
    fft: Fft,
    window: Vec<f32>,
    history: Vec<f32>,
    write_pos: usize,
    frame: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl SpectralAnalyzer {
    /// Create an analyzer; `config` is normalized first.
    pub fn new(config: AnalyzerConfig) -> Self {
        let config = config.normalized();
        let n = config.fft_size;
        Self {
            config,
            fft: Fft::new(n),
            window: Window::Blackman.coefficients(n),
            history: vec![0.0; n],
            write_pos: 0,
            frame: vec![0.0; n],
            spectrum: vec![Complex::new(0.0, 0.0); n],
            smoothed: vec![0.0; config.bin_count()],
            bytes: vec![0; config.bin_count()],
        }
    }

    /// Effective (normalized) configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Number of magnitude bins.
    pub fn bin_count(&self) -> usize {
        self.bytes.len()
    }

    /// Append samples from the analysis tap, keeping the newest `fft_size`.
    pub fn push_samples(&mut self, samples: &[f32]) {
        let n = self.history.len();
        // Only the tail can survive; skip what would be overwritten anyway.
        let tail = &samples[samples.len().saturating_sub(n)..];
        for &sample in tail {
            self.history[self.write_pos] = sample;
            self.write_pos = (self.write_pos + 1) % n;
        }
    }

    /// Recompute the byte spectrum from the current window.
    ///
    /// Advances the smoothing state, so call once per tick.
    pub fn update_spectrum(&mut self) -> &[u8] {
        let n = self.history.len();
        let (older, newer) = self.history.split_at(self.write_pos);
        let ordered = newer.iter().chain(older.iter());
        for ((dst, &sample), &w) in self.frame.iter_mut().zip(ordered).zip(&self.window) {
            *dst = sample * w;
        }

        self.fft.forward_into(&self.frame, &mut self.spectrum);

        let norm = 1.0 / n as f32;
        let tau = self.config.smoothing;
        let range = self.config.max_db - self.config.min_db;
        let scale = 255.0 / range;

        for ((bin, smoothed), byte) in self
            .spectrum
            .iter()
            .zip(self.smoothed.iter_mut())
            .zip(self.bytes.iter_mut())
        {
            let magnitude = bin.norm() * norm;
            let magnitude = if magnitude.is_finite() { magnitude } else { 0.0 };
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
            if !smoothed.is_finite() {
                *smoothed = 0.0;
            }

            let db = aurel_core::linear_to_db(*smoothed);
            *byte = (scale * (db - self.config.min_db)).floor().clamp(0.0, 255.0) as u8;
        }

        &self.bytes
    }

    /// Last computed byte spectrum.
    pub fn byte_spectrum(&self) -> &[u8] {
        &self.bytes
    }

    /// One analysis tick: update the spectrum and band it.
    pub fn tick(&mut self) -> AudioLevels {
        self.update_spectrum();
        band_levels(&self.bytes)
    }

    /// Forget buffered audio and smoothing history.
    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.write_pos = 0;
        self.smoothed.fill(0.0);
        self.bytes.fill(0);
    }
}

/// Fold a byte magnitude spectrum into [`BAND_COUNT`] levels.
///
/// Bins are split by index into groups of `len / BAND_COUNT`; trailing bins
/// that do not fill a group are ignored. Fewer bins than bands yields
/// silence, so the output always has exactly eight values in `0.0..=1.0`.
pub fn band_levels(bytes: &[u8]) -> AudioLevels {
    let band_size = bytes.len() / BAND_COUNT;
    if band_size == 0 {
        return AudioLevels::silent();
    }

    let mut bands = [0.0f32; BAND_COUNT];
    for (band, chunk) in bands.iter_mut().zip(bytes.chunks_exact(band_size)) {
        let sum: u32 = chunk.iter().map(|&b| u32::from(b)).sum();
        *band = sum as f32 / band_size as f32 / 255.0;
    }
    AudioLevels::new(bands)
}
