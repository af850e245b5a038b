//! Aurel Analysis - spectral banding for the level meter
//!
//! This crate turns the post-shaping analysis tap into the eight-band level
//! display:
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`analyzer`] - [`SpectralAnalyzer`]: windowed FFT, smoothing, byte
//!   spectrum, band folding
//! - [`levels`] - [`AudioLevels`] snapshot and the [`LevelMeter`] publisher
//!
//! ## Example
//!
//! ```rust
//! use aurel_analysis::{AnalyzerConfig, LevelMeter, SpectralAnalyzer};
//!
//! let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::default());
//! let meter = LevelMeter::new();
//!
//! analyzer.push_samples(&[0.0; 256]);
//! meter.publish(analyzer.tick());
//!
//! assert_eq!(meter.latest().as_slice().len(), 8);
//! ```

pub mod analyzer;
pub mod fft;
pub mod levels;

pub use analyzer::{AnalyzerConfig, MAX_FFT_SIZE, MIN_FFT_SIZE, SpectralAnalyzer, band_levels};
pub use fft::{Fft, Window};
pub use levels::{AudioLevels, BAND_COUNT, BAND_LABELS, LevelMeter};
