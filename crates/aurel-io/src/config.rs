//! Engine configuration.

use crate::backend::{BackendStreamConfig, CaptureProcessing};
use crate::{Error, Result};
use aurel_analysis::AnalyzerConfig;
use aurel_core::STANDARD_SMOOTHING_MS;
use std::time::Duration;

/// Analysis tick rates a session accepts. Outside this range the tick
/// period or the tap queue size stop being representable.
pub const TICK_RATE_RANGE_HZ: std::ops::RangeInclusive<f32> = 1.0..=1000.0;

/// Everything the engine needs to build a session, apart from the settings.
///
/// ## Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `sample_rate` | 48000 Hz |
/// | `buffer_size` | 256 frames |
/// | `input_channels` | 1 (mono microphone) |
/// | `output_channels` | 2 |
/// | `analyzer` | 256-point FFT, τ = 0.8, -100..-30 dB |
/// | `tick_rate_hz` | 60 |
/// | `smoothing_ms` | 10 |
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Stream sample rate in Hz.
    pub sample_rate: u32,
    /// Preferred buffer size in frames.
    pub buffer_size: u32,
    /// Capture channel count. One selects the mono pan law.
    pub input_channels: u16,
    /// Playback channel count.
    pub output_channels: u16,
    /// Capture device name fragment; `None` uses the system default.
    pub input_device: Option<String>,
    /// Playback device name fragment; `None` uses the system default.
    pub output_device: Option<String>,
    /// Level analyzer parameters.
    pub analyzer: AnalyzerConfig,
    /// Analysis ticks per second.
    pub tick_rate_hz: f32,
    /// Parameter ramp time in milliseconds.
    pub smoothing_ms: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            buffer_size: 256,
            input_channels: 1,
            output_channels: 2,
            input_device: None,
            output_device: None,
            analyzer: AnalyzerConfig::default(),
            tick_rate_hz: 60.0,
            smoothing_ms: STANDARD_SMOOTHING_MS,
        }
    }
}

impl EngineConfig {
    /// Reject values no session could run with.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidConfig("sample rate must be positive".into()));
        }
        if self.buffer_size == 0 {
            return Err(Error::InvalidConfig("buffer size must be positive".into()));
        }
        if self.input_channels == 0 || self.output_channels == 0 {
            return Err(Error::InvalidConfig(format!(
                "channel counts must be positive (input {}, output {})",
                self.input_channels, self.output_channels
            )));
        }
        if !TICK_RATE_RANGE_HZ.contains(&self.tick_rate_hz) {
            return Err(Error::InvalidConfig(format!(
                "tick rate must be within {:?} Hz, got {}",
                TICK_RATE_RANGE_HZ, self.tick_rate_hz
            )));
        }
        if !(self.smoothing_ms.is_finite() && self.smoothing_ms >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "smoothing time must be non-negative, got {}",
                self.smoothing_ms
            )));
        }
        Ok(())
    }

    /// Period between analysis ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.tick_rate_hz)
    }

    /// Whether capture is single-channel.
    pub fn is_mono_input(&self) -> bool {
        self.input_channels == 1
    }

    /// Capacity of the capture-to-playback sample queue.
    pub(crate) fn input_queue_len(&self) -> usize {
        (self.buffer_size as usize * usize::from(self.input_channels) * 8).max(4096)
    }

    /// Capacity of the analysis tap queue: a few ticks of audio.
    pub(crate) fn tap_queue_len(&self) -> usize {
        let per_tick = self.sample_rate as f32 / self.tick_rate_hz;
        (per_tick as usize * 4).max(self.analyzer.fft_size * 2)
    }

    /// Stream config for the capture device, with platform processing off.
    pub fn input_stream_config(&self) -> BackendStreamConfig {
        BackendStreamConfig {
            sample_rate: self.sample_rate,
            buffer_size: self.buffer_size,
            channels: self.input_channels,
            device_name: self.input_device.clone(),
            capture_processing: CaptureProcessing::raw(),
        }
    }

    /// Stream config for the playback device.
    pub fn output_stream_config(&self) -> BackendStreamConfig {
        BackendStreamConfig {
            sample_rate: self.sample_rate,
            buffer_size: self.buffer_size,
            channels: self.output_channels,
            device_name: self.output_device.clone(),
            capture_processing: CaptureProcessing::raw(),
        }
    }
}
