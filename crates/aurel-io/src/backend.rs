//! The seam between the engine and a platform audio API.
//!
//! [`AudioEngine`](crate::AudioEngine) only ever talks to a
//! `Box<dyn AudioBackend>`. [`CpalBackend`](crate::CpalBackend) opens real
//! devices; [`MockBackend`](crate::MockBackend) runs the same callbacks on
//! demand so the whole lifecycle can be exercised without hardware.
//!
//! ```text
//!   AudioEngine ──► dyn AudioBackend ──┬──► CpalBackend (hardware)
//!                                      └──► MockBackend (tests)
//! ```

use crate::{AudioDevice, Result};
use std::fmt;

/// Platform-side processing a capture device may apply on its own.
///
/// The engine requests [`CaptureProcessing::raw`] for every session. All
/// shaping belongs to the signal chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureProcessing {
    /// Echo cancellation.
    pub echo_cancellation: bool,
    /// Noise suppression.
    pub noise_suppression: bool,
    /// Automatic gain control.
    pub auto_gain_control: bool,
}

impl CaptureProcessing {
    /// No platform processing at all.
    pub const fn raw() -> Self {
        Self {
            echo_cancellation: false,
            noise_suppression: false,
            auto_gain_control: false,
        }
    }

    /// True when nothing is switched on.
    pub fn is_raw(&self) -> bool {
        !(self.echo_cancellation || self.noise_suppression || self.auto_gain_control)
    }
}

/// What the engine asks of one stream direction.
#[derive(Debug, Clone)]
pub struct BackendStreamConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per callback the engine would like.
    pub buffer_size: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Case-insensitive name fragment; `None` picks the system default.
    pub device_name: Option<String>,
    /// Only meaningful for capture.
    pub capture_processing: CaptureProcessing,
}

impl Default for BackendStreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            buffer_size: 256,
            channels: 2,
            device_name: None,
            capture_processing: CaptureProcessing::raw(),
        }
    }
}

/// Owns a running stream. Dropping the handle stops it.
pub struct StreamHandle {
    _stream: Box<dyn Send>,
}

impl StreamHandle {
    /// Take ownership of a backend's stream object.
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _stream: Box::new(stream),
        }
    }
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// Fills an interleaved playback buffer. Runs on the real-time thread, so it
/// must not allocate, block or do I/O.
pub type OutputCallback = Box<dyn FnMut(&mut [f32]) + Send>;

/// Receives interleaved captured samples on the real-time thread.
pub type InputCallback = Box<dyn FnMut(&[f32]) + Send>;

/// Told about stream errors after the stream is running.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// A source of devices and streams.
pub trait AudioBackend: Send {
    /// Short identifier for logs, e.g. `"cpal"`.
    fn name(&self) -> &str;

    /// Every device the backend can see.
    fn list_devices(&self) -> Result<Vec<AudioDevice>>;

    /// The system's default playback device.
    fn default_output_device(&self) -> Result<Option<AudioDevice>>;

    /// The system's default capture device.
    fn default_input_device(&self) -> Result<Option<AudioDevice>>;

    /// Open and start a playback stream.
    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;

    /// Open and start a capture stream, honoring
    /// `config.capture_processing` where the platform allows it.
    fn build_input_stream(
        &self,
        config: &BackendStreamConfig,
        callback: InputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;

    /// Rate the stream will really run at. Backends that cannot negotiate
    /// keep the requested rate.
    fn actual_sample_rate(&self, config: &BackendStreamConfig) -> u32 {
        config.sample_rate
    }
}
