//! Hardware backend on top of cpal (ALSA, CoreAudio, WASAPI).
//!
//! cpal hands out unprocessed capture everywhere and has no knobs for
//! platform echo cancellation, noise suppression or AGC, so a processed
//! [`CaptureProcessing`] request only produces a warning.

use crate::backend::{
    AudioBackend, BackendStreamConfig, CaptureProcessing, ErrorCallback, InputCallback,
    OutputCallback, StreamHandle,
};
use crate::device::{default_device, device_name, list_devices};
use crate::{AudioDevice, Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BuildStreamError, Host, Stream};

/// [`AudioBackend`] for the platform's default cpal host.
pub struct CpalBackend {
    host: Host,
}

impl CpalBackend {
    /// Connect to the default host.
    pub fn new() -> Self {
        let host = cpal::default_host();
        tracing::info!(host = host.id().name(), "cpal backend initialized");
        Self { host }
    }

    fn default_for(&self, capture: bool) -> Option<cpal::Device> {
        if capture {
            self.host.default_input_device()
        } else {
            self.host.default_output_device()
        }
    }

    /// First device whose name contains `fragment`, ignoring case.
    fn matching(&self, fragment: &str, capture: bool) -> Result<cpal::Device> {
        let candidates = if capture {
            self.host.input_devices()
        } else {
            self.host.output_devices()
        }
        .map_err(|e| Error::Stream(e.to_string()))?;

        let needle = fragment.to_lowercase();
        candidates
            .into_iter()
            .find(|device| {
                device_name(device).is_ok_and(|name| name.to_lowercase().contains(&needle))
            })
            .ok_or_else(|| {
                let kind = if capture { "input" } else { "output" };
                Error::DeviceNotFound(format!("no {kind} device matching '{fragment}'"))
            })
    }

    fn resolve(&self, config: &BackendStreamConfig, capture: bool) -> Result<cpal::Device> {
        match config.device_name.as_deref() {
            Some(fragment) => self.matching(fragment, capture),
            None => self.default_for(capture).ok_or(Error::NoDevice),
        }
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn cpal_config(config: &BackendStreamConfig) -> cpal::StreamConfig {
    cpal::StreamConfig {
        channels: config.channels,
        sample_rate: config.sample_rate,
        buffer_size: cpal::BufferSize::Fixed(config.buffer_size),
    }
}

/// A vanished device stays distinct from a rejected format.
fn build_error(err: BuildStreamError) -> Error {
    match err {
        BuildStreamError::DeviceNotAvailable => Error::NoDevice,
        BuildStreamError::StreamConfigNotSupported => {
            Error::UnsupportedFormat("stream configuration not supported".to_string())
        }
        other => Error::Stream(other.to_string()),
    }
}

/// Start a freshly built stream and wrap it.
fn play(stream: Stream, config: &BackendStreamConfig, direction: &str) -> Result<StreamHandle> {
    stream.play().map_err(|e| Error::Stream(e.to_string()))?;
    tracing::info!(
        direction,
        channels = config.channels,
        sample_rate = config.sample_rate,
        buffer_size = config.buffer_size,
        "stream started"
    );
    Ok(StreamHandle::new(stream))
}

impl AudioBackend for CpalBackend {
    fn name(&self) -> &'static str {
        "cpal"
    }

    // The free functions enumerate `cpal::default_host()`, the same host
    // this backend holds.
    fn list_devices(&self) -> Result<Vec<AudioDevice>> {
        list_devices()
    }

    fn default_output_device(&self) -> Result<Option<AudioDevice>> {
        default_device().map(|(_, output)| output)
    }

    fn default_input_device(&self) -> Result<Option<AudioDevice>> {
        default_device().map(|(input, _)| input)
    }

    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        mut callback: OutputCallback,
        mut error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let device = self.resolve(config, false)?;
        let stream = device
            .build_output_stream(
                &cpal_config(config),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| callback(data),
                move |err| error_callback(&err.to_string()),
                None,
            )
            .map_err(build_error)?;
        play(stream, config, "output")
    }

    fn build_input_stream(
        &self,
        config: &BackendStreamConfig,
        mut callback: InputCallback,
        mut error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let CaptureProcessing {
            echo_cancellation,
            noise_suppression,
            auto_gain_control,
        } = config.capture_processing;
        if !config.capture_processing.is_raw() {
            tracing::warn!(
                echo_cancellation,
                noise_suppression,
                auto_gain_control,
                "cpal capture is always raw; processing request ignored"
            );
        }

        let device = self.resolve(config, true)?;
        let stream = device
            .build_input_stream(
                &cpal_config(config),
                move |data: &[f32], _: &cpal::InputCallbackInfo| callback(data),
                move |err| error_callback(&err.to_string()),
                None,
            )
            .map_err(build_error)?;
        play(stream, config, "input")
    }
}
