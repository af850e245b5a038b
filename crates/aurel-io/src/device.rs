//! Device discovery on the default cpal host.

use crate::Result;
use cpal::Device;
use cpal::traits::{DeviceTrait, HostTrait};

/// Display name of a cpal device.
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// A capture or playback device as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Name reported by the platform.
    pub name: String,
    /// Can capture.
    pub is_input: bool,
    /// Can play.
    pub is_output: bool,
    /// Rate of the device's default configuration, in Hz.
    pub default_sample_rate: u32,
    /// Channels of the device's default configuration.
    pub default_channels: u16,
}

#[derive(Clone, Copy)]
enum Direction {
    Capture,
    Playback,
}

impl Direction {
    fn fallback(self) -> (u32, u16) {
        match self {
            Direction::Capture => (48000, 1),
            Direction::Playback => (48000, 2),
        }
    }
}

fn describe(device: &Device, direction: Direction) -> Option<AudioDevice> {
    let name = device_name(device).ok()?;
    let default = match direction {
        Direction::Capture => device.default_input_config(),
        Direction::Playback => device.default_output_config(),
    };
    let (default_sample_rate, default_channels) = default
        .map(|c| (c.sample_rate(), c.channels()))
        .unwrap_or_else(|_| direction.fallback());
    let (is_input, is_output) = match direction {
        Direction::Capture => (true, device.default_output_config().is_ok()),
        Direction::Playback => (false, true),
    };
    Some(AudioDevice {
        name,
        is_input,
        is_output,
        default_sample_rate,
        default_channels,
    })
}

/// Enumerate capture devices, then playback devices not already listed.
///
/// A duplex device shows up once, as an input with `is_output` set.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut found: Vec<AudioDevice> = host
        .input_devices()
        .map(|it| it.filter_map(|d| describe(&d, Direction::Capture)).collect())
        .unwrap_or_default();

    if let Ok(outputs) = host.output_devices() {
        for device in outputs.filter_map(|d| describe(&d, Direction::Playback)) {
            if !found.iter().any(|known| known.name == device.name) {
                found.push(device);
            }
        }
    }
    Ok(found)
}

/// The host's default `(capture, playback)` devices.
pub fn default_device() -> Result<(Option<AudioDevice>, Option<AudioDevice>)> {
    let host = cpal::default_host();
    let input = host
        .default_input_device()
        .and_then(|d| describe(&d, Direction::Capture))
        .map(|info| AudioDevice {
            is_output: false,
            ..info
        });
    let output = host
        .default_output_device()
        .and_then(|d| describe(&d, Direction::Playback));
    Ok((input, output))
}
