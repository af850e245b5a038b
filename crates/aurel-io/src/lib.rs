//! Audio graph lifecycle and live control for aurel.
//!
//! This crate owns everything between the microphone and the speaker:
//!
//! - **Engine**: [`AudioEngine`] acquires devices, builds the
//!   [`ProcessingSession`], and tears it down on every exit path
//! - **Live control**: [`ParameterController`] writes settings into the
//!   running chain through lock-free atomics
//! - **Sequencing**: [`ProcessingStateMachine`] gates start, stop and apply
//! - **Control thread**: [`EngineHandle`] runs the engine off the caller's
//!   thread so device acquisition never blocks the UI
//! - **Backends**: [`AudioBackend`] with [`CpalBackend`] for hardware and
//!   [`MockBackend`] for deterministic tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aurel_core::AudioSettings;
//! use aurel_io::{AudioEngine, CpalBackend, EngineConfig};
//!
//! let mut engine = AudioEngine::new(Box::new(CpalBackend::new()), EngineConfig::default());
//! engine.start_with(AudioSettings::new(70.0, 15.0, 5.0, 0.0))?;
//!
//! // Later, from a slider:
//! engine.apply(&AudioSettings::new(60.0, 15.0, 5.0, -20.0));
//! let bands = engine.levels();
//!
//! engine.stop();
//! ```

pub mod backend;
pub mod config;
pub mod control;
pub mod controller;
pub mod cpal_backend;
mod device;
pub mod engine;
pub mod mock_backend;
pub mod processor;
pub mod session;
pub mod state;
mod ticker;

pub use backend::{
    AudioBackend, BackendStreamConfig, CaptureProcessing, ErrorCallback, InputCallback,
    OutputCallback, StreamHandle,
};
pub use config::{EngineConfig, TICK_RATE_RANGE_HZ};
pub use control::EngineHandle;
pub use controller::ParameterController;
pub use cpal_backend::CpalBackend;
pub use device::{AudioDevice, default_device, list_devices};
pub use engine::AudioEngine;
pub use mock_backend::MockBackend;
pub use processor::{AtomicParam, ChainParams};
pub use session::ProcessingSession;
pub use state::{ProcessingState, ProcessingStateMachine, StateWatch};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The platform refused access to the device.
    #[error("Device access denied: {0}")]
    PermissionDenied(String),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Engine configuration is unusable.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a session could not start.
///
/// Every backend failure (missing device, denied permission, rejected stream
/// format) collapses into one variant. The underlying [`Error`] is logged at
/// the point of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    /// Microphone permission denied or no usable capture/playback device.
    #[error("audio device unavailable")]
    DeviceUnavailable,
}

/// A fatal stream error reported while a session was running.
///
/// By the time a caller sees this the engine has already returned to idle
/// and released the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("audio stream fault after {error_count} error(s): {message}")]
pub struct RuntimeFault {
    /// First error message reported by the backend.
    pub message: String,
    /// Number of error callbacks seen before the session was stopped.
    pub error_count: u32,
}
