//! Deterministic in-process backend.
//!
//! [`MockBackend`] implements [`AudioBackend`] without hardware. Streams it
//! builds are registered in shared state until their [`StreamHandle`] drops,
//! so tests can count what is open, pump audio through the live callbacks,
//! and inject stream errors.
//!
//! ```rust
//! use aurel_io::{AudioEngine, EngineConfig, MockBackend};
//!
//! let mock = MockBackend::new();
//! let mut engine = AudioEngine::new(Box::new(mock.clone()), EngineConfig::default());
//!
//! engine.start().unwrap();
//! let out = mock.process(&[0.25; 256]);
//! assert_eq!(out.len(), 512);
//!
//! engine.stop();
//! assert_eq!(mock.live_streams(), 0);
//! ```

use crate::backend::{
    AudioBackend, BackendStreamConfig, CaptureProcessing, ErrorCallback, InputCallback,
    OutputCallback, StreamHandle,
};
use crate::{AudioDevice, Error, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Name of the mock capture device.
pub const MOCK_INPUT_NAME: &str = "Mock Microphone";

/// Name of the mock playback device.
pub const MOCK_OUTPUT_NAME: &str = "Mock Speakers";

enum Callback {
    Input(InputCallback),
    Output(OutputCallback),
}

struct MockStream {
    id: u64,
    channels: usize,
    callback: Callback,
    error_callback: ErrorCallback,
}

#[derive(Default)]
struct MockState {
    deny_input: bool,
    deny_output: bool,
    next_id: u64,
    opened: usize,
    streams: Vec<MockStream>,
    capture_requests: Vec<CaptureProcessing>,
}

/// Unregisters its stream when dropped.
struct MockStreamGuard {
    id: u64,
    state: Arc<Mutex<MockState>>,
}

impl Drop for MockStreamGuard {
    fn drop(&mut self) {
        // Move the stream out before dropping it so its callbacks are not
        // destroyed while the lock is held.
        let removed = {
            let mut state = self.state.lock();
            state
                .streams
                .iter()
                .position(|s| s.id == self.id)
                .map(|idx| state.streams.remove(idx))
        };
        drop(removed);
    }
}

/// Hardware-free [`AudioBackend`] for tests.
///
/// Clones share state: keep one clone in the test and hand another to the
/// engine.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// A backend with one microphone and one speaker, both available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make input stream construction fail as if permission were denied.
    pub fn deny_input(&self, deny: bool) {
        self.state.lock().deny_input = deny;
    }

    /// Make output stream construction fail as if no device existed.
    pub fn deny_output(&self, deny: bool) {
        self.state.lock().deny_output = deny;
    }

    /// Streams currently open.
    pub fn live_streams(&self) -> usize {
        self.state.lock().streams.len()
    }

    /// Input streams currently open.
    pub fn live_input_streams(&self) -> usize {
        self.count_live(|c| matches!(c, Callback::Input(_)))
    }

    /// Output streams currently open.
    pub fn live_output_streams(&self) -> usize {
        self.count_live(|c| matches!(c, Callback::Output(_)))
    }

    fn count_live(&self, pred: impl Fn(&Callback) -> bool) -> usize {
        self.state
            .lock()
            .streams
            .iter()
            .filter(|s| pred(&s.callback))
            .count()
    }

    /// Streams successfully opened since creation.
    pub fn opened_streams(&self) -> usize {
        self.state.lock().opened
    }

    /// Capture processing switches of every input stream request, in order.
    pub fn capture_requests(&self) -> Vec<CaptureProcessing> {
        self.state.lock().capture_requests.clone()
    }

    /// Push `input` (interleaved capture samples) through every live input
    /// callback, then run every live output callback for the same number of
    /// frames. Returns the first output stream's buffer, or an empty vector
    /// when no output stream is open.
    pub fn process(&self, input: &[f32]) -> Vec<f32> {
        let mut state = self.state.lock();

        let mut frames = 0;
        for stream in state.streams.iter_mut() {
            if let Callback::Input(cb) = &mut stream.callback {
                cb(input);
                frames = input.len() / stream.channels.max(1);
            }
        }

        let mut first: Option<Vec<f32>> = None;
        for stream in state.streams.iter_mut() {
            if let Callback::Output(cb) = &mut stream.callback {
                let mut buffer = vec![0.0; frames * stream.channels];
                cb(&mut buffer);
                first.get_or_insert(buffer);
            }
        }
        first.unwrap_or_default()
    }

    /// Report `message` through every live stream's error callback.
    pub fn inject_error(&self, message: &str) {
        let mut state = self.state.lock();
        for stream in state.streams.iter_mut() {
            (stream.error_callback)(message);
        }
    }

    fn register(
        &self,
        config: &BackendStreamConfig,
        callback: Callback,
        error_callback: ErrorCallback,
    ) -> StreamHandle {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.opened += 1;
        state.streams.push(MockStream {
            id,
            channels: usize::from(config.channels),
            callback,
            error_callback,
        });
        StreamHandle::new(MockStreamGuard {
            id,
            state: Arc::clone(&self.state),
        })
    }

    fn device(name: &str, input: bool) -> AudioDevice {
        AudioDevice {
            name: name.to_string(),
            is_input: input,
            is_output: !input,
            default_sample_rate: 48000,
            default_channels: if input { 1 } else { 2 },
        }
    }
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockBackend")
            .field("live_streams", &state.streams.len())
            .field("opened", &state.opened)
            .finish_non_exhaustive()
    }
}

impl AudioBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn list_devices(&self) -> Result<Vec<AudioDevice>> {
        let state = self.state.lock();
        let mut devices = Vec::new();
        if !state.deny_input {
            devices.push(Self::device(MOCK_INPUT_NAME, true));
        }
        if !state.deny_output {
            devices.push(Self::device(MOCK_OUTPUT_NAME, false));
        }
        Ok(devices)
    }

    fn default_output_device(&self) -> Result<Option<AudioDevice>> {
        let denied = self.state.lock().deny_output;
        Ok((!denied).then(|| Self::device(MOCK_OUTPUT_NAME, false)))
    }

    fn default_input_device(&self) -> Result<Option<AudioDevice>> {
        let denied = self.state.lock().deny_input;
        Ok((!denied).then(|| Self::device(MOCK_INPUT_NAME, true)))
    }

    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        if self.state.lock().deny_output {
            return Err(Error::NoDevice);
        }
        Ok(self.register(config, Callback::Output(callback), error_callback))
    }

    fn build_input_stream(
        &self,
        config: &BackendStreamConfig,
        callback: InputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        {
            let mut state = self.state.lock();
            state.capture_requests.push(config.capture_processing);
            if state.deny_input {
                return Err(Error::PermissionDenied(MOCK_INPUT_NAME.to_string()));
            }
        }
        Ok(self.register(config, Callback::Input(callback), error_callback))
    }
}
