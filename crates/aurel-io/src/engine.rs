//! The audio graph manager.
//!
//! [`AudioEngine`] is the single owner of the live signal path. It holds at
//! most one [`ProcessingSession`] and drives every lifecycle transition:
//!
//! | Call | Idle | Running |
//! |------|------|---------|
//! | `start` | build session → Running, or `StartError` and stay Idle | no-op |
//! | `apply` | no-op | write stage parameters |
//! | `stop` | no-op | release session → Idle |
//! | `poll` | `None` | on stream fault: release session → Idle, return fault |
//!
//! Dropping the engine stops it.

use crate::backend::AudioBackend;
use crate::config::EngineConfig;
use crate::controller::ParameterController;
use crate::session::ProcessingSession;
use crate::state::{ProcessingState, ProcessingStateMachine, StateWatch};
use crate::{RuntimeFault, StartError};
use aurel_analysis::{AudioLevels, LevelMeter};
use aurel_core::{AudioSettings, DerivedParams};

/// Owns device access, the node topology and its lifecycle.
pub struct AudioEngine {
    backend: Box<dyn AudioBackend>,
    config: EngineConfig,
    state: ProcessingStateMachine,
    controller: ParameterController,
    session: Option<ProcessingSession>,
    meter: LevelMeter,
    settings: AudioSettings,
}

impl AudioEngine {
    /// Create an idle engine with default settings.
    pub fn new(backend: Box<dyn AudioBackend>, config: EngineConfig) -> Self {
        Self {
            backend,
            config,
            state: ProcessingStateMachine::new(),
            controller: ParameterController::new(),
            session: None,
            meter: LevelMeter::new(),
            settings: AudioSettings::default(),
        }
    }

    /// Replace the settings the next session starts with.
    pub fn with_settings(mut self, settings: AudioSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Settings of the live session, or the ones the next start will use.
    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Acquire devices and start processing with the stored settings.
    ///
    /// No-op while running. On failure nothing stays open and the engine
    /// remains idle.
    pub fn start(&mut self) -> Result<(), StartError> {
        if !self.state.can_start() {
            tracing::debug!("start ignored: session already running");
            return Ok(());
        }

        let params = self.settings.derive();
        let session = match ProcessingSession::build(
            self.backend.as_ref(),
            &self.config,
            &params,
            self.meter.clone(),
            self.state.flag(),
        ) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), error = %e, "could not start audio");
                return Err(StartError::DeviceUnavailable);
            }
        };

        self.controller.attach(std::sync::Arc::clone(session.params()));
        self.session = Some(session);
        self.state.enter_running();
        tracing::info!(
            backend = self.backend.name(),
            preset = self.settings.preset(),
            volume = self.settings.master_volume(),
            "audio processing started"
        );
        Ok(())
    }

    /// Start with `settings`. While running this is a no-op and the
    /// settings are not taken; use [`apply`](Self::apply) instead.
    pub fn start_with(&mut self, settings: AudioSettings) -> Result<(), StartError> {
        if self.state.can_start() {
            self.settings = settings;
        }
        self.start()
    }

    /// Release the session and return to idle. No-op while idle.
    pub fn stop(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        self.controller.detach();
        self.state.enter_idle();
        session.release();
        tracing::info!("audio processing stopped");
    }

    /// Write `settings` into the running chain.
    ///
    /// Returns `false` and changes nothing while idle.
    pub fn apply(&mut self, settings: &AudioSettings) -> bool {
        if !self.state.can_apply() {
            return false;
        }
        if self.controller.apply(settings) {
            self.settings = settings.clone();
            true
        } else {
            false
        }
    }

    /// Reap a stream fault, if one was reported.
    ///
    /// A faulted session is stopped through the normal stop path before the
    /// fault is returned.
    pub fn poll(&mut self) -> Option<RuntimeFault> {
        let fault = self.session.as_ref()?.fault()?;
        tracing::error!(
            error = %fault.message,
            count = fault.error_count,
            "audio stream fault; stopping"
        );
        self.stop();
        Some(fault)
    }

    /// Whether a session is live.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProcessingState {
        self.state.state()
    }

    /// Read-only state view for other threads.
    pub fn watch(&self) -> StateWatch {
        self.state.watch()
    }

    /// Latest published band levels. All zero while idle.
    pub fn levels(&self) -> AudioLevels {
        self.meter.latest()
    }

    /// Handle to the level snapshot, for display threads.
    pub fn level_meter(&self) -> LevelMeter {
        self.meter.clone()
    }

    /// Stage parameters of the live session.
    pub fn read_back(&self) -> Option<DerivedParams> {
        self.controller.read_back()
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for AudioEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioEngine")
            .field("backend", &self.backend.name())
            .field("state", &self.state())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockBackend;

    fn engine(mock: &MockBackend) -> AudioEngine {
        AudioEngine::new(Box::new(mock.clone()), EngineConfig::default())
    }

    #[test]
    fn start_builds_two_streams() {
        let mock = MockBackend::new();
        let mut engine = engine(&mock);
        assert_eq!(engine.start(), Ok(()));
        assert_eq!(engine.state(), ProcessingState::Running);
        assert_eq!(mock.live_streams(), 2);
        engine.stop();
        assert_eq!(mock.live_streams(), 0);
    }

    #[test]
    fn start_with_while_running_keeps_live_settings() {
        let mock = MockBackend::new();
        let mut engine = engine(&mock);
        engine.start_with(AudioSettings::new(40.0, 0.0, 0.0, 0.0)).unwrap();
        engine.start_with(AudioSettings::new(90.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(engine.settings().master_volume(), 40.0);
        assert!((engine.read_back().unwrap().gain - 0.4).abs() < 1e-6);
    }

    #[test]
    fn apply_while_idle_leaves_settings_alone() {
        let mock = MockBackend::new();
        let mut engine = engine(&mock).with_settings(AudioSettings::new(30.0, 0.0, 0.0, 0.0));
        assert!(!engine.apply(&AudioSettings::new(99.0, 0.0, 0.0, 0.0)));
        assert_eq!(engine.settings().master_volume(), 30.0);
        assert_eq!(engine.read_back(), None);
    }

    #[test]
    fn drop_releases_streams() {
        let mock = MockBackend::new();
        {
            let mut engine = engine(&mock);
            engine.start().unwrap();
            assert_eq!(mock.live_streams(), 2);
        }
        assert_eq!(mock.live_streams(), 0);
    }
}
