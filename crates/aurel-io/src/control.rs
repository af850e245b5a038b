//! Engine control thread.
//!
//! [`EngineHandle`] moves an [`AudioEngine`] onto a dedicated thread and
//! talks to it over a command channel. Device acquisition happens there, so
//! a UI thread calling [`EngineHandle::start`] gets a receiver back at once
//! and learns the outcome later. The thread also polls for stream faults and
//! stops a faulted session on its own.
//!
//! Running state and band levels are read straight from shared atomics and
//! the level snapshot, never through the channel.

use crate::backend::AudioBackend;
use crate::config::EngineConfig;
use crate::engine::AudioEngine;
use crate::state::StateWatch;
use crate::{Result, RuntimeFault, StartError};
use aurel_analysis::{AudioLevels, LevelMeter};
use aurel_core::AudioSettings;
use crossbeam_channel::{Receiver, Sender, bounded, select, tick, unbounded};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How often the control thread checks for stream faults.
const FAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

enum Command {
    Start {
        settings: Option<AudioSettings>,
        reply: Sender<std::result::Result<(), StartError>>,
    },
    Stop {
        reply: Sender<()>,
    },
    Apply(AudioSettings),
    Shutdown,
}

/// Thread-owning front end for [`AudioEngine`].
pub struct EngineHandle {
    commands: Sender<Command>,
    faults: Receiver<RuntimeFault>,
    watch: StateWatch,
    meter: LevelMeter,
    thread: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Spawn the control thread with default settings.
    pub fn spawn(backend: Box<dyn AudioBackend>, config: EngineConfig) -> Result<Self> {
        Self::spawn_with_settings(backend, config, AudioSettings::default())
    }

    /// Spawn the control thread; `settings` are used by a bare `start(None)`.
    pub fn spawn_with_settings(
        backend: Box<dyn AudioBackend>,
        config: EngineConfig,
        settings: AudioSettings,
    ) -> Result<Self> {
        let engine = AudioEngine::new(backend, config).with_settings(settings);
        let watch = engine.watch();
        let meter = engine.level_meter();
        let (commands, command_rx) = unbounded();
        let (fault_tx, faults) = unbounded();

        let thread = thread::Builder::new()
            .name("aurel-control".into())
            .spawn(move || run(engine, &command_rx, &fault_tx))?;

        Ok(Self {
            commands,
            faults,
            watch,
            meter,
            thread: Some(thread),
        })
    }

    /// Ask the engine to start. Returns immediately; the receiver yields the
    /// outcome once device acquisition finishes.
    ///
    /// `Some(settings)` replaces the stored settings when idle. While running
    /// the request is a no-op that reports `Ok(())`.
    pub fn start(
        &self,
        settings: Option<AudioSettings>,
    ) -> Receiver<std::result::Result<(), StartError>> {
        let (reply, outcome) = bounded(1);
        if let Err(err) = self.commands.send(Command::Start { settings, reply }) {
            // Control thread is gone; nothing can be acquired.
            if let Command::Start { reply, .. } = err.into_inner() {
                let _ = reply.send(Err(StartError::DeviceUnavailable));
            }
        }
        outcome
    }

    /// Stop the engine and wait until the session is released.
    pub fn stop(&self) {
        let (reply, done) = bounded(1);
        if self.commands.send(Command::Stop { reply }).is_ok() {
            let _ = done.recv();
        }
    }

    /// Queue a live settings write. Never blocks; ignored while idle.
    pub fn apply(&self, settings: AudioSettings) {
        let _ = self.commands.send(Command::Apply(settings));
    }

    /// Whether a session is live.
    pub fn is_running(&self) -> bool {
        self.watch.is_running()
    }

    /// Read-only state view.
    pub fn watch(&self) -> StateWatch {
        self.watch.clone()
    }

    /// Latest published band levels.
    pub fn levels(&self) -> AudioLevels {
        self.meter.latest()
    }

    /// Handle to the level snapshot.
    pub fn level_meter(&self) -> LevelMeter {
        self.meter.clone()
    }

    /// A runtime fault that stopped the engine, if one has occurred since
    /// the last call.
    pub fn try_fault(&self) -> Option<RuntimeFault> {
        self.faults.try_recv().ok()
    }
}

fn run(mut engine: AudioEngine, commands: &Receiver<Command>, faults: &Sender<RuntimeFault>) {
    let poll = tick(FAULT_POLL_INTERVAL);
    loop {
        select! {
            recv(commands) -> msg => match msg {
                Ok(Command::Start { settings, reply }) => {
                    let outcome = match settings {
                        Some(settings) => engine.start_with(settings),
                        None => engine.start(),
                    };
                    let _ = reply.send(outcome);
                }
                Ok(Command::Stop { reply }) => {
                    engine.stop();
                    let _ = reply.send(());
                }
                Ok(Command::Apply(settings)) => {
                    engine.apply(&settings);
                }
                Ok(Command::Shutdown) | Err(_) => break,
            },
            recv(poll) -> _ => {
                if let Some(fault) = engine.poll() {
                    let _ = faults.send(fault);
                }
            }
        }
    }
    engine.stop();
    tracing::debug!("control thread exiting");
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(handle) = self.thread.take()
            && handle.join().is_err()
        {
            tracing::error!("control thread panicked");
        }
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle")
            .field("state", &self.watch.state())
            .finish_non_exhaustive()
    }
}
