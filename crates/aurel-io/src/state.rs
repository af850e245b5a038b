//! Two-state lifecycle gate.
//!
//! ```text
//!          start() ok
//!   Idle ─────────────► Running ──┐ apply(settings)
//!    ▲                     │  ◄───┘
//!    └──── stop() / fault ─┘
//! ```
//!
//! A failed start stays `Idle`. There is no paused or degraded state. The
//! state lives in one `AtomicBool` so the audio callbacks, the analysis
//! ticker and any display thread can read it without locking.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingState {
    /// No session; initial and terminal state.
    #[default]
    Idle,
    /// A session is live.
    Running,
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingState::Idle => f.write_str("idle"),
            ProcessingState::Running => f.write_str("running"),
        }
    }
}

impl From<bool> for ProcessingState {
    fn from(running: bool) -> Self {
        if running {
            ProcessingState::Running
        } else {
            ProcessingState::Idle
        }
    }
}

/// Owner of the lifecycle state. Only the engine drives transitions.
#[derive(Debug, Default)]
pub struct ProcessingStateMachine {
    running: Arc<AtomicBool>,
}

impl ProcessingStateMachine {
    /// Start in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> ProcessingState {
        self.running.load(Ordering::Acquire).into()
    }

    /// Whether a session is live.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// `start()` proceeds only from `Idle`.
    pub fn can_start(&self) -> bool {
        !self.is_running()
    }

    /// `apply()` proceeds only while `Running`.
    pub fn can_apply(&self) -> bool {
        self.is_running()
    }

    /// Read-only view for other threads.
    pub fn watch(&self) -> StateWatch {
        StateWatch {
            running: Arc::clone(&self.running),
        }
    }

    /// Flag shared with the session's callbacks and ticker.
    pub(crate) fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// `Idle → Running`. Returns `false` if already running.
    pub(crate) fn enter_running(&self) -> bool {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// `Running → Idle`. Returns `false` if already idle.
    pub(crate) fn enter_idle(&self) -> bool {
        self.running
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Cloneable, read-only view of the engine state.
#[derive(Debug, Clone)]
pub struct StateWatch {
    running: Arc<AtomicBool>,
}

impl StateWatch {
    /// Whether a session is live.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Current state.
    pub fn state(&self) -> ProcessingState {
        self.is_running().into()
    }
}
