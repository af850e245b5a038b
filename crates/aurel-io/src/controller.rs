//! Live settings writes.
//!
//! [`ParameterController`] is attached to a session's [`ChainParams`] while
//! the session lives and detached before it is released. `apply` projects a
//! whole [`AudioSettings`] value onto the four stage parameters each time; it
//! keeps no history, so calling it once per slider event is fine.

use crate::processor::ChainParams;
use aurel_core::{AudioSettings, DerivedParams};
use std::sync::Arc;

/// Writes settings into the running chain.
#[derive(Debug, Default)]
pub struct ParameterController {
    target: Option<Arc<ChainParams>>,
}

impl ParameterController {
    /// A controller with nothing attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point at a live session's parameters.
    pub(crate) fn attach(&mut self, params: Arc<ChainParams>) {
        self.target = Some(params);
    }

    /// Forget the session's parameters. Later writes are dropped.
    pub(crate) fn detach(&mut self) {
        self.target = None;
    }

    /// Whether a session is attached.
    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    /// Write the derived values of `settings`. Returns `false` and does
    /// nothing when no session is attached.
    ///
    /// Never blocks and never allocates.
    pub fn apply(&self, settings: &AudioSettings) -> bool {
        let Some(params) = &self.target else {
            return false;
        };
        let derived = settings.derive();
        params.store(&derived);
        tracing::trace!(
            gain = derived.gain,
            pan = derived.pan,
            high_shelf_db = derived.high_shelf_db,
            low_shelf_db = derived.low_shelf_db,
            "applied settings"
        );
        true
    }

    /// Parameters currently held by the attached session.
    pub fn read_back(&self) -> Option<DerivedParams> {
        self.target.as_ref().map(|p| p.load())
    }
}
