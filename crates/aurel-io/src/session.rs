//! The live resource bundle.
//!
//! A [`ProcessingSession`] owns both device streams, the analysis ticker and
//! the shared chain parameters. It is built in one step and released in one
//! step:
//!
//! - **Build**: capture stream, then playback stream, then ticker. If any
//!   step fails the pieces already built are dropped before the error
//!   returns, so a failed build leaves nothing open.
//! - **Release**: clear the running flag, join the ticker, drop capture,
//!   drop playback, publish silent levels. Runs from [`release`] or from
//!   `Drop`, whichever comes first, and only once.
//!
//! [`release`]: ProcessingSession::release

use crate::backend::{AudioBackend, StreamHandle};
use crate::config::EngineConfig;
use crate::processor::{ChainParams, SignalProcessor};
use crate::ticker::AnalysisTicker;
use crate::{Result, RuntimeFault};
use aurel_analysis::{LevelMeter, SpectralAnalyzer};
use aurel_core::{DerivedParams, SignalChain};
use crossbeam_channel::bounded;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Error state shared with the backend's error callbacks.
#[derive(Debug, Default)]
pub(crate) struct FaultLatch {
    tripped: AtomicBool,
    count: AtomicU32,
    message: Mutex<Option<String>>,
}

impl FaultLatch {
    /// Record a stream error. Keeps the first message; never blocks.
    pub(crate) fn trip(&self, message: &str) {
        self.count.fetch_add(1, Ordering::Relaxed);
        if let Some(mut slot) = self.message.try_lock()
            && slot.is_none()
        {
            *slot = Some(message.to_owned());
        }
        self.tripped.store(true, Ordering::Release);
    }

    pub(crate) fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    pub(crate) fn to_fault(&self) -> RuntimeFault {
        RuntimeFault {
            message: self
                .message
                .lock()
                .clone()
                .unwrap_or_else(|| "unknown stream error".to_string()),
            error_count: self.count.load(Ordering::Relaxed),
        }
    }
}

/// Exclusive owner of one live signal path.
pub struct ProcessingSession {
    input: Option<StreamHandle>,
    output: Option<StreamHandle>,
    ticker: Option<AnalysisTicker>,
    params: Arc<ChainParams>,
    running: Arc<AtomicBool>,
    meter: LevelMeter,
    fault: Arc<FaultLatch>,
    released: bool,
}

impl ProcessingSession {
    /// Acquire devices and wire the full topology.
    ///
    /// The callbacks stay silent until `running` is set, which the engine
    /// does only after this returns `Ok`.
    pub(crate) fn build(
        backend: &dyn AudioBackend,
        config: &EngineConfig,
        initial: &DerivedParams,
        meter: LevelMeter,
        running: Arc<AtomicBool>,
    ) -> Result<Self> {
        config.validate()?;

        let output_config = config.output_stream_config();
        let sample_rate = backend.actual_sample_rate(&output_config) as f32;

        let params = Arc::new(ChainParams::new(initial));
        let fault = Arc::new(FaultLatch::default());
        let (input_tx, input_rx) = bounded::<f32>(config.input_queue_len());
        let (tap_tx, tap_rx) = bounded::<f32>(config.tap_queue_len());

        let mut chain = SignalChain::new(sample_rate, config.is_mono_input());
        chain.set_smoothing_time_ms(config.smoothing_ms);
        let mut processor = SignalProcessor::new(
            chain,
            Arc::clone(&params),
            Arc::clone(&running),
            input_rx,
            tap_tx,
            usize::from(config.input_channels),
            usize::from(config.output_channels),
        );

        let input = {
            let running = Arc::clone(&running);
            let fault = Arc::clone(&fault);
            backend.build_input_stream(
                &config.input_stream_config(),
                Box::new(move |data: &[f32]| {
                    if !running.load(Ordering::Acquire) {
                        return;
                    }
                    for &sample in data {
                        // Full queue means playback is behind; drop the sample.
                        let _ = input_tx.try_send(sample);
                    }
                }),
                Box::new(move |message: &str| fault.trip(message)),
            )?
        };

        let output = {
            let fault = Arc::clone(&fault);
            backend.build_output_stream(
                &output_config,
                Box::new(move |data: &mut [f32]| processor.process_buffer(data)),
                Box::new(move |message: &str| fault.trip(message)),
            )?
        };

        let ticker = AnalysisTicker::spawn(
            SpectralAnalyzer::new(config.analyzer),
            tap_rx,
            meter.clone(),
            Arc::clone(&running),
            config.tick_interval(),
        )?;

        tracing::debug!(
            sample_rate,
            input_channels = config.input_channels,
            output_channels = config.output_channels,
            "session built"
        );

        Ok(Self {
            input: Some(input),
            output: Some(output),
            ticker: Some(ticker),
            params,
            running,
            meter,
            fault,
            released: false,
        })
    }

    /// Shared stage parameters of this session.
    pub fn params(&self) -> &Arc<ChainParams> {
        &self.params
    }

    /// Whether the session still holds its resources.
    pub fn is_live(&self) -> bool {
        !self.released
    }

    /// The stream fault reported so far, if any.
    pub fn fault(&self) -> Option<RuntimeFault> {
        self.fault.is_tripped().then(|| self.fault.to_fault())
    }

    /// Release every resource. Idempotent.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.running.store(false, Ordering::Release);
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
        drop(self.input.take());
        drop(self.output.take());
        self.meter.reset();
        self.released = true;
        tracing::debug!("session released");
    }
}

impl Drop for ProcessingSession {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ProcessingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessingSession")
            .field("live", &self.is_live())
            .field("params", &self.params.load())
            .finish_non_exhaustive()
    }
}
