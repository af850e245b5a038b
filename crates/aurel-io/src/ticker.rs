//! Periodic analysis task.
//!
//! A dedicated thread wakes at the display rate, drains the analysis tap,
//! runs one [`SpectralAnalyzer`] tick and publishes the result. Every tick
//! first checks the shared running flag. Stopping joins the thread, so once
//! [`AnalysisTicker::stop`] returns no tick can fire again.

use crate::Result;
use aurel_analysis::{LevelMeter, SpectralAnalyzer};
use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub(crate) struct AnalysisTicker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl AnalysisTicker {
    pub(crate) fn spawn(
        mut analyzer: SpectralAnalyzer,
        tap_rx: Receiver<f32>,
        meter: LevelMeter,
        running: Arc<AtomicBool>,
        interval: Duration,
    ) -> Result<Self> {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("aurel-analysis".into())
            .spawn(move || {
                let ticks = tick(interval);
                let mut block = Vec::with_capacity(tap_rx.capacity().unwrap_or(4096));
                loop {
                    select! {
                        recv(ticks) -> _ => {
                            if !running.load(Ordering::Acquire) {
                                continue;
                            }
                            block.clear();
                            block.extend(tap_rx.try_iter());
                            analyzer.push_samples(&block);
                            meter.publish(analyzer.tick());
                        }
                        // A message or a dropped sender both mean stop.
                        recv(stop_rx) -> _ => break,
                    }
                }
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to exit. Idempotent.
    pub(crate) fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::error!("analysis thread panicked");
        }
    }
}

impl Drop for AnalysisTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
