//! Live listening command.

use super::common::{SettingsArgs, describe, volume_warning};
use crate::meter::{self, LevelsRecord};
use aurel_config::{ConfigError, save_user_settings};
use aurel_io::{CpalBackend, EngineConfig, EngineHandle, RuntimeFault, default_device};
use clap::Args;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Args)]
pub struct ListenArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Input device name (partial match)
    #[arg(long)]
    input_device: Option<String>,

    /// Output device name (partial match)
    #[arg(long)]
    output_device: Option<String>,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Buffer size in frames
    #[arg(long, default_value = "256")]
    buffer_size: u32,

    /// Meter redraws per second
    #[arg(long, default_value = "30")]
    refresh: f32,

    /// Width of each meter bar
    #[arg(long, default_value = "6")]
    bar_width: usize,

    /// Print one JSON object per redraw instead of the meter
    #[arg(long)]
    json: bool,

    /// Do not remember these settings for the next run
    #[arg(long)]
    no_save: bool,
}

pub fn run(args: ListenArgs) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;

    let config = EngineConfig {
        sample_rate: args.sample_rate,
        buffer_size: args.buffer_size,
        input_device: args.input_device.clone(),
        output_device: args.output_device.clone(),
        ..EngineConfig::default()
    };

    let (default_input, default_output) = default_device()?;
    let input_name = args
        .input_device
        .or(default_input.map(|d| d.name))
        .unwrap_or_else(|| "none".to_string());
    let output_name = args
        .output_device
        .or(default_output.map(|d| d.name))
        .unwrap_or_else(|| "none".to_string());

    eprintln!("Listening with preset '{}'", settings.preset());
    eprintln!("  {}", describe(&settings));
    eprintln!("  Input:  {input_name}");
    eprintln!("  Output: {output_name}");
    if let Some(warning) = volume_warning(settings.master_volume()) {
        eprintln!("  Warning: {warning}");
    }
    eprintln!("\nPress Ctrl+C to stop...\n");

    let handle = EngineHandle::spawn_with_settings(
        Box::new(CpalBackend::new()),
        config,
        settings.clone(),
    )?;

    if handle.start(None).recv()?.is_err() {
        anyhow::bail!(
            "microphone unavailable: check that a capture device exists and that access is allowed"
        );
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let frame = Duration::from_secs_f32(1.0 / args.refresh.clamp(1.0, 120.0));
    let meter_handle = handle.level_meter();
    let mut stdout = std::io::stdout().lock();

    let mut fault = None;
    while running.load(Ordering::SeqCst) {
        if let Some(reported) = handle.try_fault() {
            eprintln!();
            tracing::error!(error = %reported, "audio stopped");
            fault = Some(reported);
            break;
        }

        let levels = meter_handle.latest();
        if args.json {
            serde_json::to_writer(&mut stdout, &LevelsRecord::from(&levels))?;
            writeln!(stdout)?;
        } else {
            write!(stdout, "\r{}", meter::render(&levels, args.bar_width))?;
            stdout.flush()?;
        }
        std::thread::sleep(frame);
    }

    handle.stop();
    if !args.json {
        writeln!(stdout)?;
    }
    eprintln!("Stopped.");

    finish(fault, !args.no_save, || save_user_settings(&settings))
}

/// A fault makes the command fail and leaves the remembered settings alone;
/// a clean stop remembers them when `save` is set.
fn finish(
    fault: Option<RuntimeFault>,
    save: bool,
    remember: impl FnOnce() -> Result<(), ConfigError>,
) -> anyhow::Result<()> {
    if let Some(fault) = fault {
        return Err(anyhow::Error::new(fault).context("audio stopped unexpectedly"));
    }
    if save && let Err(e) = remember() {
        tracing::warn!(error = %e, "could not remember settings");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fault_fails_without_saving() {
        let saved = Cell::new(false);
        let fault = RuntimeFault {
            message: "device unplugged".to_string(),
            error_count: 1,
        };
        let result = finish(Some(fault), true, || {
            saved.set(true);
            Ok(())
        });

        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("device unplugged"), "got {err:#}");
        assert!(!saved.get());
    }

    #[test]
    fn clean_stop_saves_unless_disabled() {
        let saved = Cell::new(0);
        let remember = || {
            saved.set(saved.get() + 1);
            Ok(())
        };
        assert!(finish(None, true, remember).is_ok());
        assert!(finish(None, false, remember).is_ok());
        assert_eq!(saved.get(), 1);
    }

    #[test]
    fn failed_save_is_not_fatal() {
        let result = finish(None, true, || Err(ConfigError::InvalidProfileName));
        assert!(result.is_ok());
    }
}
