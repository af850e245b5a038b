//! `aurel devices`: what the engine can open.

use aurel_io::{AudioDevice, default_device, list_devices};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// Every capture and playback device (the default)
    List,

    /// The system default microphone and speaker
    Info,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => list(),
        DevicesCommand::Info => info(),
    }
}

fn print_group(title: &str, devices: &[&AudioDevice]) {
    if devices.is_empty() {
        return;
    }
    println!("{title}:");
    for (idx, device) in devices.iter().enumerate() {
        println!(
            "  [{idx}] {} ({} Hz, {} ch)",
            device.name, device.default_sample_rate, device.default_channels
        );
    }
    println!();
}

fn list() -> anyhow::Result<()> {
    let devices = list_devices()?;
    if devices.is_empty() {
        println!("No audio devices found.");
        return Ok(());
    }

    let inputs: Vec<&AudioDevice> = devices.iter().filter(|d| d.is_input).collect();
    let outputs: Vec<&AudioDevice> = devices.iter().filter(|d| d.is_output).collect();

    print_group("Microphones", &inputs);
    print_group("Speakers / headphones", &outputs);
    println!("{} input(s), {} output(s)", inputs.len(), outputs.len());
    println!("Pick one with a name fragment, e.g. aurel listen --input-device usb");
    Ok(())
}

fn info() -> anyhow::Result<()> {
    let (input, output) = default_device()?;
    for (role, device) in [("Microphone", input), ("Speaker", output)] {
        match device {
            Some(device) => {
                println!("{role}: {} @ {} Hz", device.name, device.default_sample_rate);
            }
            None => println!("{role}: none"),
        }
    }
    Ok(())
}
