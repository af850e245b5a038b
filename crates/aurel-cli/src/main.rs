//! `aurel`: the hearing-assistance chain from a terminal.

mod commands;
mod meter;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aurel", author, version, about = "Aurel hearing-assistance CLI")]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). `RUST_LOG` wins.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Amplify the microphone live and show the level meter
    Listen(commands::listen::ListenArgs),

    /// List and inspect audio devices
    Devices(commands::devices::DevicesArgs),

    /// Show the factory presets
    Presets(commands::presets::PresetsArgs),

    /// Manage saved profiles
    Profiles(commands::profiles::ProfilesArgs),
}

/// stdout carries the meter and JSON records, so logs go to stderr.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    // cpal reports through `log`.
    tracing_log::LogTracer::init().ok();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Listen(args) => commands::listen::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Profiles(args) => commands::profiles::run(args),
    }
}
