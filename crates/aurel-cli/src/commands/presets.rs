//! Factory preset listing.

use super::common::describe;
use aurel_config::{factory_presets, preset};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: Option<PresetsCommand>,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List the factory presets
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one preset
    Show {
        /// Preset name
        name: String,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(PresetsCommand::List { json: false }) {
        PresetsCommand::List { json: true } => {
            let presets: Vec<_> = factory_presets().into_iter().map(|(_, s)| s).collect();
            println!("{}", serde_json::to_string_pretty(&presets)?);
        }
        PresetsCommand::List { json: false } => {
            println!("Factory Presets");
            println!("===============\n");
            for (name, settings) in factory_presets() {
                println!("  {:<8} {}", name, describe(&settings));
            }
            println!();
            println!("Use with: aurel listen --preset <name>");
        }
        PresetsCommand::Show { name } => {
            let settings = preset(&name)?;
            println!("{}", settings.preset());
            println!("  {}", describe(&settings));
        }
    }
    Ok(())
}
