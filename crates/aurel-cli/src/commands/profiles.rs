//! Saved profile management.

use super::common::{SettingsArgs, describe};
use aurel_config::{ProfileStore, save_user_settings};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProfilesArgs {
    /// Profile file to use instead of the default location
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<ProfilesCommand>,
}

#[derive(Subcommand)]
enum ProfilesCommand {
    /// List saved profiles
    List,

    /// Show one profile
    Show {
        /// Profile name
        name: String,
    },

    /// Save settings under a name, replacing any profile with that name
    Save {
        /// Profile name
        name: String,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Make a profile the settings for the next `listen`
    Load {
        /// Profile name
        name: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

pub fn run(args: ProfilesArgs) -> anyhow::Result<()> {
    let mut store = match &args.file {
        Some(path) => ProfileStore::open(path)?,
        None => ProfileStore::open_default()?,
    };

    match args.command.unwrap_or(ProfilesCommand::List) {
        ProfilesCommand::List => {
            if store.is_empty() {
                println!("No saved profiles.");
                println!("Save one with: aurel profiles save <name> --preset street");
                return Ok(());
            }
            println!("Saved Profiles");
            println!("==============\n");
            for profile in store.list() {
                println!("  {:<16} {}", profile.name, describe(&profile.settings));
            }
        }
        ProfilesCommand::Show { name } => {
            let settings = store.load(&name)?;
            println!("{} (preset '{}')", name.trim(), settings.preset());
            println!("  {}", describe(&settings));
        }
        ProfilesCommand::Save { name, settings } => {
            let settings = settings.resolve()?;
            let saved = store.upsert(&name, settings)?.name.clone();
            store.save()?;
            println!("Saved profile '{saved}'");
        }
        ProfilesCommand::Load { name } => {
            let settings = store.load(&name)?;
            save_user_settings(&settings)?;
            println!("Profile '{name}' will be used by the next `aurel listen`");
        }
        ProfilesCommand::Delete { name } => {
            let removed = store.remove(&name)?;
            store.save()?;
            println!("Deleted profile '{}'", removed.name);
        }
    }
    Ok(())
}
