//! Command-line interface.

pub mod completions;
pub mod decode;
pub mod output;
pub mod rotate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::error::Result;

/// Keywheel - rotate Azure Storage credentials into Key Vault secrets.
#[derive(Parser)]
#[command(
    name = "keywheel",
    about = "Rotates Azure Storage credentials into Key Vault secrets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (or set KEYWHEEL_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Rotate all candidate secrets in the configured resource groups
    Rotate {
        /// Path to keywheel.toml (default: ./keywheel.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Resource group to scan (repeatable; overrides the config file)
        #[arg(short = 'g', long = "resource-group")]
        resource_groups: Vec<String>,

        /// Decode and regenerate but do not upload anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Decode a secret name and show the rotation target it describes
    Decode {
        /// Secret name, e.g. sacsc-data-sasToken
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Execute a parsed command.
pub fn execute(command: Command) -> Result<()> {
    match command {
        Command::Rotate {
            config,
            resource_groups,
            dry_run,
        } => rotate::execute(config.as_deref(), resource_groups, dry_run),
        Command::Decode { name, json } => decode::execute(&name, json),
        Command::Completions { shell } => {
            completions::execute(shell);
            Ok(())
        }
    }
}
