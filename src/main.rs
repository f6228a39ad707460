//! Keywheel - rotates Azure Storage credentials into Key Vault secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keywheel::cli::output;
use keywheel::cli::{execute, Cli};
use keywheel::core::constants;
use keywheel::error::{ConfigError, Error, UpstreamError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keywheel=debug")
        } else {
            EnvFilter::new("keywheel=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound(_)) => {
                Some("create keywheel.toml or pass --config")
            }
            Error::Upstream(UpstreamError::AzNotFound) => {
                Some("install the Azure CLI and run: az login")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
