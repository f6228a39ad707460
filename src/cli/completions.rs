//! Completions command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and PowerShell.

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completions on stdout.
pub fn execute(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "keywheel", &mut std::io::stdout());
}
