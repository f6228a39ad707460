//! Decode command.
//!
//! Offline inspection of a secret name: shows the storage account, container,
//! and credential kind it resolves to, without touching Azure.

use crate::cli::output;
use crate::core::name::SecretDescriptor;
use crate::error::Result;

/// Decode a secret name and print the descriptor.
pub fn execute(name: &str, json: bool) -> Result<()> {
    let descriptor = SecretDescriptor::decode(name)?;

    if json {
        // Serialize never fails for this plain struct
        println!(
            "{}",
            serde_json::to_string_pretty(&descriptor).unwrap_or_default()
        );
        return Ok(());
    }

    output::kv("account", descriptor.storage_account());
    output::kv("container", descriptor.container().unwrap_or("(account-wide)"));
    output::kv("kind", descriptor.kind());

    Ok(())
}
