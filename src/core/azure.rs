//! Azure control plane backed by the `az` CLI.
//!
//! Every call shells out to `az` and parses its JSON or TSV output. The
//! ambient `az login` session supplies authentication; keywheel never handles
//! tokens itself.

use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use crate::core::constants;
use crate::core::credential::{CredentialMaterial, SasRequest, StoragePlane};
use crate::core::rotation::VaultPlane;
use crate::error::UpstreamError;

/// Handle to the `az` binary.
pub struct AzCli {
    program: PathBuf,
}

impl AzCli {
    /// Locate `az` on PATH.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::AzNotFound` if the Azure CLI is not installed.
    pub fn discover() -> Result<Self, UpstreamError> {
        let program = which::which("az").map_err(|_| UpstreamError::AzNotFound)?;
        debug!(program = %program.display(), "found az CLI");
        Ok(Self { program })
    }

    /// Run `az` with the given arguments and return trimmed stdout.
    ///
    /// Only the leading subcommand words are logged: account keys and SAS
    /// material travel in the argument list.
    fn run(&self, args: &[&str]) -> Result<String, UpstreamError> {
        let command = display_name(args);
        debug!(%command, "invoking az");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| UpstreamError::Launch {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(UpstreamError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run `az` and parse its stdout as a JSON string array.
    fn run_json_names(&self, args: &[&str]) -> Result<Vec<String>, UpstreamError> {
        let stdout = self.run(args)?;
        serde_json::from_str(&stdout).map_err(|e| UpstreamError::MalformedOutput {
            command: display_name(args),
            message: e.to_string(),
        })
    }
}

/// First three argv words, enough to identify the call without its payload.
fn display_name(args: &[&str]) -> String {
    let words: Vec<&str> = args.iter().take(3).copied().collect();
    format!("az {}", words.join(" "))
}

impl VaultPlane for AzCli {
    fn vaults(&self, resource_group: &str) -> Result<Vec<String>, UpstreamError> {
        self.run_json_names(&[
            "keyvault",
            "list",
            "--resource-group",
            resource_group,
            "--query",
            "[].name",
            "--output",
            "json",
        ])
    }

    fn secret_names(&self, vault: &str) -> Result<Vec<String>, UpstreamError> {
        self.run_json_names(&[
            "keyvault",
            "secret",
            "list",
            "--vault-name",
            vault,
            "--query",
            "[].name",
            "--output",
            "json",
        ])
    }

    fn put_secret(
        &self,
        vault: &str,
        name: &str,
        value: &CredentialMaterial,
    ) -> Result<(), UpstreamError> {
        self.run(&[
            "keyvault",
            "secret",
            "set",
            "--vault-name",
            vault,
            "--name",
            name,
            "--value",
            value.expose(),
            "--output",
            "none",
        ])?;
        Ok(())
    }
}

impl StoragePlane for AzCli {
    fn primary_key(&self, account: &str) -> Result<String, UpstreamError> {
        let key = self.run(&[
            "storage",
            "account",
            "keys",
            "list",
            "--account-name",
            account,
            "--query",
            "[0].value",
            "--output",
            "tsv",
        ])?;
        if key.is_empty() {
            return Err(UpstreamError::MalformedOutput {
                command: "az storage account keys".to_string(),
                message: format!("no keys returned for account {account}"),
            });
        }
        Ok(key)
    }

    fn sign_sas(&self, request: &SasRequest<'_>) -> Result<String, UpstreamError> {
        let expiry = request
            .expiry
            .format(constants::SAS_EXPIRY_FORMAT)
            .to_string();

        let token = match request.container {
            Some(container) => self.run(&[
                "storage",
                "container",
                "generate-sas",
                "--account-name",
                request.account,
                "--account-key",
                request.key,
                "--name",
                container,
                "--permissions",
                request.permissions,
                "--expiry",
                &expiry,
                "--output",
                "tsv",
            ])?,
            None => self.run(&[
                "storage",
                "account",
                "generate-sas",
                "--account-name",
                request.account,
                "--account-key",
                request.key,
                "--permissions",
                request.permissions,
                "--services",
                request.services.unwrap_or_default(),
                "--resource-types",
                request.resource_types.unwrap_or_default(),
                "--expiry",
                &expiry,
                "--output",
                "tsv",
            ])?,
        };

        if token.is_empty() {
            return Err(UpstreamError::MalformedOutput {
                command: "az storage generate-sas".to_string(),
                message: "signer returned an empty token".to_string(),
            });
        }
        Ok(token)
    }
}
