//! Rotation orchestrator.
//!
//! Walks the configured resource groups, lists each vault's secrets, and for
//! every candidate name runs decode -> generate -> upload as one unit. A
//! malformed name or a failed control-plane call skips that secret and the
//! batch keeps going; nothing in this module aborts a run.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::core::config::RotationConfig;
use crate::core::credential::{self, CredentialMaterial, StoragePlane};
use crate::core::name::SecretDescriptor;
use crate::error::{DecodeError, UpstreamError};

/// Key Vault control-plane boundary consumed by the orchestrator.
pub trait VaultPlane {
    /// List key vault names in a resource group.
    fn vaults(&self, resource_group: &str) -> Result<Vec<String>, UpstreamError>;

    /// List secret names in a vault.
    fn secret_names(&self, vault: &str) -> Result<Vec<String>, UpstreamError>;

    /// Persist a credential under a secret name in a vault.
    fn put_secret(
        &self,
        vault: &str,
        name: &str,
        value: &CredentialMaterial,
    ) -> Result<(), UpstreamError>;
}

/// A secret that was rotated (or would be, under `--dry-run`).
#[derive(Debug, Clone)]
pub struct RotatedSecret {
    pub vault: String,
    pub name: String,
}

/// A candidate whose name did not decode; not an error for the batch.
#[derive(Debug, Clone)]
pub struct SkippedSecret {
    pub vault: String,
    pub name: String,
    pub reason: DecodeError,
}

/// A control-plane call that failed mid-batch.
///
/// `secret` is `None` for discovery failures (vault or secret listing),
/// where no single secret is implicated.
#[derive(Debug, Clone)]
pub struct FailedCall {
    pub scope: String,
    pub secret: Option<String>,
    pub error: UpstreamError,
}

/// Outcome of one rotation pass.
#[derive(Debug, Default)]
pub struct RotationReport {
    pub rotated: Vec<RotatedSecret>,
    pub skipped: Vec<SkippedSecret>,
    pub failed: Vec<FailedCall>,
}

impl RotationReport {
    /// True when every candidate rotated cleanly.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Run one rotation pass over the configured resource groups.
///
/// Strictly sequential: each secret is fully decoded, generated, and uploaded
/// before the next is touched, so no partial credential material ever reaches
/// a vault. With `dry_run`, generation still runs but nothing is uploaded.
pub fn rotate_all(
    config: &RotationConfig,
    vaults: &dyn VaultPlane,
    storage: &dyn StoragePlane,
    dry_run: bool,
) -> RotationReport {
    let mut report = RotationReport::default();

    for resource_group in &config.resource_groups {
        info!(%resource_group, "scanning resource group");

        let vault_names = match vaults.vaults(resource_group) {
            Ok(names) => names,
            Err(error) => {
                warn!(%resource_group, %error, "vault listing failed, skipping group");
                report.failed.push(FailedCall {
                    scope: format!("resource group {resource_group}"),
                    secret: None,
                    error,
                });
                continue;
            }
        };

        for vault in vault_names {
            rotate_vault(config, vaults, storage, &vault, dry_run, &mut report);
        }
    }

    info!(
        rotated = report.rotated.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        dry_run,
        "rotation pass complete"
    );
    report
}

fn rotate_vault(
    config: &RotationConfig,
    vaults: &dyn VaultPlane,
    storage: &dyn StoragePlane,
    vault: &str,
    dry_run: bool,
    report: &mut RotationReport,
) {
    let names = match vaults.secret_names(vault) {
        Ok(names) => names,
        Err(error) => {
            warn!(vault, %error, "secret listing failed, skipping vault");
            report.failed.push(FailedCall {
                scope: format!("vault {vault}"),
                secret: None,
                error,
            });
            return;
        }
    };

    for name in names {
        if !config.is_candidate(&name) {
            debug!(vault, %name, "not a rotation candidate");
            continue;
        }

        let descriptor = match SecretDescriptor::decode(&name) {
            Ok(descriptor) => descriptor,
            Err(reason) => {
                warn!(vault, %name, %reason, "skipping undecodable secret name");
                report.skipped.push(SkippedSecret {
                    vault: vault.to_string(),
                    name,
                    reason,
                });
                continue;
            }
        };

        match rotate_secret(storage, vaults, vault, &descriptor, dry_run) {
            Ok(()) => {
                info!(vault, %name, kind = %descriptor.kind(), dry_run, "rotated secret");
                report.rotated.push(RotatedSecret {
                    vault: vault.to_string(),
                    name,
                });
            }
            Err(error) => {
                warn!(vault, %name, %error, "rotation failed for secret");
                report.failed.push(FailedCall {
                    scope: format!("vault {vault}"),
                    secret: Some(name),
                    error,
                });
            }
        }
    }
}

/// Decode has already happened; generate and upload as one unit.
fn rotate_secret(
    storage: &dyn StoragePlane,
    vaults: &dyn VaultPlane,
    vault: &str,
    descriptor: &SecretDescriptor,
    dry_run: bool,
) -> Result<(), UpstreamError> {
    let material = credential::generate(descriptor, storage, Utc::now())?;
    if dry_run {
        return Ok(());
    }
    vaults.put_secret(vault, &descriptor.secret_name(), &material)
}
