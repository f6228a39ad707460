//! Rotation orchestrator integration tests.
//!
//! Drives `rotate_all` against in-memory control planes and checks the
//! skip-and-continue behavior, per-secret atomicity, and report contents.

use std::cell::RefCell;
use std::collections::BTreeMap;

use keywheel::core::config::RotationConfig;
use keywheel::core::rotation::{rotate_all, VaultPlane};
use keywheel::{CredentialMaterial, SasRequest, StoragePlane, UpstreamError};

/// In-memory Azure stand-in: fixed vault/secret topology, recorded uploads.
#[derive(Default)]
struct MockAzure {
    /// resource group -> vault names
    vaults: BTreeMap<String, Vec<String>>,
    /// vault name -> secret names
    secrets: BTreeMap<String, Vec<String>>,
    /// account -> primary key
    keys: BTreeMap<String, String>,
    /// recorded (vault, name, value) uploads
    puts: RefCell<Vec<(String, String, String)>>,
    /// resource groups whose vault listing fails
    broken_groups: Vec<String>,
}

impl MockAzure {
    fn new() -> Self {
        Self::default()
    }

    fn with_vault(mut self, group: &str, vault: &str, secrets: &[&str]) -> Self {
        self.vaults
            .entry(group.to_string())
            .or_default()
            .push(vault.to_string());
        self.secrets
            .insert(vault.to_string(), secrets.iter().map(|s| s.to_string()).collect());
        self
    }

    fn with_key(mut self, account: &str, key: &str) -> Self {
        self.keys.insert(account.to_string(), key.to_string());
        self
    }

    fn with_broken_group(mut self, group: &str) -> Self {
        self.broken_groups.push(group.to_string());
        self
    }

    fn uploads(&self) -> Vec<(String, String, String)> {
        self.puts.borrow().clone()
    }
}

impl VaultPlane for MockAzure {
    fn vaults(&self, resource_group: &str) -> Result<Vec<String>, UpstreamError> {
        if self.broken_groups.iter().any(|g| g == resource_group) {
            return Err(UpstreamError::CommandFailed {
                command: "az keyvault list".to_string(),
                stderr: format!("resource group '{resource_group}' could not be found"),
            });
        }
        Ok(self.vaults.get(resource_group).cloned().unwrap_or_default())
    }

    fn secret_names(&self, vault: &str) -> Result<Vec<String>, UpstreamError> {
        Ok(self.secrets.get(vault).cloned().unwrap_or_default())
    }

    fn put_secret(
        &self,
        vault: &str,
        name: &str,
        value: &CredentialMaterial,
    ) -> Result<(), UpstreamError> {
        self.puts.borrow_mut().push((
            vault.to_string(),
            name.to_string(),
            value.expose().to_string(),
        ));
        Ok(())
    }
}

impl StoragePlane for MockAzure {
    fn primary_key(&self, account: &str) -> Result<String, UpstreamError> {
        self.keys
            .get(account)
            .cloned()
            .ok_or_else(|| UpstreamError::CommandFailed {
                command: "az storage account keys list".to_string(),
                stderr: format!("storage account '{account}' not found"),
            })
    }

    fn sign_sas(&self, request: &SasRequest<'_>) -> Result<String, UpstreamError> {
        Ok(match request.container {
            Some(container) => format!("sig=mock-{container}"),
            None => "sig=mock-account".to_string(),
        })
    }
}

fn config(groups: &[&str]) -> RotationConfig {
    RotationConfig {
        resource_groups: groups.iter().map(|g| g.to_string()).collect(),
        secret_prefix: None,
    }
}

#[test]
fn test_rotates_every_credential_kind() {
    let azure = MockAzure::new()
        .with_vault(
            "rg1",
            "kv1",
            &[
                "sacsc-accountKey",
                "sacsc-accountConnStr",
                "sacsc-sasToken",
                "sacsc-data-sasUri",
            ],
        )
        .with_key("sacsc", "K==");

    let report = rotate_all(&config(&["rg1"]), &azure, &azure, false);

    assert!(report.is_clean());
    assert_eq!(report.rotated.len(), 4);

    let uploads = azure.uploads();
    let value_of = |name: &str| {
        uploads
            .iter()
            .find(|(_, n, _)| n == name)
            .map(|(_, _, v)| v.clone())
            .unwrap()
    };
    assert_eq!(value_of("sacsc-accountKey"), "K==");
    assert_eq!(
        value_of("sacsc-accountConnStr"),
        "DefaultEndpointsProtocol=https;AccountName=sacsc;AccountKey=K==;EndpointSuffix=core.windows.net"
    );
    assert_eq!(value_of("sacsc-sasToken"), "sig=mock-account");
    assert_eq!(
        value_of("sacsc-data-sasUri"),
        "https://sacsc.blob.core.windows.net/data?sig=mock-data"
    );
}

#[test]
fn test_undecodable_names_skip_without_aborting() {
    let azure = MockAzure::new()
        .with_vault(
            "rg1",
            "kv1",
            &["sacsc-foo", "sacsc-accountKey-accountKey", "sacsc-accountKey"],
        )
        .with_key("sacsc", "K==");

    let report = rotate_all(&config(&["rg1"]), &azure, &azure, false);

    assert_eq!(report.rotated.len(), 1);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.failed.is_empty());

    // Only the valid name reached the vault
    let uploads = azure.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].1, "sacsc-accountKey");
}

#[test]
fn test_upstream_failure_never_uploads_partial_material() {
    // "ghost" has no key; its secret must fail without touching the vault,
    // and the following secret must still rotate.
    let azure = MockAzure::new()
        .with_vault("rg1", "kv1", &["ghost-accountKey", "sacsc-accountKey"])
        .with_key("sacsc", "K==");

    let report = rotate_all(&config(&["rg1"]), &azure, &azure, false);

    assert_eq!(report.rotated.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].secret.as_deref(), Some("ghost-accountKey"));

    let uploads = azure.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].1, "sacsc-accountKey");
}

#[test]
fn test_dry_run_generates_but_never_uploads() {
    let azure = MockAzure::new()
        .with_vault("rg1", "kv1", &["sacsc-accountKey", "sacsc-data-sasToken"])
        .with_key("sacsc", "K==");

    let report = rotate_all(&config(&["rg1"]), &azure, &azure, true);

    assert_eq!(report.rotated.len(), 2);
    assert!(azure.uploads().is_empty());
}

#[test]
fn test_prefix_filters_candidates() {
    let azure = MockAzure::new()
        .with_vault("rg1", "kv1", &["sacsc-accountKey", "db-password"])
        .with_key("sacsc", "K==");

    let cfg = RotationConfig {
        resource_groups: vec!["rg1".to_string()],
        secret_prefix: Some("sa".to_string()),
    };
    let report = rotate_all(&cfg, &azure, &azure, false);

    // "db-password" is filtered out before decoding: not even a skip
    assert_eq!(report.rotated.len(), 1);
    assert!(report.skipped.is_empty());
    assert!(report.failed.is_empty());
}

#[test]
fn test_broken_resource_group_does_not_stop_the_batch() {
    let azure = MockAzure::new()
        .with_broken_group("rg-gone")
        .with_vault("rg1", "kv1", &["sacsc-accountKey"])
        .with_key("sacsc", "K==");

    let report = rotate_all(&config(&["rg-gone", "rg1"]), &azure, &azure, false);

    assert_eq!(report.rotated.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].secret.is_none());
    assert!(report.failed[0].scope.contains("rg-gone"));
}

#[test]
fn test_secrets_across_multiple_vaults_and_groups() {
    let azure = MockAzure::new()
        .with_vault("rg1", "kv1", &["saone-accountKey"])
        .with_vault("rg1", "kv2", &["satwo-sasToken"])
        .with_vault("rg2", "kv3", &["sathree-data-logs-sasUri"])
        .with_key("saone", "K1==")
        .with_key("satwo", "K2==")
        .with_key("sathree", "K3==");

    let report = rotate_all(&config(&["rg1", "rg2"]), &azure, &azure, false);

    assert!(report.is_clean());
    assert_eq!(report.rotated.len(), 3);

    let uploads = azure.uploads();
    assert!(uploads
        .iter()
        .any(|(v, n, _)| v == "kv3" && n == "sathree-data-logs-sasUri"));
}
