//! Credential generator.
//!
//! Turns a [`SecretDescriptor`] into the secret value to publish: the raw
//! account key, a connection string, a SAS token, or a full SAS URI. The
//! storage control plane (key fetch, SAS signing) is injected through the
//! [`StoragePlane`] trait so the generator itself performs no I/O.

use chrono::{DateTime, Duration, Utc};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::name::{CredentialKind, SecretDescriptor};
use crate::error::UpstreamError;

/// How long generated SAS credentials stay valid.
pub const SAS_VALIDITY_DAYS: i64 = 3;

/// SAS permission set: read, write, delete, list, add, create, update, process.
pub const SAS_PERMISSIONS: &str = "rwdlacup";

/// Services covered by account-level SAS tokens: blob, file, queue, table.
pub const SAS_SERVICES: &str = "bfqt";

/// Resource types covered by account-level SAS tokens: service, container,
/// object.
pub const SAS_RESOURCE_TYPES: &str = "sco";

/// Endpoint suffix baked into connection strings.
pub const ENDPOINT_SUFFIX: &str = "core.windows.net";

/// A generated secret value.
///
/// Held only long enough to hand to the vault sink, and wiped from memory on
/// drop. Never cached or written to disk.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CredentialMaterial(String);

impl CredentialMaterial {
    /// The secret value. Callers must not log or persist it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Debug must not leak the value; reports and logs format freely.
impl std::fmt::Debug for CredentialMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CredentialMaterial(..)")
    }
}

/// One SAS signing request, fully parameterized.
///
/// `services` and `resource_types` are populated for account-level requests
/// only; container-level requests scope by `container` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SasRequest<'a> {
    pub account: &'a str,
    pub key: &'a str,
    pub container: Option<&'a str>,
    pub permissions: &'static str,
    pub services: Option<&'static str>,
    pub resource_types: Option<&'static str>,
    pub expiry: DateTime<Utc>,
}

impl<'a> SasRequest<'a> {
    /// Account-level request: all services, all resource types.
    fn account_level(account: &'a str, key: &'a str, expiry: DateTime<Utc>) -> Self {
        Self {
            account,
            key,
            container: None,
            permissions: SAS_PERMISSIONS,
            services: Some(SAS_SERVICES),
            resource_types: Some(SAS_RESOURCE_TYPES),
            expiry,
        }
    }

    /// Container-level request, scoped to one blob container.
    fn container_level(
        account: &'a str,
        key: &'a str,
        container: &'a str,
        expiry: DateTime<Utc>,
    ) -> Self {
        Self {
            account,
            key,
            container: Some(container),
            permissions: SAS_PERMISSIONS,
            services: None,
            resource_types: None,
            expiry,
        }
    }
}

/// Storage control-plane boundary consumed by the generator.
///
/// Implementations call out to the cloud (see `core::azure`); tests substitute
/// in-memory fakes.
pub trait StoragePlane {
    /// Fetch the current primary access key for a storage account.
    fn primary_key(&self, account: &str) -> Result<String, UpstreamError>;

    /// Produce a SAS signature string for the given request.
    fn sign_sas(&self, request: &SasRequest<'_>) -> Result<String, UpstreamError>;
}

/// Generate the credential material for a descriptor.
///
/// Dispatches purely on the descriptor's kind. `now` anchors the SAS validity
/// window (now + [`SAS_VALIDITY_DAYS`]); kinds without an expiry ignore it.
///
/// # Errors
///
/// Surfaces `UpstreamError` from the plane unchanged: no retries, no fallback
/// values. The caller decides whether to skip or abort.
pub fn generate(
    descriptor: &SecretDescriptor,
    plane: &dyn StoragePlane,
    now: DateTime<Utc>,
) -> Result<CredentialMaterial, UpstreamError> {
    let account = descriptor.storage_account();
    let key = plane.primary_key(account)?;

    let value = match descriptor.kind() {
        CredentialKind::AccountKey => key,
        CredentialKind::ConnectionString => connection_string(account, &key),
        CredentialKind::SasToken => sign(descriptor, plane, &key, now)?,
        CredentialKind::SasUri => {
            let token = sign(descriptor, plane, &key, now)?;
            sas_uri(account, descriptor.container(), &token)
        }
    };

    Ok(CredentialMaterial(value))
}

fn sign(
    descriptor: &SecretDescriptor,
    plane: &dyn StoragePlane,
    key: &str,
    now: DateTime<Utc>,
) -> Result<String, UpstreamError> {
    let expiry = now + Duration::days(SAS_VALIDITY_DAYS);
    let account = descriptor.storage_account();
    let request = match descriptor.container() {
        Some(container) => SasRequest::container_level(account, key, container, expiry),
        None => SasRequest::account_level(account, key, expiry),
    };
    plane.sign_sas(&request)
}

/// Fixed connection-string rendering. The field order and endpoint suffix are
/// contractual; downstream consumers parse this exact shape.
fn connection_string(account: &str, key: &str) -> String {
    format!(
        "DefaultEndpointsProtocol=https;AccountName={account};AccountKey={key};EndpointSuffix={ENDPOINT_SUFFIX}"
    )
}

/// Blob-endpoint URL with the SAS token as query string.
fn sas_uri(account: &str, container: Option<&str>, token: &str) -> String {
    match container {
        Some(container) => format!("https://{account}.blob.{ENDPOINT_SUFFIX}/{container}?{token}"),
        None => format!("https://{account}.blob.{ENDPOINT_SUFFIX}/?{token}"),
    }
}
