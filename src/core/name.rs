//! Secret-name codec.
//!
//! Key Vault secret names encode their rotation target as
//! `<account>[-<container>]-<kind>`. This module parses that grammar into a
//! typed [`SecretDescriptor`] and renders descriptors back to canonical names.

use serde::Serialize;

use crate::error::DecodeError;

/// The kind of credential a secret holds.
///
/// The textual labels are the exact, case-sensitive suffix tokens used in
/// secret names; they never change without a naming-convention migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CredentialKind {
    AccountKey,
    ConnectionString,
    SasToken,
    SasUri,
}

impl CredentialKind {
    /// All supported kinds, in naming-convention order.
    pub const ALL: [CredentialKind; 4] = [
        CredentialKind::AccountKey,
        CredentialKind::ConnectionString,
        CredentialKind::SasToken,
        CredentialKind::SasUri,
    ];

    /// The suffix token used in secret names.
    pub const fn label(self) -> &'static str {
        match self {
            CredentialKind::AccountKey => "accountKey",
            CredentialKind::ConnectionString => "accountConnStr",
            CredentialKind::SasToken => "sasToken",
            CredentialKind::SasUri => "sasUri",
        }
    }

    /// Parse a suffix token. Exact, case-sensitive match only.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    /// Whether this kind grants access to a whole storage account.
    ///
    /// Account-scoped kinds never carry a container segment.
    pub const fn is_account_scoped(self) -> bool {
        matches!(
            self,
            CredentialKind::AccountKey | CredentialKind::ConnectionString
        )
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The parsed identity of a rotation target.
///
/// Only constructible through [`SecretDescriptor::decode`], so every value
/// satisfies the grammar invariants: a recognized kind, and no container for
/// account-scoped kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretDescriptor {
    storage_account: String,
    container: Option<String>,
    kind: CredentialKind,
}

impl SecretDescriptor {
    /// Decode a raw secret name into a descriptor.
    ///
    /// Splits on `-`: the first token is the storage account, the last is the
    /// credential kind, and anything between is the container. Container names
    /// may themselves contain hyphens, so middle tokens are rejoined
    /// positionally rather than parsed.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnrecognizedKind` if the last token is not a
    /// known kind label (single-token names land here too), and
    /// `DecodeError::UnexpectedContainer` if a container segment accompanies
    /// an account-scoped kind.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let tokens: Vec<&str> = raw.split('-').collect();

        let (account, container, kind_token) = match tokens.as_slice() {
            [account, kind] => (*account, None, *kind),
            [account, middle @ .., kind] if !middle.is_empty() => {
                (*account, Some(middle.join("-")), *kind)
            }
            // Zero or one token: no account/container split is meaningful,
            // so the kind check on the last token decides the error.
            _ => {
                return Err(DecodeError::UnrecognizedKind {
                    name: raw.to_string(),
                    kind: tokens.last().copied().unwrap_or_default().to_string(),
                });
            }
        };

        let kind =
            CredentialKind::from_label(kind_token).ok_or_else(|| DecodeError::UnrecognizedKind {
                name: raw.to_string(),
                kind: kind_token.to_string(),
            })?;

        if kind.is_account_scoped() && container.is_some() {
            return Err(DecodeError::UnexpectedContainer {
                name: raw.to_string(),
                kind,
            });
        }

        Ok(Self {
            storage_account: account.to_string(),
            container,
            kind,
        })
    }

    /// Storage account name (first name segment).
    pub fn storage_account(&self) -> &str {
        &self.storage_account
    }

    /// Container name, present only for container-scoped secrets.
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Credential kind (last name segment).
    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    /// Render the canonical secret name for this descriptor.
    ///
    /// Decoding the result always reproduces the descriptor.
    pub fn secret_name(&self) -> String {
        match &self.container {
            Some(container) => {
                format!("{}-{}-{}", self.storage_account, container, self.kind.label())
            }
            None => format!("{}-{}", self.storage_account, self.kind.label()),
        }
    }
}

impl std::fmt::Display for SecretDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.secret_name())
    }
}
