use thiserror::Error;

use crate::core::name::CredentialKind;

/// A secret name that failed to decode into a descriptor.
///
/// Both variants are per-secret and non-fatal: the rotation loop logs a
/// warning, records the skip, and moves to the next candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unrecognized credential kind '{kind}' in secret name '{name}'")]
    UnrecognizedKind { name: String, kind: String },

    #[error("secret name '{name}' has a container segment, but '{kind}' credentials are account-scoped")]
    UnexpectedContainer { name: String, kind: CredentialKind },
}

/// A control-plane call (key fetch, SAS signing, listing, upload) failed.
///
/// Per-secret and non-fatal, like [`DecodeError`]. The core never retries
/// and never substitutes fallback material.
#[derive(Error, Debug, Clone)]
pub enum UpstreamError {
    #[error("az CLI not found on PATH (is the Azure CLI installed?)")]
    AzNotFound,

    #[error("failed to launch {command}: {message}")]
    Launch { command: String, message: String },

    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("unexpected output from {command}: {message}")]
    MalformedOutput { command: String, message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("no resource groups configured (set [rotation] resource_groups or pass --resource-group)")]
    NoResourceGroups,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
