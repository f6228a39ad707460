//! Keywheel - rotates Azure Storage credentials into Key Vault secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── rotate        # Run a rotation pass
//! │   ├── decode        # Inspect a secret name offline
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # keywheel.toml management
//!     ├── name          # Secret-name codec (descriptor <-> name)
//!     ├── credential    # Credential generator (keys, SAS, URIs)
//!     ├── rotation      # Rotation orchestrator over plane traits
//!     └── azure         # az-CLI backed control plane
//! ```
//!
//! # Features
//!
//! - Decodes `<account>[-<container>]-<kind>` secret names into typed
//!   descriptors
//! - Regenerates account keys, connection strings, SAS tokens, and SAS URIs
//! - Republishes them into Key Vault across configured resource groups
//! - Skip-and-continue per secret: one bad name never aborts a batch

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::credential::{CredentialMaterial, SasRequest, StoragePlane};
pub use crate::core::name::{CredentialKind, SecretDescriptor};
pub use crate::core::rotation::{RotationReport, VaultPlane};
pub use crate::error::{DecodeError, Error, Result, UpstreamError};
