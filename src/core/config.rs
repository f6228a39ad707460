//! Configuration file management.
//!
//! Handles reading and validating `keywheel.toml`. Resource groups are
//! explicit configuration, not ambient environment state, so a rotation run
//! is reproducible from the file plus CLI flags alone.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Top-level `keywheel.toml` contents.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub rotation: RotationConfig,
}

/// Rotation scope and candidate filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Resource groups whose key vaults are scanned for rotation targets.
    #[serde(default)]
    pub resource_groups: Vec<String>,

    /// Optional prefix a secret name must carry to be considered a candidate.
    ///
    /// The prefix is a filter, not a wrapper: it is part of the name (by
    /// convention the leading characters of the storage-account segment) and
    /// is not stripped before decoding.
    #[serde(default)]
    pub secret_prefix: Option<String>,
}

impl Config {
    /// Load configuration from an explicit path, or `keywheel.toml` in the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or a toml
    /// parse error if it is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(constants::CONFIG_FILE));
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        debug!(
            path = %path.display(),
            resource_groups = config.rotation.resource_groups.len(),
            "loaded config"
        );
        Ok(config)
    }
}

impl RotationConfig {
    /// Apply CLI overrides and check the result is usable.
    ///
    /// `--resource-group` flags replace the configured list entirely when
    /// present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoResourceGroups` if neither the file nor the
    /// flags name a resource group.
    pub fn with_overrides(mut self, resource_groups: Vec<String>) -> Result<Self> {
        if !resource_groups.is_empty() {
            self.resource_groups = resource_groups;
        }
        if self.resource_groups.is_empty() {
            return Err(ConfigError::NoResourceGroups.into());
        }
        Ok(self)
    }

    /// Whether a secret name passes the candidate filter.
    pub fn is_candidate(&self, name: &str) -> bool {
        match &self.secret_prefix {
            Some(prefix) => name.starts_with(prefix),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[rotation]
resource_groups = ["rg-prod", "rg-staging"]
secret_prefix = "sa"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.rotation.resource_groups, ["rg-prod", "rg-staging"]);
        assert_eq!(config.rotation.secret_prefix.as_deref(), Some("sa"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/keywheel.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_overrides_replace_resource_groups() {
        let cfg = RotationConfig {
            resource_groups: vec!["rg-a".to_string()],
            secret_prefix: None,
        };
        let cfg = cfg.with_overrides(vec!["rg-b".to_string()]).unwrap();
        assert_eq!(cfg.resource_groups, ["rg-b"]);
    }

    #[test]
    fn test_empty_resource_groups_rejected() {
        let cfg = RotationConfig {
            resource_groups: Vec::new(),
            secret_prefix: None,
        };
        assert!(cfg.with_overrides(Vec::new()).is_err());
    }

    #[test]
    fn test_candidate_filter() {
        let cfg = RotationConfig {
            resource_groups: vec!["rg".to_string()],
            secret_prefix: Some("sa".to_string()),
        };
        assert!(cfg.is_candidate("sacsc-accountKey"));
        assert!(!cfg.is_candidate("db-password"));

        let open = RotationConfig {
            resource_groups: vec!["rg".to_string()],
            secret_prefix: None,
        };
        assert!(open.is_candidate("anything"));
    }
}
