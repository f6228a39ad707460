//! Constants used throughout keywheel.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name (keywheel.toml).
pub const CONFIG_FILE: &str = "keywheel.toml";

/// Log filter environment variable.
pub const LOG_ENV: &str = "KEYWHEEL_LOG";

/// SAS expiry timestamp format accepted by the az CLI.
pub const SAS_EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%MZ";
