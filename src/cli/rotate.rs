//! Rotation command.
//!
//! Loads the configuration, wires the az-CLI control plane into the
//! orchestrator, runs one pass, and renders the report.

use std::path::Path;

use crate::cli::output;
use crate::core::azure::AzCli;
use crate::core::config::Config;
use crate::core::rotation::{self, RotationReport};
use crate::error::Result;

/// Execute a rotation pass.
pub fn execute(config_path: Option<&Path>, resource_groups: Vec<String>, dry_run: bool) -> Result<()> {
    let config = Config::load(config_path)?
        .rotation
        .with_overrides(resource_groups)?;

    let az = AzCli::discover()?;

    output::section(if dry_run {
        "Rotation (dry run)"
    } else {
        "Rotation"
    });
    output::kv("resource groups", config.resource_groups.join(", "));
    if let Some(prefix) = &config.secret_prefix {
        output::kv("secret prefix", prefix);
    }
    println!();

    let report = rotation::rotate_all(&config, &az, &az, dry_run);
    render(&report, dry_run);

    Ok(())
}

fn render(report: &RotationReport, dry_run: bool) {
    let verb = if dry_run { "would rotate" } else { "rotated" };

    for secret in &report.rotated {
        output::list_item(&format!("{} {} ({})", verb, secret.name, secret.vault));
    }
    for skip in &report.skipped {
        output::warn(&format!(
            "skipped {} ({}): {}",
            skip.name, skip.vault, skip.reason
        ));
    }
    for fail in &report.failed {
        match &fail.secret {
            Some(name) => output::error(&format!("{} ({}): {}", name, fail.scope, fail.error)),
            None => output::error(&format!("{}: {}", fail.scope, fail.error)),
        }
    }

    println!();
    if report.is_clean() {
        output::success(&format!("{} {} secret(s)", verb, report.rotated.len()));
    } else {
        output::warn(&format!(
            "{} {} secret(s), {} skipped, {} failed",
            verb,
            report.rotated.len(),
            report.skipped.len(),
            report.failed.len()
        ));
    }
    if !report.skipped.is_empty() {
        output::hint("skipped names do not match <account>[-<container>]-<kind>");
    }
}
