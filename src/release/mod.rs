//! Release maintenance: version bumping and license verification

pub mod license;
pub mod version;

use std::path::Path;

use anyhow::{Context, Result};

use crate::build::ToolCommand;
use crate::config::CapiConfig;
use crate::error::CapiError;
use crate::exec::run_checked;
use crate::utils::paths::MANIFEST_FILE;
use crate::utils::terminal::{print_info, print_warning};
use crate::utils::tools::require_tool;
use version::{
    derive_crate_prefix, manifest_substitutions, notice_substitutions, substitute_in_file, validate_version,
};

/// `cargo update` to refresh the lock file
pub fn update_lock_command(config: &CapiConfig) -> ToolCommand {
    ToolCommand::new(&config.toolchain.cargo).arg("update")
}

/// Prefix of the workspace's own crates: `release.crate_prefix`, or derived from the manifest
pub fn resolve_crate_prefix(manifest: &Path, config: &CapiConfig) -> Result<String> {
    if let Some(prefix) = &config.release.crate_prefix {
        return Ok(prefix.clone());
    }

    let content = std::fs::read_to_string(manifest)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    derive_crate_prefix(&content).ok_or_else(|| {
        CapiError::config_error_with_hint(
            format!(
                "Could not derive the crate prefix from {}",
                manifest.display()
            ),
            "Set release.crate_prefix in capi-build.toml.",
        )
        .into()
    })
}

/// Rewrite version fields in the manifest and notice file, then refresh the lock file
///
/// There is no rollback: when the lock refresh fails the rewritten files stay.
pub fn update_version(project_root: &Path, version: &str, config: &CapiConfig, verbose: bool) -> Result<()> {
    validate_version(version)?;

    let manifest = project_root.join(MANIFEST_FILE);
    let prefix = resolve_crate_prefix(&manifest, config)?;
    if verbose {
        print_info(&format!("Crate prefix: {}", prefix));
    }

    let changed = substitute_in_file(&manifest, &manifest_substitutions(version, &prefix)?)?;
    if verbose || !changed {
        print_info(&format!(
            "{} {}",
            manifest.display(),
            if changed { "updated" } else { "unchanged" }
        ));
    }

    let notice = project_root.join(&config.release.notice_file);
    if notice.is_file() {
        substitute_in_file(&notice, &notice_substitutions(version, &prefix)?)?;
    } else {
        print_warning(&format!("{} not found, skipping", notice.display()));
    }

    require_tool(&config.toolchain.cargo, "refreshing the lock file")?;
    run_checked(&update_lock_command(config), project_root, verbose)
}
