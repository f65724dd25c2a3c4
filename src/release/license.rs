//! Third-party license verification
//!
//! The checker is a separate crate in the workspace that compares the
//! dependency tree against the notice file. It is treated as opaque: its
//! exit status is the result.

use std::path::Path;

use anyhow::Result;

use super::update_lock_command;
use crate::build::ToolCommand;
use crate::config::CapiConfig;
use crate::error::CapiError;
use crate::exec::run_checked;
use crate::utils::tools::require_tool;

/// `cargo run` for the checker crate
pub fn checker_command(config: &CapiConfig) -> ToolCommand {
    ToolCommand::new(&config.toolchain.cargo).arg("run")
}

/// Refresh the lock file, then run the license checker
pub fn check_license(project_root: &Path, config: &CapiConfig, verbose: bool) -> Result<()> {
    let checker_dir = project_root.join(&config.release.license_checker);
    if !checker_dir.join("Cargo.toml").is_file() {
        return Err(CapiError::config_error_with_hint(
            format!("License checker not found at {}", checker_dir.display()),
            "Set release.license_checker in capi-build.toml to the checker crate directory.",
        )
        .into());
    }

    require_tool(&config.toolchain.cargo, "license checking")?;
    run_checked(&update_lock_command(config), project_root, verbose)?;
    run_checked(&checker_command(config), &checker_dir, verbose)
}
