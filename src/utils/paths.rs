//! Path utilities for capi-build

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::CapiError;

/// Manifest marking the project root
pub const MANIFEST_FILE: &str = "Cargo.toml";

/// Find the project root by looking for Cargo.toml
pub fn find_project_root() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    find_project_root_from(&current_dir)
}

/// Find the project root starting from a specific directory
///
/// A relative `start` is resolved against the current directory, so the
/// returned root is always absolute.
pub fn find_project_root_from(start: &Path) -> Result<PathBuf> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(start)
    };
    let mut dir = start.as_path();
    loop {
        if dir.join(MANIFEST_FILE).is_file() {
            return Ok(dir.to_path_buf());
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(CapiError::config_error_with_hint(
                    format!(
                        "Could not find {} in {} or any parent",
                        MANIFEST_FILE,
                        start.display()
                    ),
                    "Run from inside the library workspace or pass --project-dir <DIR>.",
                )
                .into())
            }
        }
    }
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}
