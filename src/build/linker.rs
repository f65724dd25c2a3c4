//! Linker override for cross builds on a Linux host
//!
//! `cross` picks the linker for a triple from `.cargo/config`. The file is
//! rewritten from scratch on every cross build so it only ever names the
//! current triple.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::BuildConfiguration;
use crate::utils::paths::ensure_dir;

/// Path of the override file relative to the project root
pub const LINKER_CONFIG_PATH: &str = ".cargo/config";

/// Cross linker binary for a Linux target triple
pub fn linker_for(triple: &str) -> Option<&'static str> {
    match triple {
        "armv7-unknown-linux-gnueabihf" => Some("arm-linux-gnueabihf-gcc"),
        "aarch64-unknown-linux-gnu" => Some("aarch64-linux-gnu-gcc"),
        _ => None,
    }
}

/// Render the override file for `triple`
pub fn render_linker_config(triple: &str) -> String {
    match linker_for(triple) {
        Some(linker) => format!("[target.{triple}]\nlinker = \"{linker}\"\n"),
        None => String::new(),
    }
}

/// Write `.cargo/config` when `config` cross-compiles on a Linux host
///
/// Returns the path written, or `None` when no override applies.
pub fn write_linker_config(project_root: &Path, config: &BuildConfiguration) -> Result<Option<PathBuf>> {
    let Some(triple) = config.cross_compile_target else {
        return Ok(None);
    };
    if !config.operating_system.is_linux() {
        return Ok(None);
    }

    let path = project_root.join(LINKER_CONFIG_PATH);
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(&path, render_linker_config(triple))
        .with_context(|| format!("Failed to write linker config: {}", path.display()))?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::HostOs;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_known_triples() {
        assert_eq!(
            render_linker_config("armv7-unknown-linux-gnueabihf"),
            "[target.armv7-unknown-linux-gnueabihf]\nlinker = \"arm-linux-gnueabihf-gcc\"\n"
        );
        assert_eq!(
            render_linker_config("aarch64-unknown-linux-gnu"),
            "[target.aarch64-unknown-linux-gnu]\nlinker = \"aarch64-linux-gnu-gcc\"\n"
        );
    }

    #[test]
    fn test_written_for_linux_cross_build() {
        let temp_dir = TempDir::new().unwrap();
        let config = BuildConfiguration::new(HostOs::Linux, Some("aarch64"), false, None).unwrap();

        let path = write_linker_config(temp_dir.path(), &config).unwrap().unwrap();
        assert_eq!(path, temp_dir.path().join(".cargo").join("config"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[target.aarch64-unknown-linux-gnu]\nlinker = \"aarch64-linux-gnu-gcc\"\n"
        );
    }

    #[test]
    fn test_rewrite_replaces_previous_triple() {
        let temp_dir = TempDir::new().unwrap();
        let arm = BuildConfiguration::new(HostOs::Linux, Some("arm32"), false, None).unwrap();
        let aarch64 = BuildConfiguration::new(HostOs::Linux, Some("aarch64"), false, None).unwrap();

        write_linker_config(temp_dir.path(), &arm).unwrap();
        write_linker_config(temp_dir.path(), &aarch64).unwrap();
        let path = write_linker_config(temp_dir.path(), &aarch64).unwrap().unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "[target.aarch64-unknown-linux-gnu]\nlinker = \"aarch64-linux-gnu-gcc\"\n"
        );
        assert!(!content.contains("armv7"));
    }

    #[test]
    fn test_not_written_without_linux_cross_target() {
        let temp_dir = TempDir::new().unwrap();
        let configs = [
            BuildConfiguration::new(HostOs::Linux, None, false, None).unwrap(),
            BuildConfiguration::new(HostOs::Linux, Some("x64"), false, None).unwrap(),
            BuildConfiguration::new(HostOs::Windows, Some("aarch64"), false, None).unwrap(),
            BuildConfiguration::new(HostOs::Macos, Some("aarch64"), false, None).unwrap(),
        ];
        for config in &configs {
            assert!(write_linker_config(temp_dir.path(), config).unwrap().is_none());
        }
        assert!(!temp_dir.path().join(".cargo").exists());
    }
}
