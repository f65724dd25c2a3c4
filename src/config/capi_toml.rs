//! capi-build.toml configuration parsing
//!
//! The file is optional; every key has a default.
//!
//! ```toml
//! [toolchain]
//! cargo = "cargo"
//! cross = "cross"
//!
//! [output]
//! bin_dir = "bin"
//! lib_dir = "lib"
//! target_dir = "target"
//!
//! [release]
//! crate_prefix = "mylib"
//! notice_file = "ThirdPartyNotice.txt"
//! license_checker = "tools/license-checker"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::error::{hints, CapiError};

/// Name of the configuration file at the project root
pub const CONFIG_FILE_NAME: &str = "capi-build.toml";

/// Environment variable overriding [`ToolchainConfig::cargo`]
pub const CARGO_ENV: &str = "CAPI_BUILD_CARGO";

/// Environment variable overriding [`ToolchainConfig::cross`]
pub const CROSS_ENV: &str = "CAPI_BUILD_CROSS";

/// Root configuration from capi-build.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapiConfig {
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

/// External programs invoked by the tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Native build/lint/clean program
    pub cargo: String,

    /// Cross-compilation wrapper used on Linux hosts
    pub cross: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            cargo: "cargo".to_string(),
            cross: "cross".to_string(),
        }
    }
}

/// Output directory layout, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Dynamic libraries are copied here
    pub bin_dir: PathBuf,

    /// Static archives and debug symbols are copied here
    pub lib_dir: PathBuf,

    /// Toolchain build output root
    pub target_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bin_dir: PathBuf::from("bin"),
            lib_dir: PathBuf::from("lib"),
            target_dir: PathBuf::from("target"),
        }
    }
}

/// Release maintenance settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Name prefix shared by the workspace's own crates
    pub crate_prefix: Option<String>,

    /// Third-party notice file rewritten by `util upver`
    pub notice_file: PathBuf,

    /// Crate directory of the license checker run by `util check-license`
    pub license_checker: PathBuf,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            crate_prefix: None,
            notice_file: PathBuf::from("ThirdPartyNotice.txt"),
            license_checker: PathBuf::from("tools/license-checker"),
        }
    }
}

impl CapiConfig {
    /// Load capi-build.toml from `project_root`, falling back to defaults
    ///
    /// Environment overrides are applied on top of the file.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE_NAME);
        let mut config = if path.is_file() {
            Self::load_from_path(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CapiError::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            CapiError::config_error_with_hint(
                format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e),
                hints::invalid_config(),
            )
        })?;
        Ok(config)
    }

    /// Apply `CAPI_BUILD_*` overrides; empty values are ignored
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(cargo) = lookup(CARGO_ENV).filter(|v| !v.is_empty()) {
            self.toolchain.cargo = cargo;
        }
        if let Some(cross) = lookup(CROSS_ENV).filter(|v| !v.is_empty()) {
            self.toolchain.cross = cross;
        }
    }
}
