//! Command implementations
//!
//! Each command module provides a clap-derived struct and an execute method
//! taking the resolved [`CommandContext`].

pub mod build;
pub mod clear;
pub mod help;
pub mod lint;
pub mod util;

use std::path::PathBuf;

use crate::build::HostOs;
use crate::config::CapiConfig;

/// Per-invocation state shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Workspace root; every toolchain command runs here
    pub project_root: PathBuf,
    /// Loaded capi-build.toml (or defaults) with environment overrides
    pub config: CapiConfig,
    /// Host the tool is running on
    pub host: HostOs,
    /// Echo commands and copied files
    pub verbose: bool,
}
