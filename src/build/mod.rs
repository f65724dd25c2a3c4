//! Build configuration and toolchain orchestration
//!
//! ## Architecture
//!
//! ```text
//! commands/build.rs → BuildConfiguration → linker.rs → command.rs → cargo | cross
//!                                                    ↘ artifacts.rs → bin/, lib/
//! ```
//!
//! ## Modules
//!
//! - `target` - (host, architecture) → toolchain triple lookup
//! - `command` - toolchain argument assembly
//! - `linker` - `.cargo/config` linker override for Linux cross builds
//! - `artifacts` - copying built libraries into `bin/` and `lib/`

pub mod artifacts;
pub mod command;
pub mod linker;
pub mod target;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

pub use command::ToolCommand;
pub use target::{resolve_target, Architecture};

/// Operating system the tool is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOs {
    Windows,
    Macos,
    Linux,
    /// Any other host; architecture selection is ignored
    Other,
}

impl HostOs {
    /// Detect the host from the compiled target OS
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value onto a host
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" => HostOs::Windows,
            "macos" => HostOs::Macos,
            "linux" => HostOs::Linux,
            _ => HostOs::Other,
        }
    }

    pub fn is_windows(self) -> bool {
        self == HostOs::Windows
    }

    pub fn is_linux(self) -> bool {
        self == HostOs::Linux
    }

    /// Architecture names accepted by `--arch` on this host
    pub fn supported_architectures(self) -> &'static [&'static str] {
        match self {
            HostOs::Linux => &["x64", "arm32", "armv7", "aarch64"],
            HostOs::Windows => &["x64", "aarch64"],
            HostOs::Macos | HostOs::Other => &[],
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::Windows => write!(f, "windows"),
            HostOs::Macos => write!(f, "macos"),
            HostOs::Linux => write!(f, "linux"),
            HostOs::Other => write!(f, "{}", std::env::consts::OS),
        }
    }
}

/// Parameters of one build or lint invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    /// Host operating system
    pub operating_system: HostOs,
    /// Requested architecture, if any
    pub architecture: Option<Architecture>,
    /// Build in release mode
    pub release: bool,
    /// Feature list passed verbatim to `--features`
    pub features: String,
    /// Toolchain triple; `None` means native host build
    pub cross_compile_target: Option<&'static str>,
}

impl BuildConfiguration {
    /// Create a configuration, resolving the cross-compilation triple
    ///
    /// Fails with [`crate::error::CapiError::UnsupportedArchitecture`] when
    /// `arch` has no entry for `host`.
    pub fn new(host: HostOs, arch: Option<&str>, release: bool, features: Option<&str>) -> Result<Self> {
        let cross_compile_target = resolve_target(host, arch)?;
        Ok(Self {
            operating_system: host,
            architecture: arch.and_then(Architecture::parse),
            release,
            features: features.unwrap_or_default().to_string(),
            cross_compile_target,
        })
    }

    /// Configuration for the current host without cross-compilation
    pub fn native(host: HostOs, release: bool, features: Option<&str>) -> Self {
        Self {
            operating_system: host,
            architecture: None,
            release,
            features: features.unwrap_or_default().to_string(),
            cross_compile_target: None,
        }
    }

    /// `release` or `debug`
    pub fn profile_dir(&self) -> &'static str {
        if self.release {
            "release"
        } else {
            "debug"
        }
    }

    /// Directory the toolchain writes build outputs to
    pub fn artifact_location(&self, target_dir: &Path) -> ArtifactLocation {
        let mut dir = target_dir.to_path_buf();
        if let Some(triple) = self.cross_compile_target {
            dir.push(triple);
        }
        dir.push(self.profile_dir());
        ArtifactLocation { dir }
    }
}

/// Output directory of a build, e.g. `target/aarch64-unknown-linux-gnu/release`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    dir: PathBuf,
}

impl ArtifactLocation {
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
