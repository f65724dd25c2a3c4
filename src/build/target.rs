//! Architecture → toolchain triple resolution
//!
//! Only Linux and Windows hosts can cross-compile. On every other host the
//! requested architecture is ignored and a native build is used.

use std::fmt;

use anyhow::Result;

use super::HostOs;
use crate::error::CapiError;

/// Architecture accepted by `--arch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    X64,
    /// 32-bit ARM (`arm32` or `armv7`)
    Arm32,
    Aarch64,
}

impl Architecture {
    /// Parse an `--arch` value; names are case-sensitive
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "x64" => Some(Architecture::X64),
            "arm32" | "armv7" => Some(Architecture::Arm32),
            "aarch64" => Some(Architecture::Aarch64),
            _ => None,
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::X64 => write!(f, "x64"),
            Architecture::Arm32 => write!(f, "arm32"),
            Architecture::Aarch64 => write!(f, "aarch64"),
        }
    }
}

/// Look up the triple for `arch` on `host`
///
/// `Some(None)` is a native build; `None` means the host has no entry for
/// this architecture.
fn lookup(host: HostOs, arch: Architecture) -> Option<Option<&'static str>> {
    match (host, arch) {
        (HostOs::Linux, Architecture::Arm32) => Some(Some("armv7-unknown-linux-gnueabihf")),
        (HostOs::Linux, Architecture::Aarch64) => Some(Some("aarch64-unknown-linux-gnu")),
        (HostOs::Linux, Architecture::X64) => Some(None),
        (HostOs::Windows, Architecture::Aarch64) => Some(Some("aarch64-pc-windows-msvc")),
        (HostOs::Windows, Architecture::X64) => Some(None),
        (HostOs::Windows, Architecture::Arm32) => None,
        (HostOs::Macos | HostOs::Other, _) => Some(None),
    }
}

/// Resolve the cross-compilation triple for a requested architecture
///
/// An architecture without a table entry is a configuration error and is
/// never retried.
pub fn resolve_target(host: HostOs, arch: Option<&str>) -> Result<Option<&'static str>> {
    let Some(name) = arch else {
        return Ok(None);
    };

    if !(host.is_linux() || host.is_windows()) {
        return Ok(None);
    }

    match Architecture::parse(name).and_then(|arch| lookup(host, arch)) {
        Some(triple) => Ok(triple),
        None => Err(CapiError::unsupported_arch(name, host).into()),
    }
}
