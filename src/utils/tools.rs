//! Tool detection with helpful errors when a toolchain program is missing

use std::path::{Path, PathBuf};

use anyhow::Result;
use which::which;

use crate::error::{hints, CapiError};

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Tool name as configured
    pub name: String,
    /// Path to the tool executable
    pub path: PathBuf,
}

/// Check if a tool exists and return its information
pub fn check_tool(tool_name: &str) -> Option<ToolInfo> {
    which(tool_name).ok().map(|path| ToolInfo {
        name: tool_name.to_string(),
        path,
    })
}

/// Require a tool to exist, return error with hint if missing
pub fn require_tool(tool_name: &str, required_for: &str) -> Result<ToolInfo> {
    check_tool(tool_name)
        .ok_or_else(|| CapiError::missing_tool(tool_name, required_for, get_tool_hint(tool_name)).into())
}

/// Get installation hint for a tool
fn get_tool_hint(tool_name: &str) -> &'static str {
    let stem = Path::new(tool_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(tool_name);
    match stem {
        "cargo" => hints::cargo(),
        "cross" => hints::cross(),
        _ => "Install this tool and ensure it's in your PATH",
    }
}
