//! Error types and helpers for user-friendly error messages
//!
//! Every failure the CLI reports is either a local configuration problem,
//! caught before any toolchain process starts, or the nonzero status of an
//! external tool. Both map onto a process exit code here.

use thiserror::Error;

use crate::build::HostOs;

/// Exit status used when the requested architecture is not supported
pub const UNSUPPORTED_ARCH_EXIT_CODE: i32 = -1;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum CapiError {
    /// Architecture string has no entry in the host's target table
    #[error("arch \"{arch}\" is not supported on {host}")]
    UnsupportedArchitecture { arch: String, host: HostOs },

    /// External tool ran and returned a nonzero status
    #[error("{program} exited with status {code}")]
    ToolFailed { program: String, code: i32 },

    /// Tool/executable not found
    #[error("Missing tool: {tool} (required for {required_for})")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// Configuration or user-input errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        hint: Option<String>,
    },
}

impl CapiError {
    /// Create an unsupported architecture error
    pub fn unsupported_arch(arch: impl Into<String>, host: HostOs) -> Self {
        Self::UnsupportedArchitecture {
            arch: arch.into(),
            host,
        }
    }

    /// Create a tool failure error
    pub fn tool_failed(program: impl Into<String>, code: i32) -> Self {
        Self::ToolFailed {
            program: program.into(),
            code,
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a configuration error with a hint
    pub fn config_error_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CapiError::UnsupportedArchitecture { .. } => UNSUPPORTED_ARCH_EXIT_CODE,
            CapiError::ToolFailed { code, .. } => *code,
            CapiError::MissingTool { .. } | CapiError::Config { .. } => 1,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("{} {}", style("ERROR:").red().bold(), self);

        match self {
            CapiError::MissingTool { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            CapiError::Config { hint: Some(hint), .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            CapiError::UnsupportedArchitecture { host, .. } => {
                eprintln!(
                    "\n{} supported values on {}: {}",
                    style("HINT:").yellow().bold(),
                    host,
                    host.supported_architectures().join(", ")
                );
            }
            _ => {}
        }
    }
}

/// Report an error on stderr and return the exit code it maps to
pub fn report(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CapiError>() {
        Some(capi_err) => {
            match capi_err {
                // The tool already printed its own diagnostics
                CapiError::ToolFailed { .. } => {
                    crate::utils::terminal::print_error(&capi_err.to_string())
                }
                _ => capi_err.display_with_hints(),
            }
            capi_err.exit_code()
        }
        None => {
            crate::utils::terminal::print_error(&format!("{:#}", err));
            1
        }
    }
}

/// Common error hints for missing tools
pub mod hints {
    /// Get hint for missing cargo
    pub fn cargo() -> &'static str {
        "Install the Rust toolchain from https://rustup.rs/ or set CAPI_BUILD_CARGO\n\
         to the cargo executable you want to use."
    }

    /// Get hint for missing cross
    pub fn cross() -> &'static str {
        "Cross-compiling on Linux requires the `cross` wrapper:\n\
         • Run: cargo install cross\n\
         • Or set CAPI_BUILD_CROSS to an equivalent wrapper."
    }

    /// Get hint for an invalid capi-build.toml
    pub fn invalid_config() -> &'static str {
        "capi-build.toml is invalid. Known sections are [toolchain], [output] and [release].\n\
         Check the TOML syntax and remove unknown keys."
    }
}
