//! Toolchain command assembly

use std::fmt;

use super::BuildConfiguration;
use crate::config::ToolchainConfig;

/// A program invocation: executable plus argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Build the toolchain invocation for `subcommands` under `config`
///
/// Cross builds on a Linux host go through the cross wrapper; elsewhere the
/// native builder gets an explicit `--target`. `--features` is always
/// passed, with an empty value when no features were requested.
pub fn toolchain_command(
    config: &BuildConfiguration,
    subcommands: &[&str],
    toolchain: &ToolchainConfig,
) -> ToolCommand {
    let mut command = match config.cross_compile_target {
        None => ToolCommand::new(&toolchain.cargo).args(subcommands.iter().copied()),
        Some(triple) => {
            let program = if config.operating_system.is_linux() {
                &toolchain.cross
            } else {
                &toolchain.cargo
            };
            ToolCommand::new(program)
                .args(subcommands.iter().copied())
                .args(["--target", triple])
        }
    };

    if config.release {
        command = command.arg("--release");
    }

    command.args(["--features", config.features.as_str()])
}

/// `build --locked` invocation
pub fn build_command(config: &BuildConfiguration, toolchain: &ToolchainConfig) -> ToolCommand {
    toolchain_command(config, &["build", "--locked"], toolchain)
}

/// `clippy` invocation treating every warning as an error
pub fn lint_command(config: &BuildConfiguration, toolchain: &ToolchainConfig) -> ToolCommand {
    toolchain_command(config, &["clippy"], toolchain).args(["--tests", "--", "-D", "warnings"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::HostOs;

    fn toolchain() -> ToolchainConfig {
        ToolchainConfig::default()
    }

    fn args(command: &ToolCommand) -> Vec<&str> {
        command.args.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_native_build_command() {
        let config = BuildConfiguration::new(HostOs::Linux, None, false, None).unwrap();
        let command = build_command(&config, &toolchain());
        assert_eq!(command.program, "cargo");
        assert_eq!(args(&command), ["build", "--locked", "--features", ""]);
    }

    #[test]
    fn test_release_and_features() {
        let config =
            BuildConfiguration::new(HostOs::Macos, None, true, Some("static,remote")).unwrap();
        let command = build_command(&config, &toolchain());
        assert_eq!(command.program, "cargo");
        assert_eq!(
            args(&command),
            ["build", "--locked", "--release", "--features", "static,remote"]
        );
    }

    #[test]
    fn test_linux_cross_uses_wrapper() {
        let config = BuildConfiguration::new(HostOs::Linux, Some("armv7"), true, None).unwrap();
        let command = build_command(&config, &toolchain());
        assert_eq!(command.program, "cross");
        assert_eq!(
            args(&command),
            [
                "build",
                "--locked",
                "--target",
                "armv7-unknown-linux-gnueabihf",
                "--release",
                "--features",
                ""
            ]
        );
    }

    #[test]
    fn test_windows_cross_uses_cargo_with_target() {
        let config = BuildConfiguration::new(HostOs::Windows, Some("aarch64"), false, Some("a b"))
            .unwrap();
        let command = build_command(&config, &toolchain());
        assert_eq!(command.program, "cargo");
        assert_eq!(
            args(&command),
            [
                "build",
                "--locked",
                "--target",
                "aarch64-pc-windows-msvc",
                "--features",
                "a b"
            ]
        );
    }

    #[test]
    fn test_lint_command_appends_clippy_flags() {
        let config = BuildConfiguration::native(HostOs::Linux, true, Some("x"));
        let command = lint_command(&config, &toolchain());
        assert_eq!(
            args(&command),
            ["clippy", "--release", "--features", "x", "--tests", "--", "-D", "warnings"]
        );
    }

    #[test]
    fn test_command_assembly_is_deterministic() {
        let config = BuildConfiguration::new(HostOs::Linux, Some("aarch64"), true, Some("f"))
            .unwrap();
        let first = build_command(&config, &toolchain());
        let second = build_command(&config, &toolchain());
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_configured_programs() {
        let toolchain = ToolchainConfig {
            cargo: "/opt/rust/bin/cargo".to_string(),
            cross: "cross-util".to_string(),
        };
        let native = BuildConfiguration::native(HostOs::Linux, false, None);
        assert_eq!(build_command(&native, &toolchain).program, "/opt/rust/bin/cargo");

        let cross = BuildConfiguration::new(HostOs::Linux, Some("aarch64"), false, None).unwrap();
        assert_eq!(build_command(&cross, &toolchain).program, "cross-util");
    }

    #[test]
    fn test_display_quotes_empty_args() {
        let config = BuildConfiguration::native(HostOs::Linux, false, None);
        let command = build_command(&config, &toolchain());
        assert_eq!(command.to_string(), "cargo build --locked --features \"\"");
    }
}
