//! CLI argument parsing using clap derive macros

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::build::HostOs;
use crate::commands::{
    build::BuildCommand, clear::ClearCommand, help::HelpCommand, lint::LintCommand,
    util::UtilCommand, CommandContext,
};
use crate::config::CapiConfig;
use crate::utils::paths::{find_project_root, find_project_root_from};
use crate::utils::terminal;

/// capi-build - build, lint and release helper for C-ABI library workspaces
#[derive(Parser, Debug)]
#[command(name = "capi-build")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (default: nearest directory containing Cargo.toml)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the library and copy artifacts into bin/ and lib/
    Build(BuildCommand),

    /// Run clippy with warnings denied
    Lint(LintCommand),

    /// Clean build outputs
    Clear(ClearCommand),

    /// Release maintenance utilities
    Util(UtilCommand),

    /// Show the help of a command
    Help(HelpCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            terminal::disable_colors();
        }

        let Some(command) = self.command else {
            Cli::command().print_help()?;
            return Ok(());
        };

        // Help never touches the project
        let command = match command {
            Commands::Help(cmd) => return cmd.execute(),
            other => other,
        };

        let project_root = match &self.project_dir {
            Some(dir) => find_project_root_from(dir)?,
            None => find_project_root()?,
        };
        let ctx = CommandContext {
            config: CapiConfig::load(&project_root)?,
            project_root,
            host: HostOs::detect(),
            verbose: self.verbose,
        };

        match command {
            Commands::Build(cmd) => cmd.execute(&ctx),
            Commands::Lint(cmd) => cmd.execute(&ctx),
            Commands::Clear(cmd) => cmd.execute(&ctx),
            Commands::Util(cmd) => cmd.execute(&ctx),
            Commands::Help(cmd) => cmd.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "capi-build", "build", "--release", "--arch", "aarch64", "--features", "a,b",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Build(cmd)) => {
                assert!(cmd.release);
                assert_eq!(cmd.arch.as_deref(), Some("aarch64"));
                assert_eq!(cmd.features.as_deref(), Some("a,b"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_lint_has_no_arch() {
        assert!(Cli::try_parse_from(["capi-build", "lint", "--arch", "x64"]).is_err());
    }

    #[test]
    fn test_parse_util_upver() {
        let cli = Cli::try_parse_from(["capi-build", "util", "upver", "1.2.3"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Util(_))));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["capi-build", "clear", "-v", "-C", "/tmp"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp")));
    }
}
