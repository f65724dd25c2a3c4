//! Release maintenance utilities

use anyhow::Result;
use clap::{Args, Subcommand};

use super::CommandContext;
use crate::release::license::check_license;
use crate::release::update_version;
use crate::utils::terminal::print_success;

/// Release maintenance utilities
#[derive(Args, Debug)]
pub struct UtilCommand {
    #[command(subcommand)]
    pub command: UtilSubcommand,
}

/// Available utilities
#[derive(Subcommand, Debug)]
pub enum UtilSubcommand {
    /// Bump the version in Cargo.toml and the third-party notice
    Upver {
        /// New version (e.g. 1.4.0)
        version: String,
    },

    /// Verify third-party licenses
    CheckLicense,
}

impl UtilCommand {
    /// Execute the selected utility
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        match self.command {
            UtilSubcommand::Upver { version } => {
                update_version(&ctx.project_root, &version, &ctx.config, ctx.verbose)?;
                print_success(&format!("version updated to {}", version));
            }
            UtilSubcommand::CheckLicense => {
                check_license(&ctx.project_root, &ctx.config, ctx.verbose)?;
                print_success("license check passed");
            }
        }
        Ok(())
    }
}
