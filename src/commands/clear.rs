//! Clear command implementation

use anyhow::Result;
use clap::Args;

use super::CommandContext;
use crate::build::ToolCommand;
use crate::exec::run_checked;
use crate::utils::tools::require_tool;

/// Remove the toolchain's build outputs
#[derive(Args, Debug)]
pub struct ClearCommand {}

impl ClearCommand {
    /// Execute the clear command
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let command = ToolCommand::new(&ctx.config.toolchain.cargo).arg("clean");

        require_tool(&command.program, "cleaning build outputs")?;
        run_checked(&command, &ctx.project_root, ctx.verbose)
    }
}
