//! Lint command implementation

use anyhow::Result;
use clap::Args;

use super::CommandContext;
use crate::build::command::lint_command;
use crate::build::BuildConfiguration;
use crate::exec::run_checked;
use crate::utils::tools::require_tool;

/// Run clippy over the workspace, denying warnings
#[derive(Args, Debug)]
pub struct LintCommand {
    /// Lint the release profile
    #[arg(long)]
    pub release: bool,

    /// Features to enable (comma- or space-separated)
    #[arg(long)]
    pub features: Option<String>,
}

impl LintCommand {
    /// Execute the lint command
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let build_config = BuildConfiguration::native(ctx.host, self.release, self.features.as_deref());
        let command = lint_command(&build_config, &ctx.config.toolchain);

        require_tool(&command.program, "linting")?;
        run_checked(&command, &ctx.project_root, ctx.verbose)
    }
}
