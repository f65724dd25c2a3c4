//! Build command implementation

use anyhow::Result;
use clap::Args;

use super::CommandContext;
use crate::build::artifacts::{collect_dynamic, collect_static};
use crate::build::command::build_command;
use crate::build::linker::write_linker_config;
use crate::build::BuildConfiguration;
use crate::exec::run_checked;
use crate::utils::paths::ensure_dir;
use crate::utils::terminal::{print_info, print_success};
use crate::utils::tools::require_tool;

/// Build the library and collect its artifacts
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Build in release mode
    #[arg(long)]
    pub release: bool,

    /// Cross-compile for a specific architecture (x64, arm32/armv7, aarch64)
    #[arg(long)]
    pub arch: Option<String>,

    /// Features to enable (comma- or space-separated)
    #[arg(long)]
    pub features: Option<String>,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        // Unsupported architectures fail here, before anything is spawned
        let build_config = BuildConfiguration::new(
            ctx.host,
            self.arch.as_deref(),
            self.release,
            self.features.as_deref(),
        )?;
        let command = build_command(&build_config, &ctx.config.toolchain);

        if ctx.verbose {
            if let Some(arch) = build_config.architecture {
                print_info(&format!(
                    "Architecture {} on {}: {}",
                    arch,
                    ctx.host,
                    build_config.cross_compile_target.unwrap_or("native")
                ));
            }
        }

        if let Some(path) = write_linker_config(&ctx.project_root, &build_config)? {
            if ctx.verbose {
                print_info(&format!("Wrote linker override {}", path.display()));
            }
        }

        let tool = require_tool(&command.program, "building the library")?;
        if ctx.verbose {
            print_info(&format!("Using {} at {}", tool.name, tool.path.display()));
        }
        run_checked(&command, &ctx.project_root, ctx.verbose)?;

        let output = &ctx.config.output;
        let location = build_config.artifact_location(&ctx.project_root.join(&output.target_dir));
        let bin_dir = ctx.project_root.join(&output.bin_dir);
        let lib_dir = ctx.project_root.join(&output.lib_dir);

        ensure_dir(&bin_dir)?;
        let mut copied = collect_dynamic(ctx.host, &location, &bin_dir)?;
        ensure_dir(&lib_dir)?;
        copied.extend(collect_static(
            ctx.host,
            &location,
            &bin_dir,
            &lib_dir,
            self.release,
        )?);

        if ctx.verbose {
            for path in &copied {
                print_info(&format!("Copied {}", path.display()));
            }
        }
        print_success(&format!(
            "{} build finished, {} artifact(s) copied from {}",
            build_config.profile_dir(),
            copied.len(),
            location.dir().display()
        ));

        Ok(())
    }
}
