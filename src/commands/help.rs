//! Help command implementation

use anyhow::{Context, Result};
use clap::{Args, CommandFactory};

use crate::cli::Cli;
use crate::error::CapiError;

/// Show the help of a command
#[derive(Args, Debug)]
pub struct HelpCommand {
    /// Command name which help is shown (e.g. `build` or `util upver`)
    #[arg(required = true)]
    pub command: Vec<String>,
}

impl HelpCommand {
    /// Execute the help command
    pub fn execute(self) -> Result<()> {
        let mut root = Cli::command();
        root.build();

        let mut current = &mut root;
        for name in &self.command {
            let available: Vec<String> = current
                .get_subcommands()
                .map(|sub| sub.get_name().to_string())
                .collect();
            current = current.find_subcommand_mut(name).ok_or_else(|| {
                CapiError::config_error_with_hint(
                    format!("no such command: '{}'", self.command.join(" ")),
                    format!("available: {}", available.join(", ")),
                )
            })?;
        }

        current.print_help().context("Failed to print help")?;
        Ok(())
    }
}
