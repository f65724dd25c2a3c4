//! Subprocess execution for toolchain commands

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::build::ToolCommand;
use crate::error::CapiError;
use crate::utils::terminal::print_info;

/// Exit code reported when the child was terminated without one (signal)
const NO_EXIT_CODE: i32 = 1;

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code
    pub exit_code: i32,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code().unwrap_or(NO_EXIT_CODE),
            duration,
        }
    }
}

/// Run `command` in `cwd`, inheriting stdin/stdout/stderr
pub fn run_command(command: &ToolCommand, cwd: &Path) -> Result<CommandResult> {
    let start = Instant::now();

    let status = Command::new(&command.program)
        .args(&command.args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to execute {}", command.program))?;

    Ok(CommandResult::from_status(status, start.elapsed()))
}

/// Run `command` and turn a nonzero exit into [`CapiError::ToolFailed`]
///
/// The child's status is passed through unmodified.
pub fn run_checked(command: &ToolCommand, cwd: &Path, verbose: bool) -> Result<()> {
    if verbose {
        print_info(&format!("Running: {} (in {})", command, cwd.display()));
    }

    let result = run_command(command, cwd)?;

    if verbose {
        print_info(&format!(
            "{} finished in {:.1}s",
            command.program,
            result.duration.as_secs_f64()
        ));
    }

    if result.success {
        Ok(())
    } else {
        Err(CapiError::tool_failed(&command.program, result.exit_code).into())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_success_status() {
        let temp_dir = TempDir::new().unwrap();
        let command = ToolCommand::new("true");
        run_checked(&command, temp_dir.path(), false).unwrap();
    }

    #[test]
    fn test_failure_status_is_propagated() {
        let temp_dir = TempDir::new().unwrap();
        let command = ToolCommand::new("sh").args(["-c", "exit 7"]);
        let err = run_checked(&command, temp_dir.path(), false).unwrap_err();
        let capi_err = err.downcast_ref::<CapiError>().unwrap();
        assert_eq!(capi_err.exit_code(), 7);
    }

    #[test]
    fn test_runs_in_working_directory() {
        let temp_dir = TempDir::new().unwrap();
        let command = ToolCommand::new("sh").args(["-c", "touch marker"]);
        run_checked(&command, temp_dir.path(), false).unwrap();
        assert!(temp_dir.path().join("marker").exists());
    }
}
