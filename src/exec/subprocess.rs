//! Subprocess execution

use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, `None` when terminated by a signal
    pub exit_code: Option<i32>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code(),
            stdout,
            stderr,
            duration,
        }
    }

    /// Everything the process wrote, stderr first
    pub fn combined_output(&self) -> String {
        match (self.stderr.trim().is_empty(), self.stdout.trim().is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.stderr.clone(),
            (true, false) => self.stdout.clone(),
            (false, false) => format!("{}\n{}", self.stderr.trim_end(), self.stdout),
        }
    }
}

/// Run a command to completion, capturing its output
///
/// An error means the program could not be started at all.
pub fn run_command(program: &str, args: &[String]) -> Result<CommandResult> {
    let start = Instant::now();

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to execute {}", program))?;

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    Ok(CommandResult::from_status(
        output.status,
        stdout,
        stderr,
        duration,
    ))
}

/// Locate a program on PATH
pub fn find_program(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_exit_code_and_output() {
        let args = vec!["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()];
        let result = run_command("sh", &args).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.stdout.trim(), "out");
        assert_eq!(result.stderr.trim(), "err");
        assert_eq!(result.combined_output(), "err\nout\n");
    }

    #[test]
    fn test_missing_program_is_error() {
        let err = run_command("cbuild-no-such-compiler", &[]).unwrap_err();
        assert!(err.to_string().contains("cbuild-no-such-compiler"));
    }

    #[test]
    fn test_find_program() {
        assert!(find_program("sh").is_some());
        assert!(find_program("cbuild-no-such-compiler").is_none());
    }
}
