//! Process gateway: the seam between pip operations and the OS

use super::types::ExecOutput;
use anyhow::Result;
use std::process::Command;

/// Abstract command launcher. Operations never touch `std::process`
/// directly so tests can substitute a recording double.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion and capture its output.
    /// `Err` means the process could not be launched at all; a nonzero
    /// exit lands in `ExecOutput::success`.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecOutput>;
}

/// Real launcher over `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(ExecOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}
