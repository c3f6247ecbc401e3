use std::process::{Command, Stdio};

use log::info;

use crate::command::CommandVector;
use crate::error::{Error, Result};

/// Number of trailing stdout lines reported after a successful run.
pub const OUTPUT_TAIL_LINES: usize = 5;

/// Everything observed from one finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The last `count` lines of the trimmed stdout.
    #[must_use]
    pub fn stdout_tail(&self, count: usize) -> Vec<&str> {
        let trimmed = self.stdout.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let lines: Vec<&str> = trimmed.split('\n').collect();
        lines[lines.len().saturating_sub(count)..].to_vec()
    }
}

/// Runs an external command to completion and captures its output.
pub trait ProcessRunner {
    /// # Errors
    ///
    /// Returns [`Error::Launch`] when the process cannot be started. A
    /// non-zero exit is not an error; it is reported in [`ProcessOutput`].
    fn run(&mut self, command: &CommandVector) -> Result<ProcessOutput>;
}

/// [`ProcessRunner`] backed by `std::process`.
#[derive(Debug, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&mut self, command: &CommandVector) -> Result<ProcessOutput> {
        info!("Executing `{}`", command.program());

        let output = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|original| Error::Launch {
                program: command.program().to_string(),
                original,
            })?;

        let output = ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        info!("`{}` exited with {:?}", command.program(), output.exit_code);

        Ok(output)
    }
}
