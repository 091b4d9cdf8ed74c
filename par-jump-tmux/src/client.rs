//! Running commands against the multiplexer.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use crate::{HostError, TmuxCommand};

/// Operations par-jump needs from the terminal multiplexer.
///
/// Each call is issued at most once; there is no retry logic here or in
/// callers, failures propagate.
pub trait Host {
    /// Run a command (or `;`-chained batch) and return its stdout with the
    /// final newline removed.
    fn run(&mut self, command: &TmuxCommand) -> Result<String, HostError>;

    /// Write raw bytes to a pane's terminal device.
    fn write_tty(&mut self, tty: &str, bytes: &[u8]) -> Result<(), HostError>;

    /// Ask the user for a single key; on confirmation the key plus a newline
    /// is appended to `reply_path`.
    fn prompt_to_file(&mut self, message: &str, reply_path: &Path) -> Result<(), HostError> {
        self.run(&TmuxCommand::prompt_to_file(message, reply_path))
            .map(|_| ())
    }
}

/// Host backed by the `tmux` binary.
#[derive(Debug, Clone)]
pub struct TmuxClient {
    program: String,
}

impl Default for TmuxClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TmuxClient {
    pub fn new() -> Self {
        Self {
            program: "tmux".to_string(),
        }
    }
}

impl Host for TmuxClient {
    fn run(&mut self, command: &TmuxCommand) -> Result<String, HostError> {
        log::debug!("run: {}", command.shell_line(&self.program));

        let output = Command::new(&self.program)
            .args(command.args())
            .output()
            .map_err(|source| HostError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!("tmux {} failed: {}", command.name(), stderr);
            return Err(HostError::Failed {
                command: command.name().to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.ends_with('\n') {
            stdout.pop();
        }
        Ok(stdout)
    }

    fn write_tty(&mut self, tty: &str, bytes: &[u8]) -> Result<(), HostError> {
        log::trace!("write {} bytes to {}", bytes.len(), tty);
        let to_err = |source| HostError::Tty {
            tty: tty.to_string(),
            source,
        };
        let mut file = OpenOptions::new().write(true).open(tty).map_err(to_err)?;
        file.write_all(bytes).map_err(to_err)?;
        file.flush().map_err(to_err)
    }
}
