//! Typed errors for host interaction.

use thiserror::Error;

/// A tmux call failed or returned something we could not understand.
#[derive(Debug, Error)]
pub enum HostError {
    /// The tmux binary could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// tmux ran but reported failure.
    #[error("tmux {command} exited with {status}: {stderr}")]
    Failed {
        /// First argument of the failing command.
        command: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// A queried format variable was missing from the reply.
    #[error("tmux did not report #{{{0}}}")]
    MissingField(&'static str),

    /// A queried format variable could not be parsed.
    #[error("unexpected value '{value}' for #{{{field}}}")]
    Parse { field: &'static str, value: String },

    /// Writing to the pane's tty failed.
    #[error("failed to write to {tty}: {source}")]
    Tty {
        tty: String,
        #[source]
        source: std::io::Error,
    },
}
