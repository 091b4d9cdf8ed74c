//! Error types for the jump flow.
//!
//! Several variants are not failures from the user's point of view: a timeout,
//! an interrupt, a label that matches nothing or content that scrolled away
//! all end the run quietly. [`JumpError::is_cancel`] tells them apart.

use std::time::Duration;

use par_jump_config::ConfigError;
use par_jump_tmux::HostError;
use thiserror::Error;

use crate::mode::{PaneMode, Transition};

/// Failure while waiting for a key typed into the tmux prompt.
#[derive(Debug, Error)]
pub enum InputError {
    /// Nothing arrived before the deadline.
    #[error("no input within {0:?}")]
    Timeout(Duration),

    /// Empty reply, closed pipe or interrupt.
    #[error("input cancelled")]
    Cancelled,

    /// The reply pipe could not be created or read.
    #[error("reply pipe: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can stop a jump.
#[derive(Debug, Error)]
pub enum JumpError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Input(#[from] InputError),

    /// The saved copy-mode scroll position no longer exists in history.
    #[error("scroll position {scroll_position} is beyond history size {history_size}")]
    StaleScroll {
        scroll_position: i64,
        history_size: i64,
    },

    /// The typed characters do not name any offered label.
    #[error("no label '{0}'")]
    InvalidLabel(String),

    #[error("cannot apply {transition:?} in {from:?}")]
    InvalidTransition {
        from: PaneMode,
        transition: Transition,
    },
}

impl JumpError {
    /// Whether this ends the run as a silent cancel rather than an error.
    pub fn is_cancel(&self) -> bool {
        matches!(
            self,
            JumpError::Input(InputError::Timeout(_) | InputError::Cancelled)
                | JumpError::InvalidLabel(_)
                | JumpError::StaleScroll { .. }
        )
    }
}

/// Result alias for the jump flow.
pub type Result<T> = std::result::Result<T, JumpError>;
