//! Mode states and the transitions allowed between them.

use crate::error::JumpError;

/// Where the overlay is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySurface {
    /// On the alternate screen, left again to restore.
    Alternate,
    /// Over the real screen, redrawn from the snapshot to restore.
    Primary,
}

/// What the pane is doing, as far as par-jump is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneMode {
    Normal,
    /// tmux copy mode, possibly with a selection.
    Copy,
    /// The overlay is on screen.
    Overlay(OverlaySurface),
}

/// A step between modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    EnterCopy,
    ExitCopy,
    Paint(OverlaySurface),
    Restore,
}

impl PaneMode {
    /// The mode reached by applying `transition`.
    ///
    /// | from    | transition | to      |
    /// |---------|------------|---------|
    /// | Normal  | EnterCopy  | Copy    |
    /// | Copy    | ExitCopy   | Normal  |
    /// | Normal  | Paint(s)   | Overlay(s) |
    /// | Overlay | Restore    | Normal  |
    ///
    /// Anything else, e.g. painting while still in copy mode, is rejected.
    pub fn apply(self, transition: Transition) -> Result<PaneMode, JumpError> {
        match (self, transition) {
            (PaneMode::Normal, Transition::EnterCopy) => Ok(PaneMode::Copy),
            (PaneMode::Copy, Transition::ExitCopy) => Ok(PaneMode::Normal),
            (PaneMode::Normal, Transition::Paint(surface)) => Ok(PaneMode::Overlay(surface)),
            (PaneMode::Overlay(_), Transition::Restore) => Ok(PaneMode::Normal),
            (from, transition) => Err(JumpError::InvalidTransition { from, transition }),
        }
    }
}
