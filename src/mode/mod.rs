//! Pane mode state machine.
//!
//! Painting the overlay and performing the jump both need the pane in a
//! particular mode. [`ModeController`] tracks the mode, the cursor stack and
//! the saved copy-mode context, issues the tmux commands for every
//! transition and unwinds them again when the overlay goes away.
//!
//! ## Module layout
//!
//! - [`types`]: `PaneMode`, `OverlaySurface`, `Transition` and the transition table
//! - [`controller`]: copy-mode entry/exit and cursor movement
//! - [`paint`]: painting and restoring the overlay

mod controller;
mod paint;
mod types;

pub use controller::ModeController;
pub use types::{OverlaySurface, PaneMode, Transition};
