//! par-jump: jump to any visible text in a tmux pane.
//!
//! The user types a short key, every occurrence on screen gets a label, and
//! typing a label moves the cursor there, either with a synthetic mouse
//! click or by driving copy mode.

pub mod app;
pub mod cli;
pub mod debug;
pub mod display_width;
pub mod error;
pub mod input;
pub mod jump;
pub mod labels;
pub mod mode;
pub mod overlay;
pub mod pane;
pub mod quirks;
pub mod search;
pub mod selection;

pub use app::{App, RunOutcome};
pub use error::{InputError, JumpError};
pub use jump::JumpOutcome;
