//! tmux command execution for par-jump
//!
//! Everything par-jump asks of the multiplexer goes through the [`Host`]
//! trait, so the rest of the program never spawns processes or touches pane
//! ttys directly.
//!
//! ## Architecture
//!
//! - `commands.rs`: argv builders for the tmux commands par-jump issues
//! - `client.rs`: the `Host` trait and the process-backed `TmuxClient`
//! - `format.rs`: the single `display-message` query describing the pane
//! - `error.rs`: `HostError`

mod client;
mod commands;
mod error;
mod format;

pub use client::{Host, TmuxClient};
pub use commands::{CopyCommand, TmuxCommand};
pub use error::HostError;
pub use format::{PANE_VARS, PaneVars, RawCopyMode, RawSelection, query_history_size};
