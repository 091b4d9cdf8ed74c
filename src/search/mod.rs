//! Key search over the captured pane.
//!
//! ## Module layout
//!
//! - [`types`]: `Position`
//! - [`engine`]: `SearchEngine`, the scan itself

mod engine;
mod types;

pub use engine::SearchEngine;
pub use types::Position;
