//! Default value functions for configuration.
//!
//! One free function per [`Config`](crate::Config) field so the CLI can fall
//! back to them whenever a flag is passed as an empty string.

use std::time::Duration;

/// Characters labels are built from, ordered by how easy they are to reach.
pub fn label_chars() -> String {
    "fjdkslaghrueiwoqptyvncmxzb1234567890".to_string()
}

/// Bold, orange (256-color 172).
pub fn label_attrs() -> String {
    "\x1b[1m\x1b[38;5;172m".to_string()
}

/// Reset, then dark grey (256-color 237) so labels stand out.
pub fn text_attrs() -> String {
    "\x1b[0m\x1b[38;5;237m".to_string()
}

pub fn smart_case() -> bool {
    true
}

pub fn print_command_only() -> bool {
    true
}

pub fn auto_begin_selection() -> bool {
    true
}

/// Number of characters in a search key.
pub fn key_length() -> usize {
    2
}

/// Hard bound on every single-character wait.
pub fn input_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Weight applied to the row delta when ranking matches by distance.
///
/// Terminal cells are roughly twice as tall as they are wide, so one row away
/// reads about as far as two columns away.
pub fn row_weight() -> i64 {
    2
}
