//! Display-width helpers.
//!
//! tmux lays text out in cells: East-Asian wide glyphs take two, combining
//! marks take none, everything else takes one. Control characters never
//! appear in captured pane text but are counted as one cell if they do.

use unicode_width::UnicodeWidthChar;

/// Number of cells a single character occupies.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(1)
}

/// Number of cells `text` occupies.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Index (in characters) of the first character that starts at or after
/// display column `column` (0-based).
///
/// Returns the character count of `line` when the line is narrower than
/// `column`, which puts a cursor just past the end of the content.
pub fn char_index_for_column(line: &str, column: usize) -> usize {
    let mut width = 0;
    for (i, c) in line.chars().enumerate() {
        if width >= column {
            return i;
        }
        width += char_width(c);
    }
    line.chars().count()
}
