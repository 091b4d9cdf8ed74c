/// Selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Normal character-based selection
    Normal,
    /// Rectangular/block selection
    Rectangular,
    /// Whole lines (`select-line`)
    Line,
}

/// An active copy-mode selection in pane coordinates.
///
/// `start` is the anchor (where the selection began), `end` the other corner.
/// Rows can be negative or past the bottom when the selection extends outside
/// the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Anchor position (col, row)
    pub start: (i64, i64),
    /// Opposite end (col, row)
    pub end: (i64, i64),
    /// Rectangle toggle was on
    pub rectangle: bool,
}

impl Selection {
    /// Create a new selection
    pub fn new(start: (i64, i64), end: (i64, i64), rectangle: bool) -> Self {
        Self {
            start,
            end,
            rectangle,
        }
    }

    /// Whether `(col, row)` comes strictly after the anchor in reading order.
    pub fn is_after_anchor(&self, col: i64, row: i64) -> bool {
        (row, col) > (self.start.1, self.start.0)
    }

    /// Classify the selection so it can be re-created with the right command.
    ///
    /// A selection is linewise when it starts in column 0 and ends exactly at
    /// the end of the content of its last line.
    pub fn mode(&self, lines: &[crate::pane::Line]) -> SelectionMode {
        if self.rectangle {
            return SelectionMode::Rectangular;
        }
        if self.start.0 != 0 {
            return SelectionMode::Normal;
        }
        let Some(line) = usize::try_from(self.end.1).ok().and_then(|y| lines.get(y)) else {
            return SelectionMode::Normal;
        };
        let end_col = usize::try_from(self.end.0).unwrap_or(0);
        if crate::display_width::char_index_for_column(&line.chars, end_col)
            == line.chars.chars().count()
        {
            SelectionMode::Line
        } else {
            SelectionMode::Normal
        }
    }
}
