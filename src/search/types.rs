//! Types for key search.

/// A single match on the captured pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// 1-based row
    pub line: usize,
    /// 1-based display column
    pub column: usize,
    /// Byte offset of the match in the flattened pane buffer
    pub offset: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// 0-based `(col, row)` cell of the match.
    pub fn cell(&self) -> (i64, i64) {
        (self.column as i64 - 1, self.line as i64 - 1)
    }
}
