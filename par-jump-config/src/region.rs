//! Rectangular search regions.

use crate::ConfigError;

/// An inclusive, 1-based rectangle of pane cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Region {
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Whether the 1-based cell `(column, line)` lies inside this region.
    pub fn contains(&self, column: usize, line: usize) -> bool {
        column >= self.left && line >= self.top && column <= self.right && line <= self.bottom
    }

    /// Parse a flat `x1,y1,x2,y2[,x1,y1,x2,y2...]` list.
    ///
    /// An empty string yields no regions (no filtering).
    pub fn parse_list(s: &str) -> Result<Vec<Region>, ConfigError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Vec::new());
        }

        let invalid = |reason: &str| ConfigError::InvalidValue {
            flag: "regions",
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let numbers = s
            .split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(&e.to_string()))?;

        if numbers.len() % 4 != 0 {
            return Err(invalid("expected groups of four numbers"));
        }

        Ok(numbers
            .chunks_exact(4)
            .map(|c| Region::new(c[0], c[1], c[2], c[3]))
            .collect())
    }
}

/// True when no regions are configured or any region contains the cell.
pub fn any_contains(regions: &[Region], column: usize, line: usize) -> bool {
    regions.is_empty() || regions.iter().any(|r| r.contains(column, line))
}
