//! Search engine for the captured pane.

use par_jump_config::Region;
use par_jump_config::region::any_contains;

use super::types::Position;
use crate::display_width::display_width;
use crate::pane::Line;

/// Finds every occurrence of a key on the pane.
pub struct SearchEngine<'a> {
    smart_case: bool,
    regions: &'a [Region],
}

impl<'a> SearchEngine<'a> {
    /// Create a new search engine.
    pub fn new(smart_case: bool, regions: &'a [Region]) -> Self {
        Self {
            smart_case,
            regions,
        }
    }

    /// Search `lines` for `key`, top to bottom and left to right.
    ///
    /// Occurrences are located case-insensitively, then accepted by
    /// [`accepts`](Self::accepts) and the region filter. After every raw
    /// occurrence the scan resumes past it, so overlapping occurrences of the
    /// same key are not reported twice.
    pub fn search(&self, lines: &[Line], key: &str) -> Vec<Position> {
        let key_chars: Vec<char> = key.chars().collect();
        if key_chars.is_empty() {
            return Vec::new();
        }

        let mut positions = Vec::new();
        let mut line_offset = 0;

        for (line_idx, line) in lines.iter().enumerate() {
            let chars: Vec<(usize, char)> = line.chars.char_indices().collect();
            let mut i = 0;
            while i + key_chars.len() <= chars.len() {
                let window = &chars[i..i + key_chars.len()];
                if !Self::eq_ignore_case(window, &key_chars) {
                    i += 1;
                    continue;
                }

                let start = window[0].0;
                let end = chars
                    .get(i + key_chars.len())
                    .map_or(line.chars.len(), |(b, _)| *b);
                i += key_chars.len();

                if !self.accepts(&line.chars[start..end], key) {
                    continue;
                }

                let column = display_width(&line.chars[..start]) + 1;
                let line_number = line_idx + 1;
                if !any_contains(self.regions, column, line_number) {
                    continue;
                }

                positions.push(Position::new(line_number, column, line_offset + start));
            }
            line_offset += line.byte_len();
        }

        log::debug!("key {:?}: {} matches", key, positions.len());
        positions
    }

    /// Whether a case-insensitive occurrence counts as a match.
    ///
    /// Exact text always matches. With smart case, a key without uppercase
    /// letters matches any case variant.
    pub fn accepts(&self, candidate: &str, key: &str) -> bool {
        if candidate == key {
            return true;
        }
        self.smart_case && !key.chars().any(char::is_uppercase)
    }

    fn eq_ignore_case(window: &[(usize, char)], key: &[char]) -> bool {
        window
            .iter()
            .zip(key)
            .all(|((_, a), b)| a == b || a.to_lowercase().eq(b.to_lowercase()))
    }
}
