//! Snapshot of the pane taken once per invocation.

use par_jump_config::{Config, JumpStyle};
use par_jump_tmux::{Host, HostError, PaneVars, RawCopyMode, TmuxCommand};

use crate::display_width::display_width;
use crate::quirks;
use crate::selection::Selection;

/// One captured row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Text as captured, without trailing blanks tmux trimmed.
    pub chars: String,
    /// Spaces up to the pane width, followed by `\r\n` on every row but the last.
    pub padding: String,
}

impl Line {
    pub fn new(chars: &str, width: usize, last: bool) -> Self {
        let mut padding = " ".repeat(width.saturating_sub(display_width(chars)));
        if !last {
            padding.push_str("\r\n");
        }
        Self {
            chars: chars.to_string(),
            padding,
        }
    }

    /// Length in bytes of the row including padding.
    pub fn byte_len(&self) -> usize {
        self.chars.len() + self.padding.len()
    }
}

/// Copy-mode state saved so it can be restored after the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyContext {
    /// Lines scrolled back into history.
    pub scroll_position: i64,
    /// Copy-mode cursor (col, row).
    pub cursor: (i64, i64),
    pub selection: Option<Selection>,
}

impl CopyContext {
    /// Build from the raw tmux report, applying the selection corrections.
    fn from_raw(raw: RawCopyMode, history_size: i64) -> Self {
        let cursor = (raw.cursor_x, raw.cursor_y);
        let selection = raw.selection.map(|s| {
            let s = quirks::shift_selection_rows(s, history_size, raw.scroll_position);
            let s = quirks::swap_reversed_selection(s, cursor);
            Selection::new((s.start_x, s.start_y), (s.end_x, s.end_y), s.rectangle)
        });
        Self {
            scroll_position: raw.scroll_position,
            cursor,
            selection,
        }
    }
}

/// The captured pane.
#[derive(Debug, Clone)]
pub struct PaneModel {
    pub id: String,
    pub tty: String,
    pub width: usize,
    pub height: usize,
    /// Pane cursor (col, row), 0-based.
    pub cursor: (i64, i64),
    pub history_size: i64,
    /// The pane itself is showing its alternate screen (e.g. a full-screen app).
    pub alternate_on: bool,
    /// Whether the overlay can be painted on the alternate screen.
    pub alternate_allowed: bool,
    /// Present when the pane was in copy mode at capture time.
    pub copy: Option<CopyContext>,
    pub lines: Vec<Line>,
    /// Styled capture used to redraw the pane when the alternate screen is not available.
    pub snapshot: Option<String>,
}

impl PaneModel {
    /// Query and capture the active pane.
    pub fn capture<H: Host + ?Sized>(host: &mut H, config: &Config) -> Result<Self, HostError> {
        let vars = PaneVars::query(host)?;
        let copy = vars
            .copy_mode
            .map(|raw| CopyContext::from_raw(raw, vars.history_size));

        let alternate_allowed = if vars.alternate_on {
            false
        } else {
            host.run(&TmuxCommand::show_global_option("alternate-screen"))? == "on"
        };

        // In mouse style copy mode is cancelled right away, so the live screen is what counts
        let window = match (config.style, copy) {
            (JumpStyle::Xcopy, Some(c)) => Some(c.scroll_position),
            _ => None,
        };
        let lines = Self::capture_lines(host, &vars.pane_id, vars.width, vars.height, window)?;

        let snapshot = if alternate_allowed {
            None
        } else {
            let styled = host.run(&TmuxCommand::capture_pane(&vars.pane_id, None, true))?;
            Some(styled.replace('\n', "\r\n"))
        };

        log::info!(
            "captured pane {} {}x{} history={} copy_mode={} alternate_allowed={}",
            vars.pane_id,
            vars.width,
            vars.height,
            vars.history_size,
            copy.is_some(),
            alternate_allowed
        );

        Ok(Self {
            id: vars.pane_id,
            tty: vars.tty,
            width: vars.width,
            height: vars.height,
            cursor: (vars.cursor_x, vars.cursor_y),
            history_size: vars.history_size,
            alternate_on: vars.alternate_on,
            alternate_allowed,
            copy,
            lines,
            snapshot,
        })
    }

    /// Capture the rows of the visible window, padded to `width`.
    ///
    /// `scroll_position` selects the copy-mode window; `None` captures the live screen.
    pub fn capture_lines<H: Host + ?Sized>(
        host: &mut H,
        pane_id: &str,
        width: usize,
        height: usize,
        scroll_position: Option<i64>,
    ) -> Result<Vec<Line>, HostError> {
        let range = scroll_position.map(|scroll| {
            let start = -scroll;
            (start, start + height as i64 - 1)
        });
        let text = host.run(&TmuxCommand::capture_pane(pane_id, range, false))?;
        Ok(Self::lines_from_text(&text, width))
    }

    /// Split captured text into padded rows.
    pub fn lines_from_text(text: &str, width: usize) -> Vec<Line> {
        let rows: Vec<&str> = text.split('\n').collect();
        let last = rows.len() - 1;
        rows.iter()
            .enumerate()
            .map(|(i, row)| Line::new(row, width, i == last))
            .collect()
    }
}

/// Concatenate rows and their padding into the buffer painted on screen.
pub fn flatten(lines: &[Line]) -> String {
    let mut raw = String::with_capacity(lines.iter().map(Line::byte_len).sum());
    for line in lines {
        raw.push_str(&line.chars);
        raw.push_str(&line.padding);
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_to_width() {
        let lines = PaneModel::lines_from_text("ab ab\nx", 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].padding, "     \r\n");
        assert_eq!(lines[1].padding, "         ");
    }

    #[test]
    fn test_padding_counts_wide_glyphs() {
        let lines = PaneModel::lines_from_text("中文", 6);
        assert_eq!(lines[0].padding, "  ");
    }

    #[test]
    fn test_padded_rows_fill_width() {
        let width = 12;
        let lines = PaneModel::lines_from_text("hello\n中文字\n\nlast", width);
        for (i, line) in lines.iter().enumerate() {
            let terminator = if i == lines.len() - 1 { "" } else { "\r\n" };
            let body = line.padding.strip_suffix(terminator).unwrap_or(&line.padding);
            assert_eq!(display_width(&line.chars) + display_width(body), width);
            assert!(line.padding.ends_with(terminator));
        }
    }

    #[test]
    fn test_flatten() {
        let lines = PaneModel::lines_from_text("ab\ncd", 3);
        assert_eq!(flatten(&lines), "ab \r\ncd ");
    }

    #[test]
    fn test_copy_context_corrections() {
        let raw = RawCopyMode {
            scroll_position: 10,
            cursor_x: 3,
            cursor_y: 4,
            selection: Some(par_jump_tmux::RawSelection {
                start_x: 3,
                start_y: 94,
                end_x: 7,
                end_y: 98,
                rectangle: false,
            }),
        };
        let ctx = CopyContext::from_raw(raw, 100);
        let sel = ctx.selection.unwrap();
        // rows shifted by 100 - 10, then the start equals the cursor so the ends swap
        assert_eq!(sel.start, (7, 8));
        assert_eq!(sel.end, (3, 4));
    }
}
