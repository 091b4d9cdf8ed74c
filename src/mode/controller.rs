//! Copy-mode handling and cursor movement.

use par_jump_config::JumpStyle;
use par_jump_tmux::{CopyCommand, Host, TmuxCommand, query_history_size};

use super::types::{PaneMode, Transition};
use crate::display_width::char_index_for_column;
use crate::error::{JumpError, Result};
use crate::pane::{CopyContext, Line, PaneModel};
use crate::quirks;
use crate::selection::SelectionMode;

/// Tracks and drives the mode of the target pane.
pub struct ModeController {
    pub(super) pane_id: String,
    pub(super) tty: String,
    pub(super) height: usize,
    pub(super) style: JumpStyle,
    pub(super) mode: PaneMode,
    /// Saved copy-mode state, restored when copy mode is re-entered.
    pub(super) copy: Option<CopyContext>,
    /// History size the scroll position was last validated against.
    history_size: i64,
    /// Cursor stack, top is the effective cursor. Entering copy mode pushes.
    cursors: Vec<(i64, i64)>,
    /// The pane is itself on its alternate screen.
    pub(super) pane_alternate_on: bool,
    pub(super) alternate_allowed: bool,
    /// Copy mode was re-entered but its scroll position no longer exists.
    stale: bool,
}

impl ModeController {
    pub fn new(pane: &PaneModel, style: JumpStyle) -> Self {
        let mut cursors = vec![pane.cursor];
        let mode = match pane.copy {
            Some(copy) => {
                cursors.push(copy.cursor);
                PaneMode::Copy
            }
            None => PaneMode::Normal,
        };
        Self {
            pane_id: pane.id.clone(),
            tty: pane.tty.clone(),
            height: pane.height,
            style,
            mode,
            copy: pane.copy,
            history_size: pane.history_size,
            cursors,
            pane_alternate_on: pane.alternate_on,
            alternate_allowed: pane.alternate_allowed,
            stale: false,
        }
    }

    pub fn mode(&self) -> PaneMode {
        self.mode
    }

    pub fn pane_id(&self) -> &str {
        &self.pane_id
    }

    /// The effective cursor, 0-based `(col, row)`.
    pub fn cursor(&self) -> (i64, i64) {
        self.cursors.last().copied().unwrap_or_default()
    }

    pub fn copy(&self) -> Option<&CopyContext> {
        self.copy.as_ref()
    }

    /// Mouse jumps cannot coexist with copy mode, so it is dropped up front
    /// and never restored.
    pub fn begin<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if self.style == JumpStyle::Mouse {
            self.exit_copy_mode(host)?;
            self.copy = None;
        }
        Ok(())
    }

    pub(super) fn apply(&mut self, transition: Transition) -> Result<()> {
        let next = self.mode.apply(transition)?;
        log::debug!("{:?}: {:?} -> {:?}", transition, self.mode, next);
        self.mode = next;
        Ok(())
    }

    /// Leave copy mode if the pane is in it.
    pub fn exit_copy_mode<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if self.mode != PaneMode::Copy {
            return Ok(());
        }
        host.run(&TmuxCommand::send_copy(&self.pane_id, CopyCommand::Cancel))?;
        self.apply(Transition::ExitCopy)?;
        if self.cursors.len() > 1 {
            self.cursors.pop();
        }
        Ok(())
    }

    /// Enter copy mode, restoring the saved scroll position and selection.
    ///
    /// With `restore_cursor` the saved copy cursor is restored too. Fails with
    /// [`JumpError::StaleScroll`] when the saved scroll position has scrolled
    /// out of history; copy mode is then left unrestored and every later call
    /// fails the same way.
    pub fn enter_copy_mode<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        pane: &PaneModel,
        restore_cursor: bool,
    ) -> Result<()> {
        if self.mode == PaneMode::Copy {
            return if self.stale {
                Err(self.stale_error())
            } else {
                Ok(())
            };
        }

        host.run(&TmuxCommand::copy_mode(&self.pane_id))?;
        self.apply(Transition::EnterCopy)?;
        self.cursors.push(self.cursor());

        let Some(mut copy) = self.copy else {
            return Ok(());
        };

        let history_size = query_history_size(host, &self.pane_id)?;
        copy.scroll_position =
            quirks::correct_scroll_parity(copy.scroll_position, self.history_size, history_size);
        self.history_size = history_size;
        self.copy = Some(copy);

        if copy.scroll_position > history_size {
            log::info!(
                "scroll position {} no longer in history ({})",
                copy.scroll_position,
                history_size
            );
            self.stale = true;
            return Err(self.stale_error());
        }

        let mut batch = TmuxCommand::batch();
        batch.push(TmuxCommand::send_copy(
            &self.pane_id,
            CopyCommand::GotoLine(copy.scroll_position),
        ));

        if let Some(selection) = copy.selection {
            let (x, y) = selection.start;
            self.move_cursor(x, y, &pane.lines, &mut batch);
            match selection.mode(&pane.lines) {
                SelectionMode::Rectangular => {
                    batch.push(self.copy_command(CopyCommand::BeginSelection));
                    batch.push(self.copy_command(CopyCommand::RectangleOn));
                }
                SelectionMode::Line => batch.push(self.copy_command(CopyCommand::SelectLine)),
                SelectionMode::Normal => {
                    batch.push(self.copy_command(CopyCommand::BeginSelection))
                }
            }
        }

        if restore_cursor {
            let (x, y) = copy.cursor;
            self.move_cursor(x, y, &pane.lines, &mut batch);
        }

        host.run(&batch)?;
        Ok(())
    }

    /// Queue the copy-mode commands that move the cursor to `(x, y)`.
    ///
    /// The cursor moves by rows first, then from the start of the line by as
    /// many characters as it takes to reach display column `x`. The tracked
    /// cursor is updated right away.
    pub fn move_cursor(&mut self, x: i64, y: i64, lines: &[Line], batch: &mut TmuxCommand) {
        let (cursor_x, cursor_y) = self.cursor();
        if (x, y) == (cursor_x, cursor_y) {
            return;
        }

        let dy = y - cursor_y;
        if dy != 0 {
            let direction = if dy > 0 {
                CopyCommand::CursorDown
            } else {
                CopyCommand::CursorUp
            };
            batch.push(TmuxCommand::send_copy_repeat(
                &self.pane_id,
                direction,
                dy.unsigned_abs() as usize,
            ));
        }

        batch.push(self.copy_command(CopyCommand::StartOfLine));

        let column = usize::try_from(x).unwrap_or(0);
        let char_index = usize::try_from(y)
            .ok()
            .and_then(|row| lines.get(row))
            .map_or(column, |line| char_index_for_column(&line.chars, column));
        if char_index >= 1 {
            batch.push(TmuxCommand::send_copy_repeat(
                &self.pane_id,
                CopyCommand::CursorRight,
                char_index,
            ));
        }

        if let Some(top) = self.cursors.last_mut() {
            *top = (x, y);
        }
    }

    pub(super) fn copy_command(&self, command: CopyCommand) -> TmuxCommand {
        TmuxCommand::send_copy(&self.pane_id, command)
    }

    fn stale_error(&self) -> JumpError {
        JumpError::StaleScroll {
            scroll_position: self.copy.map_or(0, |c| c.scroll_position),
            history_size: self.history_size,
        }
    }
}
