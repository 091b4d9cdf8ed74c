//! Moving to the chosen match.

use par_jump_config::{Config, JumpStyle};
use par_jump_tmux::{CopyCommand, Host, TmuxCommand};

use crate::error::Result;
use crate::mode::ModeController;
use crate::pane::PaneModel;

/// What a jump did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The copy-mode cursor was moved.
    Moved,
    /// A mouse click was sent to the pane.
    Clicked,
    /// The click command line, to be run by the caller.
    Printed(String),
}

/// Press and release of the left button at 0-based `(x, y)`, SGR encoded.
pub fn mouse_click_bytes(x: i64, y: i64) -> Vec<u8> {
    let (column, line) = (x + 1, y + 1);
    format!("\x1b[0;{column};{line}M\x1b[3;{column};{line}M").into_bytes()
}

/// Turns a target cell into tmux commands.
pub struct JumpExecutor<'a> {
    config: &'a Config,
}

impl<'a> JumpExecutor<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Jump to the 0-based cell `(x, y)`.
    pub fn jump<H: Host + ?Sized>(
        &self,
        host: &mut H,
        controller: &mut ModeController,
        pane: &PaneModel,
        x: i64,
        y: i64,
    ) -> Result<JumpOutcome> {
        log::info!("jump to ({}, {}) in {:?} style", x, y, self.config.style);
        match self.config.style {
            JumpStyle::Mouse => self.click(host, controller.pane_id(), x, y),
            JumpStyle::Xcopy => self.move_copy_cursor(host, controller, pane, x, y),
        }
    }

    fn click<H: Host + ?Sized>(
        &self,
        host: &mut H,
        pane_id: &str,
        x: i64,
        y: i64,
    ) -> Result<JumpOutcome> {
        let command = TmuxCommand::send_hex_keys(pane_id, &mouse_click_bytes(x, y));
        if self.config.print_command_only {
            return Ok(JumpOutcome::Printed(command.shell_line("tmux")));
        }
        host.run(&command)?;
        Ok(JumpOutcome::Clicked)
    }

    fn move_copy_cursor<H: Host + ?Sized>(
        &self,
        host: &mut H,
        controller: &mut ModeController,
        pane: &PaneModel,
        x: i64,
        y: i64,
    ) -> Result<JumpOutcome> {
        controller.enter_copy_mode(host, pane, false)?;

        let selection = controller.copy().and_then(|c| c.selection);
        // selections are inclusive, so extending forward needs one more cell
        let x = match selection {
            Some(s) if s.is_after_anchor(x, y) => x + 1,
            _ => x,
        };

        let mut batch = TmuxCommand::batch();
        controller.move_cursor(x, y, &pane.lines, &mut batch);
        if selection.is_none() && self.config.auto_begin_selection {
            batch.push(TmuxCommand::send_copy(
                controller.pane_id(),
                CopyCommand::BeginSelection,
            ));
        }
        if !batch.is_empty() {
            host.run(&batch)?;
        }
        Ok(JumpOutcome::Moved)
    }
}
