//! Painting the overlay and putting the pane back afterwards.

use par_jump_config::JumpStyle;
use par_jump_tmux::Host;

use super::controller::ModeController;
use super::types::{OverlaySurface, PaneMode, Transition};
use crate::error::{JumpError, Result};
use crate::pane::PaneModel;

const ENTER_ALTERNATE: &[u8] = b"\x1b[?1049h";
const LEAVE_ALTERNATE: &[u8] = b"\x1b[?1049l";
/// Clear, home, reset attributes.
const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H\x1b[0m";

impl ModeController {
    /// Paint `rendered` over the pane, on the alternate screen when allowed.
    pub fn paint_overlay<H: Host + ?Sized>(&mut self, host: &mut H, rendered: &str) -> Result<()> {
        if self.style == JumpStyle::Xcopy {
            self.exit_copy_mode(host)?;
        }

        let surface = if self.alternate_allowed {
            host.write_tty(&self.tty, ENTER_ALTERNATE)?;
            OverlaySurface::Alternate
        } else {
            OverlaySurface::Primary
        };
        self.apply(Transition::Paint(surface))?;
        self.write_screen(host, rendered)
    }

    /// Undo everything [`paint_overlay`](Self::paint_overlay) did.
    ///
    /// Safe to call whatever state painting got to. In Xcopy style the saved
    /// copy mode is re-entered with its cursor; content that scrolled away in
    /// the meantime only means copy mode is not restored. The first failure
    /// is returned after every step has been attempted.
    pub fn release_overlay<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        pane: &PaneModel,
    ) -> Result<()> {
        let screen = self.restore_screen(host, pane);

        let copy = if self.style == JumpStyle::Xcopy && self.copy.is_some() {
            match self.enter_copy_mode(host, pane, true) {
                Err(JumpError::StaleScroll { .. }) => {
                    log::info!("copy mode not restored, content scrolled away");
                    Ok(())
                }
                other => other,
            }
        } else {
            Ok(())
        };

        screen.and(copy)
    }

    /// Paint the overlay, run `f` while it is shown, then release it.
    ///
    /// The overlay is released on every path out, including a failed paint
    /// and an error from `f`. An error from `f` takes precedence over one from
    /// releasing, which is only logged.
    pub fn with_overlay<H, T, F>(
        &mut self,
        host: &mut H,
        pane: &PaneModel,
        rendered: &str,
        f: F,
    ) -> Result<T>
    where
        H: Host + ?Sized,
        F: FnOnce(&mut H) -> Result<T>,
    {
        if let Err(e) = self.paint_overlay(host, rendered) {
            if let Err(restore) = self.release_overlay(host, pane) {
                log::error!("restore after failed paint: {}", restore);
            }
            return Err(e);
        }

        let result = f(host);
        let released = self.release_overlay(host, pane);
        match (result, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), released) => {
                if let Err(restore) = released {
                    log::error!("restore after failed input: {}", restore);
                }
                Err(e)
            }
        }
    }

    fn restore_screen<H: Host + ?Sized>(&mut self, host: &mut H, pane: &PaneModel) -> Result<()> {
        let PaneMode::Overlay(surface) = self.mode else {
            return Ok(());
        };
        let result = match surface {
            OverlaySurface::Alternate => host
                .write_tty(&self.tty, LEAVE_ALTERNATE)
                .map_err(JumpError::from),
            OverlaySurface::Primary => match pane.snapshot.as_deref() {
                Some(snapshot) => self.write_screen(host, snapshot),
                None => Ok(()),
            },
        };
        self.apply(Transition::Restore)?;
        result
    }

    /// Redraw the whole pane with `raw` and put the terminal cursor back.
    ///
    /// Drawing on the primary screen pushes a screenful into history, which
    /// moves the saved copy-mode scroll position along with it.
    fn write_screen<H: Host + ?Sized>(&mut self, host: &mut H, raw: &str) -> Result<()> {
        let (x, y) = self.cursor();
        let mut bytes = Vec::with_capacity(CLEAR_SCREEN.len() + raw.len() + 16);
        bytes.extend_from_slice(CLEAR_SCREEN);
        bytes.extend_from_slice(raw.as_bytes());
        bytes.extend_from_slice(format!("\x1b[{};{}H", y + 1, x + 1).as_bytes());
        host.write_tty(&self.tty, &bytes)?;

        let on_alternate =
            self.pane_alternate_on || self.mode == PaneMode::Overlay(OverlaySurface::Alternate);
        if !on_alternate && let Some(copy) = self.copy.as_mut() {
            copy.scroll_position += self.height as i64;
        }
        Ok(())
    }
}
