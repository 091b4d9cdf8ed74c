//! Pane state query.
//!
//! One `display-message -p` call returns every variable we need, one per
//! line, in the order of [`PANE_VARS`].

use std::collections::HashMap;

use crate::{Host, HostError, TmuxCommand};

/// Format variables requested from tmux, in reply order.
pub const PANE_VARS: &[&str] = &[
    "pane_id",
    "pane_tty",
    "pane_width",
    "pane_height",
    "cursor_x",
    "cursor_y",
    "history_size",
    "scroll_position",
    "selection_present",
    "copy_cursor_x",
    "copy_cursor_y",
    "selection_start_x",
    "selection_start_y",
    "selection_end_x",
    "selection_end_y",
    "alternate_on",
    "rectangle_toggle",
];

/// Selection geometry exactly as tmux reports it (history-relative rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSelection {
    pub start_x: i64,
    pub start_y: i64,
    pub end_x: i64,
    pub end_y: i64,
    pub rectangle: bool,
}

/// Copy-mode state as tmux reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCopyMode {
    pub scroll_position: i64,
    pub cursor_x: i64,
    pub cursor_y: i64,
    pub selection: Option<RawSelection>,
}

/// Parsed reply of the pane state query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneVars {
    pub pane_id: String,
    pub tty: String,
    pub width: usize,
    pub height: usize,
    pub cursor_x: i64,
    pub cursor_y: i64,
    pub history_size: i64,
    pub alternate_on: bool,
    /// Present only while the pane is in copy mode.
    pub copy_mode: Option<RawCopyMode>,
}

impl PaneVars {
    /// Query the active pane.
    pub fn query<H: Host + ?Sized>(host: &mut H) -> Result<Self, HostError> {
        let reply = host.run(&TmuxCommand::display_formats(PANE_VARS))?;
        Self::parse(&reply)
    }

    /// Parse a reply produced by [`TmuxCommand::display_formats`] with [`PANE_VARS`].
    pub fn parse(reply: &str) -> Result<Self, HostError> {
        let values: HashMap<&str, &str> =
            PANE_VARS.iter().copied().zip(reply.split('\n')).collect();
        let vars = Vars(values);

        // scroll_position is only set while the pane is in copy mode
        let copy_mode = if vars.get("scroll_position")?.is_empty() {
            None
        } else {
            let selection = if vars.flag("selection_present")? {
                Some(RawSelection {
                    start_x: vars.int("selection_start_x")?,
                    start_y: vars.int("selection_start_y")?,
                    end_x: vars.int("selection_end_x")?,
                    end_y: vars.int("selection_end_y")?,
                    rectangle: vars.flag("rectangle_toggle")?,
                })
            } else {
                None
            };
            Some(RawCopyMode {
                scroll_position: vars.int("scroll_position")?,
                cursor_x: vars.int("copy_cursor_x")?,
                cursor_y: vars.int("copy_cursor_y")?,
                selection,
            })
        };

        Ok(Self {
            pane_id: vars.get("pane_id")?.to_string(),
            tty: vars.get("pane_tty")?.to_string(),
            width: vars.size("pane_width")?,
            height: vars.size("pane_height")?,
            cursor_x: vars.int("cursor_x")?,
            cursor_y: vars.int("cursor_y")?,
            history_size: vars.int("history_size")?,
            alternate_on: vars.flag("alternate_on")?,
            copy_mode,
        })
    }
}

/// Fetch `#{history_size}` for a pane.
pub fn query_history_size<H: Host + ?Sized>(host: &mut H, pane_id: &str) -> Result<i64, HostError> {
    let reply = host.run(&TmuxCommand::display_pane_format(pane_id, "history_size"))?;
    parse_int("history_size", &reply)
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, HostError> {
    value.trim().parse().map_err(|_| HostError::Parse {
        field,
        value: value.to_string(),
    })
}

struct Vars<'a>(HashMap<&'static str, &'a str>);

impl<'a> Vars<'a> {
    fn get(&self, field: &'static str) -> Result<&'a str, HostError> {
        self.0.get(field).copied().ok_or(HostError::MissingField(field))
    }

    fn int(&self, field: &'static str) -> Result<i64, HostError> {
        parse_int(field, self.get(field)?)
    }

    fn size(&self, field: &'static str) -> Result<usize, HostError> {
        let value = self.get(field)?;
        value.trim().parse().map_err(|_| HostError::Parse {
            field,
            value: value.to_string(),
        })
    }

    fn flag(&self, field: &'static str) -> Result<bool, HostError> {
        Ok(self.get(field)? == "1")
    }
}
