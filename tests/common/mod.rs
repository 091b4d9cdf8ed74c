//! Shared integration test helpers for par-jump.
//!
//! Provides [`FakeHost`], a scripted stand-in for tmux that answers the pane
//! query from a [`FakePane`], records every command and tty write, and types
//! scripted keys into the reply pipe of each prompt.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{FakeHost, FakePane};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use par_jump_config::{Config, JumpStyle};
use par_jump_tmux::{Host, HostError, PANE_VARS, TmuxCommand};

pub const ENTER_ALTERNATE: &[u8] = b"\x1b[?1049h";
pub const LEAVE_ALTERNATE: &[u8] = b"\x1b[?1049l";

/// Copy-mode state of a fake pane, in the raw form tmux reports it.
#[derive(Debug, Clone)]
pub struct FakeCopy {
    pub scroll_position: i64,
    pub cursor: (i64, i64),
    /// `(start_x, start_y, end_x, end_y)`, history-relative rows.
    pub selection: Option<(i64, i64, i64, i64)>,
    pub rectangle: bool,
}

/// The pane a [`FakeHost`] describes.
#[derive(Debug, Clone)]
pub struct FakePane {
    pub text: String,
    pub snapshot: String,
    pub width: usize,
    pub height: usize,
    pub cursor: (i64, i64),
    pub history_size: i64,
    /// History size reported when re-entering copy mode.
    pub history_after: i64,
    pub alternate_on: bool,
    pub alternate_screen_option: bool,
    pub copy: Option<FakeCopy>,
}

impl FakePane {
    pub fn new(text: &str) -> Self {
        let height = text.split('\n').count();
        Self {
            text: text.to_string(),
            snapshot: format!("\x1b[0m{text}"),
            width: 20,
            height,
            cursor: (0, 0),
            history_size: 100,
            history_after: 100,
            alternate_on: false,
            alternate_screen_option: true,
            copy: None,
        }
    }

    pub fn in_copy_mode(mut self, scroll_position: i64, cursor: (i64, i64)) -> Self {
        self.copy = Some(FakeCopy {
            scroll_position,
            cursor,
            selection: None,
            rectangle: false,
        });
        self
    }

    fn var(&self, name: &str) -> String {
        let copy = self.copy.as_ref();
        let selection = copy.and_then(|c| c.selection);
        let opt = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        let flag = |b: bool| String::from(if b { "1" } else { "0" });
        match name {
            "pane_id" => "%1".to_string(),
            "pane_tty" => "/dev/pts/9".to_string(),
            "pane_width" => self.width.to_string(),
            "pane_height" => self.height.to_string(),
            "cursor_x" => self.cursor.0.to_string(),
            "cursor_y" => self.cursor.1.to_string(),
            "history_size" => self.history_size.to_string(),
            "scroll_position" => opt(copy.map(|c| c.scroll_position)),
            "selection_present" => flag(selection.is_some()),
            "copy_cursor_x" => opt(copy.map(|c| c.cursor.0)),
            "copy_cursor_y" => opt(copy.map(|c| c.cursor.1)),
            "selection_start_x" => opt(selection.map(|s| s.0)),
            "selection_start_y" => opt(selection.map(|s| s.1)),
            "selection_end_x" => opt(selection.map(|s| s.2)),
            "selection_end_y" => opt(selection.map(|s| s.3)),
            "alternate_on" => flag(self.alternate_on),
            "rectangle_toggle" => flag(copy.is_some_and(|c| c.rectangle)),
            _ => String::new(),
        }
    }

    /// Reply to the pane state query.
    pub fn vars_reply(&self) -> String {
        PANE_VARS
            .iter()
            .map(|name| self.var(name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Scripted tmux.
pub struct FakeHost {
    pub pane: FakePane,
    /// Every command passed to `run`, in order.
    pub commands: Vec<TmuxCommand>,
    pub tty_writes: Vec<Vec<u8>>,
    /// Every prompt message shown.
    pub prompts: Vec<String>,
    /// Keys typed into successive prompts. `None` leaves a prompt unanswered.
    pub keys: VecDeque<Option<String>>,
    pub fail_tty: bool,
    /// Commands with this name fail; `command-prompt` fails prompts.
    pub fail_command: Option<&'static str>,
    /// Set when a prompt is shown, like a Ctrl-C while tmux waits for a key.
    pub interrupt_on_prompt: Option<Arc<AtomicBool>>,
}

impl FakeHost {
    pub fn new(pane: FakePane) -> Self {
        Self {
            pane,
            commands: Vec::new(),
            tty_writes: Vec::new(),
            prompts: Vec::new(),
            keys: VecDeque::new(),
            fail_tty: false,
            fail_command: None,
            interrupt_on_prompt: None,
        }
    }

    pub fn with_keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|k| Some(k.to_string())).collect();
        self
    }

    /// Every `;`-separated subcommand that was run.
    pub fn subcommands(&self) -> Vec<Vec<String>> {
        self.commands
            .iter()
            .flat_map(|c| {
                c.args()
                    .split(|a| a == ";")
                    .map(|s| s.to_vec())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Copy-mode commands sent with `send-keys -X`, e.g. `-N 2 cursor-down`.
    pub fn copy_keys(&self) -> Vec<String> {
        self.subcommands()
            .into_iter()
            .filter_map(|args| {
                let x = args.iter().position(|a| a == "-X")?;
                Some(args[x + 1..].join(" "))
            })
            .collect()
    }

    /// Number of subcommands whose first argument is `name`.
    pub fn count(&self, name: &str) -> usize {
        self.subcommands()
            .iter()
            .filter(|args| args.first().is_some_and(|a| a == name))
            .count()
    }

    pub fn tty_output(&self) -> Vec<u8> {
        self.tty_writes.concat()
    }

    fn check_failure(&self, name: &str) -> Result<(), HostError> {
        if self.fail_command == Some(name) {
            return Err(HostError::Failed {
                command: name.to_string(),
                status: "exit status: 1".to_string(),
                stderr: "no server running".to_string(),
            });
        }
        Ok(())
    }
}

impl Host for FakeHost {
    fn run(&mut self, command: &TmuxCommand) -> Result<String, HostError> {
        self.commands.push(command.clone());
        self.check_failure(command.name())?;
        let args = command.args();
        let reply = match command.name() {
            "display-message" if args.iter().any(|a| a == "-t") => {
                self.pane.history_after.to_string()
            }
            "display-message" => self.pane.vars_reply(),
            "show-option" => {
                if self.pane.alternate_screen_option {
                    "on".to_string()
                } else {
                    "off".to_string()
                }
            }
            "capture-pane" if args.iter().any(|a| a == "-e") => self.pane.snapshot.clone(),
            "capture-pane" => self.pane.text.clone(),
            _ => String::new(),
        };
        Ok(reply)
    }

    fn write_tty(&mut self, tty: &str, bytes: &[u8]) -> Result<(), HostError> {
        if self.fail_tty {
            return Err(HostError::Tty {
                tty: tty.to_string(),
                source: std::io::Error::other("tty gone"),
            });
        }
        self.tty_writes.push(bytes.to_vec());
        Ok(())
    }

    fn prompt_to_file(&mut self, message: &str, reply_path: &Path) -> Result<(), HostError> {
        self.prompts.push(message.to_string());
        self.check_failure("command-prompt")?;
        if let Some(flag) = &self.interrupt_on_prompt {
            flag.store(true, Ordering::Relaxed);
        }
        if let Some(Some(key)) = self.keys.pop_front() {
            let path = reply_path.to_path_buf();
            std::thread::spawn(move || {
                if let Ok(mut fifo) = OpenOptions::new().write(true).open(path) {
                    let _ = writeln!(fifo, "{key}");
                }
            });
        }
        Ok(())
    }
}

/// Config with a preset key and a short input timeout.
pub fn config(style: JumpStyle, key: &str) -> Config {
    Config {
        style,
        key: Some(key.to_string()),
        input_timeout: Duration::from_millis(200),
        print_command_only: true,
        ..Config::default()
    }
}
