//! tmux command builders
//!
//! Commands are kept as argv vectors rather than shell strings, so nothing
//! needs escaping when they are executed. Several commands can be chained
//! into one tmux invocation with [`TmuxCommand::then`], which inserts the
//! `;` separator tmux expects.

use std::path::Path;

/// A copy-mode command sent with `send-keys -X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyCommand {
    Cancel,
    CursorUp,
    CursorDown,
    CursorRight,
    StartOfLine,
    /// Scroll so that the given history line is at the top.
    GotoLine(i64),
    BeginSelection,
    SelectLine,
    RectangleOn,
}

impl CopyCommand {
    fn name(&self) -> &'static str {
        match self {
            CopyCommand::Cancel => "cancel",
            CopyCommand::CursorUp => "cursor-up",
            CopyCommand::CursorDown => "cursor-down",
            CopyCommand::CursorRight => "cursor-right",
            CopyCommand::StartOfLine => "start-of-line",
            CopyCommand::GotoLine(_) => "goto-line",
            CopyCommand::BeginSelection => "begin-selection",
            CopyCommand::SelectLine => "select-line",
            CopyCommand::RectangleOn => "rectangle-on",
        }
    }
}

/// A tmux command (or `;`-chained sequence of commands) ready to run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TmuxCommand {
    args: Vec<String>,
}

impl TmuxCommand {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty sequence, to be extended with [`then`](Self::then).
    pub fn batch() -> Self {
        Self::default()
    }

    /// Arguments to pass to the tmux binary
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// First argument of the command, used for logging and errors
    pub fn name(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Append another command, separated by `;`
    pub fn then(mut self, next: TmuxCommand) -> Self {
        self.push(next);
        self
    }

    /// Append another command in place, separated by `;`
    pub fn push(&mut self, next: TmuxCommand) {
        if next.is_empty() {
            return;
        }
        if !self.args.is_empty() {
            self.args.push(";".to_string());
        }
        self.args.extend(next.args);
    }

    /// Render as a shell command line, e.g. for printing instead of running
    pub fn shell_line(&self, program: &str) -> String {
        shell_words::join(std::iter::once(program).chain(self.args.iter().map(String::as_str)))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Print one format variable per line for the active pane
    pub fn display_formats(names: &[&str]) -> Self {
        let format = names
            .iter()
            .map(|n| format!("#{{{}}}", n))
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(["display-message".to_string(), "-p".to_string(), format])
    }

    /// Print a single format variable for a specific pane
    pub fn display_pane_format(pane_id: &str, name: &str) -> Self {
        Self::new([
            "display-message".to_string(),
            "-t".to_string(),
            pane_id.to_string(),
            "-p".to_string(),
            format!("#{{{}}}", name),
        ])
    }

    /// Print the value of a global option
    pub fn show_global_option(name: &str) -> Self {
        Self::new(["show-option", "-gv", name])
    }

    /// Capture pane contents to stdout
    ///
    /// `range` is the inclusive `(start, end)` line pair passed as `-S`/`-E`;
    /// negative lines reach into history. `styled` keeps escape sequences.
    pub fn capture_pane(pane_id: &str, range: Option<(i64, i64)>, styled: bool) -> Self {
        let mut args = vec![
            "capture-pane".to_string(),
            "-t".to_string(),
            pane_id.to_string(),
        ];
        if let Some((start, end)) = range {
            args.extend([
                "-S".to_string(),
                start.to_string(),
                "-E".to_string(),
                end.to_string(),
            ]);
        }
        if styled {
            args.push("-e".to_string());
        }
        args.push("-p".to_string());
        Self { args }
    }

    // =========================================================================
    // Copy mode
    // =========================================================================

    /// Enter copy mode
    pub fn copy_mode(pane_id: &str) -> Self {
        Self::new(["copy-mode", "-t", pane_id])
    }

    /// Send a copy-mode command once
    pub fn send_copy(pane_id: &str, command: CopyCommand) -> Self {
        let mut args = vec![
            "send-keys".to_string(),
            "-t".to_string(),
            pane_id.to_string(),
            "-X".to_string(),
            command.name().to_string(),
        ];
        if let CopyCommand::GotoLine(line) = command {
            args.push(line.to_string());
        }
        Self { args }
    }

    /// Send a copy-mode command `count` times
    pub fn send_copy_repeat(pane_id: &str, command: CopyCommand, count: usize) -> Self {
        Self::new([
            "send-keys".to_string(),
            "-t".to_string(),
            pane_id.to_string(),
            "-X".to_string(),
            "-N".to_string(),
            count.to_string(),
            command.name().to_string(),
        ])
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Send raw bytes to a pane as hex-encoded keys
    pub fn send_hex_keys(pane_id: &str, bytes: &[u8]) -> Self {
        let mut args = vec![
            "send-keys".to_string(),
            "-t".to_string(),
            pane_id.to_string(),
            "-H".to_string(),
        ];
        args.extend(bytes.iter().map(|b| format!("{:02x}", b)));
        Self { args }
    }

    /// Prompt for a single key and append it, newline-terminated, to `reply_path`
    ///
    /// The reply is written by a background `tee`, so the caller has to be
    /// reading `reply_path` (usually a FIFO) to receive it.
    pub fn prompt_to_file(message: &str, reply_path: &Path) -> Self {
        let quoted = shell_words::quote(&reply_path.to_string_lossy()).into_owned();
        Self::new([
            "command-prompt".to_string(),
            "-1".to_string(),
            "-p".to_string(),
            message.to_string(),
            format!("run-shell -b \"tee >> {} << EOF\\n%%%\\nEOF\"", quoted),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let cmd = TmuxCommand::display_formats(&["pane_id", "pane_width"]);
        assert_eq!(
            cmd.args(),
            &["display-message", "-p", "#{pane_id}\n#{pane_width}"]
        );
    }

    #[test]
    fn test_capture_pane_range() {
        let cmd = TmuxCommand::capture_pane("%3", Some((-5, 18)), false);
        assert_eq!(
            cmd.args(),
            &["capture-pane", "-t", "%3", "-S", "-5", "-E", "18", "-p"]
        );
        let cmd = TmuxCommand::capture_pane("%3", None, true);
        assert_eq!(cmd.args(), &["capture-pane", "-t", "%3", "-e", "-p"]);
    }

    #[test]
    fn test_chaining_inserts_separator() {
        let cmd = TmuxCommand::batch()
            .then(TmuxCommand::send_copy_repeat("%1", CopyCommand::CursorDown, 3))
            .then(TmuxCommand::send_copy("%1", CopyCommand::StartOfLine));
        assert_eq!(
            cmd.args(),
            &[
                "send-keys", "-t", "%1", "-X", "-N", "3", "cursor-down", ";", "send-keys", "-t",
                "%1", "-X", "start-of-line"
            ]
        );
    }

    #[test]
    fn test_chaining_skips_empty() {
        let cmd = TmuxCommand::batch().then(TmuxCommand::batch());
        assert!(cmd.is_empty());
    }

    #[test]
    fn test_goto_line_argument() {
        let cmd = TmuxCommand::send_copy("%0", CopyCommand::GotoLine(42));
        assert_eq!(cmd.args(), &["send-keys", "-t", "%0", "-X", "goto-line", "42"]);
    }

    #[test]
    fn test_hex_keys() {
        let cmd = TmuxCommand::send_hex_keys("%2", b"\x1b[0");
        assert_eq!(cmd.args(), &["send-keys", "-t", "%2", "-H", "1b", "5b", "30"]);
    }

    #[test]
    fn test_shell_line_quotes() {
        let cmd = TmuxCommand::show_global_option("alternate-screen");
        assert_eq!(cmd.shell_line("tmux"), "tmux show-option -gv alternate-screen");
        let cmd = TmuxCommand::display_pane_format("%1", "history_size");
        let line = cmd.shell_line("tmux");
        assert!(line.starts_with("tmux display-message -t "));
        assert!(line.ends_with(" -p '#{history_size}'"));
    }

    #[test]
    fn test_prompt_to_file() {
        let cmd = TmuxCommand::prompt_to_file("key: _", Path::new("/tmp/x y/fifo"));
        assert_eq!(cmd.name(), "command-prompt");
        assert_eq!(
            cmd.args()[4],
            "run-shell -b \"tee >> '/tmp/x y/fifo' << EOF\\n%%%\\nEOF\""
        );
    }
}
