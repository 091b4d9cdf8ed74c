//! Command-line interface for par-jump.
//!
//! The tmux plugin passes every option through, unset ones as empty strings,
//! so each flag treats an empty value as "use the default".

use clap::Parser;
use log::LevelFilter;
use par_jump_config::config::{parse_cursor_pos, parse_switch};
use par_jump_config::{Config, ConfigError, JumpStyle, Region, defaults};

/// par-jump - jump to any visible text in a tmux pane
#[derive(Parser, Debug)]
#[command(name = "par-jump")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Jump style: mouse (click at the target) or xcopy (move the copy-mode cursor)
    #[arg(long, value_name = "MODE", default_value = "")]
    pub mode: String,

    /// on: lowercase keys match any case
    #[arg(long, value_name = "on|off", default_value = "")]
    pub smart_case: String,

    /// Characters labels are built from, in order of preference
    #[arg(long, value_name = "CHARS", default_value = "")]
    pub label_chars: String,

    /// Escape sequence written before every label
    #[arg(long, value_name = "ATTRS", default_value = "")]
    pub label_attrs: String,

    /// Escape sequence written before the dimmed pane text
    #[arg(long, value_name = "ATTRS", default_value = "")]
    pub text_attrs: String,

    /// Mouse style: print the tmux command instead of running it
    #[arg(long, value_name = "on|off", default_value = "")]
    pub print_command_only: String,

    /// Search key, skips the key prompt when it has the full key length
    #[arg(long, value_name = "KEY", default_value = "")]
    pub key: String,

    /// 1-based X,Y used instead of the cursor when ranking labels
    #[arg(long, value_name = "X,Y", default_value = "")]
    pub cursor_pos: String,

    /// Only label matches inside these 1-based X1,Y1,X2,Y2 rectangles
    #[arg(long, value_name = "X1,Y1,X2,Y2[,...]", default_value = "")]
    pub regions: String,

    /// Xcopy style: begin a selection after jumping when none is active
    #[arg(long, value_name = "on|off", default_value = "")]
    pub auto_begin_selection: String,

    /// Debug log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", value_parser = parse_level)]
    pub log_level: Option<LevelFilter>,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("invalid level '{s}' (off, error, warn, info, debug, trace)"))
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl Cli {
    /// Build and validate the configuration.
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let config = Config {
            style: JumpStyle::parse(&self.mode)?,
            smart_case: parse_switch("smart-case", &self.smart_case, defaults::smart_case())?,
            label_chars: non_empty(&self.label_chars).unwrap_or_else(defaults::label_chars),
            label_attrs: non_empty(&self.label_attrs).unwrap_or_else(defaults::label_attrs),
            text_attrs: non_empty(&self.text_attrs).unwrap_or_else(defaults::text_attrs),
            print_command_only: parse_switch(
                "print-command-only",
                &self.print_command_only,
                defaults::print_command_only(),
            )?,
            key: non_empty(&self.key),
            cursor_pos: parse_cursor_pos(&self.cursor_pos)?,
            regions: Region::parse_list(&self.regions)?,
            auto_begin_selection: parse_switch(
                "auto-begin-selection",
                &self.auto_begin_selection,
                defaults::auto_begin_selection(),
            )?,
            ..Config::default()
        };
        config.validate()?;
        Ok(config)
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    pub config: Config,
    /// Log level from `--log-level`
    pub log_level: Option<LevelFilter>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with the jump
    Continue(RuntimeOptions),
    /// Exit with the given code
    Exit(i32),
}

/// Parse arguments and build the configuration.
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();
    match cli.to_config() {
        Ok(config) => CliResult::Continue(RuntimeOptions {
            config,
            log_level: cli.log_level,
        }),
        Err(e) => {
            eprintln!("par-jump: error: {e}");
            CliResult::Exit(1)
        }
    }
}
