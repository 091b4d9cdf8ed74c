//! The `Config` value consumed by every par-jump component.

use std::collections::HashSet;
use std::time::Duration;

use unicode_width::UnicodeWidthChar;

use crate::{ConfigError, Region, defaults};

/// How the jump is carried out once a target has been picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpStyle {
    /// Inject a synthetic mouse click at the target cell.
    #[default]
    Mouse,
    /// Drive tmux copy mode cursor commands to the target cell.
    Xcopy,
}

impl JumpStyle {
    /// Parse a `--mode` value. Empty means the default.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "" | "mouse" => Ok(JumpStyle::Mouse),
            "xcopy" => Ok(JumpStyle::Xcopy),
            other => Err(ConfigError::InvalidValue {
                flag: "mode",
                value: other.to_string(),
                reason: "expected 'mouse' or 'xcopy'".to_string(),
            }),
        }
    }
}

/// Parse an `on`/`off` switch. Empty means `default`.
pub fn parse_switch(flag: &'static str, s: &str, default: bool) -> Result<bool, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            flag,
            value: other.to_string(),
            reason: "expected 'on' or 'off'".to_string(),
        }),
    }
}

/// Parse a 1-based `X,Y` cursor override. Empty means no override.
pub fn parse_cursor_pos(s: &str) -> Result<Option<(usize, usize)>, ConfigError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let invalid = |reason: String| ConfigError::InvalidValue {
        flag: "cursor-pos",
        value: s.to_string(),
        reason,
    };

    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| invalid("expected 'X,Y'".to_string()))?;
    let x = x.trim().parse::<usize>().map_err(|e| invalid(e.to_string()))?;
    let y = y.trim().parse::<usize>().map_err(|e| invalid(e.to_string()))?;
    Ok(Some((x, y)))
}

/// Runtime configuration, built once from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Mouse click or copy-mode cursor movement.
    pub style: JumpStyle,

    /// All-lowercase keys match any case; keys with an uppercase letter match
    /// exactly. When off, every key matches exactly.
    pub smart_case: bool,

    /// Alphabet labels are drawn from, in enumeration order.
    pub label_chars: String,

    /// Escape prefix written before every label.
    pub label_attrs: String,

    /// Escape prefix written before every run of dimmed pane text.
    pub text_attrs: String,

    /// Mouse style only: print the `tmux send-keys` command instead of running it.
    pub print_command_only: bool,

    /// Pre-supplied search key. Only used when it has exactly `key_length` characters.
    pub key: Option<String>,

    /// 1-based `(column, row)` used instead of the pane cursor for ranking labels.
    pub cursor_pos: Option<(usize, usize)>,

    /// Matches outside every region are dropped. Empty means no filtering.
    pub regions: Vec<Region>,

    /// Xcopy style only: start a selection after arriving when none was active.
    pub auto_begin_selection: bool,

    /// Number of characters read for the search key.
    pub key_length: usize,

    /// Bound on each single-character wait.
    pub input_timeout: Duration,

    /// Weight of the row delta in the proximity ranking.
    pub row_weight: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: JumpStyle::default(),
            smart_case: defaults::smart_case(),
            label_chars: defaults::label_chars(),
            label_attrs: defaults::label_attrs(),
            text_attrs: defaults::text_attrs(),
            print_command_only: defaults::print_command_only(),
            key: None,
            cursor_pos: None,
            regions: Vec::new(),
            auto_begin_selection: defaults::auto_begin_selection(),
            key_length: defaults::key_length(),
            input_timeout: defaults::input_timeout(),
            row_weight: defaults::row_weight(),
        }
    }
}

impl Config {
    /// The label alphabet as characters.
    pub fn label_alphabet(&self) -> Vec<char> {
        self.label_chars.chars().collect()
    }

    /// The pre-supplied key, if it is usable as-is.
    pub fn preset_key(&self) -> Option<&str> {
        self.key
            .as_deref()
            .filter(|k| k.chars().count() == self.key_length)
    }

    /// Reject configurations the label allocator cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for c in self.label_chars.chars() {
            if !seen.insert(c) {
                return Err(ConfigError::DuplicateLabelChar(c));
            }
            // labels are painted one cell per character over the match
            if c.width() != Some(1) {
                return Err(ConfigError::LabelCharWidth(c));
            }
        }

        let alphabet_size = seen.len();
        if alphabet_size < 2 {
            return Err(ConfigError::AlphabetTooSmall {
                min: 2,
                actual: alphabet_size,
            });
        }

        if self.key_length == 0 {
            return Err(ConfigError::Validation(
                "key length must be at least 1".to_string(),
            ));
        }

        if self.key_length > alphabet_size {
            return Err(ConfigError::KeyLengthExceedsAlphabet {
                key_length: self.key_length,
                alphabet_size,
            });
        }

        if let Some((x, y)) = self.cursor_pos
            && (x == 0 || y == 0)
        {
            return Err(ConfigError::Validation(format!(
                "cursor position {x},{y} is not 1-based"
            )));
        }

        for region in &self.regions {
            if region.left > region.right || region.top > region.bottom {
                return Err(ConfigError::Validation(format!(
                    "region {},{},{},{} is inverted",
                    region.left, region.top, region.right, region.bottom
                )));
            }
        }

        if self.row_weight <= 0 {
            return Err(ConfigError::Validation(
                "row weight must be positive".to_string(),
            ));
        }

        log::debug!(
            "config ok: style={:?} alphabet={} regions={}",
            self.style,
            alphabet_size,
            self.regions.len()
        );
        Ok(())
    }
}
