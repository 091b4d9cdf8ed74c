//! Typed error variants for the par-jump-config crate.
//!
//! Produced by flag parsing and by [`Config::validate`](crate::Config::validate).
//! The binary surfaces these through `anyhow`, library consumers can match on
//! the variants directly.

use thiserror::Error;

/// Errors that can occur while building or validating a [`Config`](crate::Config).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag value could not be parsed.
    #[error("invalid value '{value}' for --{flag}: {reason}")]
    InvalidValue {
        /// Flag name without the leading dashes.
        flag: &'static str,
        /// The raw value that was rejected.
        value: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The label alphabet contains the same character more than once.
    #[error("label characters contain duplicate '{0}'")]
    DuplicateLabelChar(char),

    /// A label character does not occupy exactly one terminal column.
    #[error("label character '{0}' is not one column wide")]
    LabelCharWidth(char),

    /// The label alphabet is too small to build labels from.
    #[error("label characters must contain at least {min} distinct characters, got {actual}")]
    AlphabetTooSmall {
        /// Minimum accepted alphabet size.
        min: usize,
        /// Size that was configured.
        actual: usize,
    },

    /// The search key needs more characters than the alphabet provides.
    #[error("key length {key_length} exceeds the {alphabet_size} label characters")]
    KeyLengthExceedsAlphabet {
        /// Configured key length.
        key_length: usize,
        /// Configured alphabet size.
        alphabet_size: usize,
    },

    /// A field value failed semantic validation.
    #[error("config validation error: {0}")]
    Validation(String),
}
