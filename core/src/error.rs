//! Error types for option registration and parsing.
//!
//! Registration problems surface as [`ConfigError`] the moment an option is
//! declared or added to a registry. Problems with the user's command line
//! surface as [`ParseError`] from a parse call; the first violation found
//! ends the parse.

use thiserror::Error;

/// Errors raised while declaring or registering options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An option was declared without any flag.
    #[error("option must define at least one flag")]
    EmptyFlags,
    /// A flag is neither a single letter nor a space-free word.
    #[error("invalid option flag format: {0}")]
    InvalidFlag(String),
    /// Two options (or one option twice) expose the same flag.
    #[error("duplicate option flag: {0}")]
    DuplicateFlag(String),
    /// A placeholder list whose length differs from the parameter count.
    #[error("option {option} declares {labels} placeholder(s) for {arity} parameter(s)")]
    PlaceholderCount {
        option: String,
        labels: usize,
        arity: usize,
    },
}

/// Broad grouping of [`ParseError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Something is wrong with an option itself (unknown or missing).
    Option,
    /// Something is wrong with the parameters given to an option.
    Parameter,
}

/// Errors raised while parsing a command line.
///
/// Options are named by their flag with its marker (`-s`, `--sum`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A flag that no registered option declares.
    #[error("unrecognized option: {flag}")]
    UnrecognizedOption { flag: String },
    /// A required option was not supplied.
    #[error("mandatory option {flag} not supplied")]
    MissingRequiredOption { flag: String },
    /// Parameter count differs from the declared arity.
    #[error("option {option} received {received} parameter(s), expected {expected}")]
    ArityMismatch {
        option: String,
        received: usize,
        expected: usize,
    },
    /// A required parameter was not supplied at all.
    #[error("option {option} expects {expected} parameter(s), none received")]
    MissingRequiredParameter { option: String, expected: usize },
    /// A token could not be converted to the declared type.
    #[error("option {option}: parameter '{token}' has invalid type ({reason})")]
    ParameterType {
        option: String,
        token: String,
        reason: String,
    },
    /// A converted value was rejected by the option's validator.
    #[error("option {option}: parameter '{token}' is not valid")]
    InvalidParameter { option: String, token: String },
}

impl ParseError {
    /// Returns whether the error concerns an option or its parameters.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnrecognizedOption { .. } | Self::MissingRequiredOption { .. } => {
                ErrorCategory::Option
            }
            Self::ArityMismatch { .. }
            | Self::MissingRequiredParameter { .. }
            | Self::ParameterType { .. }
            | Self::InvalidParameter { .. } => ErrorCategory::Parameter,
        }
    }
}
