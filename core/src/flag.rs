//! Flag grammar.
//!
//! Options are declared with bare flags (`"s"`, `"sum"`) and written on the
//! command line with a marker: one dash for single-letter flags (`-s`), two
//! dashes for words (`--sum`). This module owns both directions: validating
//! declared flags and classifying raw command-line tokens.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;

static SHORT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]$").expect("static regex must compile"));
static LONG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^ =][^ =]+$").expect("static regex must compile"));

static SHORT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[A-Za-z]$").expect("static regex must compile"));
static LONG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--[^ ]+$").expect("static regex must compile"));
static BUNDLE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[A-Za-z]{2,}$").expect("static regex must compile"));

/// The literal token that ends option parsing.
pub const DELIMITER: &str = "--";

/// A declared option flag.
///
/// # Examples
///
/// ```
/// use optparse_core::Flag;
///
/// let short = Flag::parse("s").unwrap();
/// let long = Flag::parse("sum").unwrap();
/// assert_eq!(short.to_string(), "-s");
/// assert_eq!(long.to_string(), "--sum");
/// assert!(Flag::parse("two words").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    /// Single ASCII letter, written `-x`.
    Short(char),
    /// Two or more non-space characters, written `--name`.
    Long(String),
}

impl Flag {
    /// Parses a bare flag as declared by the program (no leading marker).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFlag`] when the text is neither a single
    /// letter nor a word of two or more characters without spaces or `=`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        if SHORT_NAME.is_match(raw) {
            if let Some(c) = raw.chars().next() {
                return Ok(Self::Short(c));
            }
        }
        if LONG_NAME.is_match(raw) {
            return Ok(Self::Long(raw.to_string()));
        }
        Err(ConfigError::InvalidFlag(raw.to_string()))
    }

    /// Parses a flag as written on the command line (`-x` or `--name`).
    ///
    /// Bare names are accepted too, so lookups work either way.
    pub fn from_written(written: &str) -> Option<Self> {
        if SHORT_TOKEN.is_match(written) {
            return written[1..].chars().next().map(Self::Short);
        }
        if let Some(name) = written.strip_prefix(DELIMITER) {
            return (!name.is_empty()).then(|| Self::Long(name.to_string()));
        }
        Self::parse(written).ok()
    }

    /// Returns `true` for single-letter flags.
    pub fn is_short(&self) -> bool {
        matches!(self, Self::Short(_))
    }

    /// The flag without its marker.
    pub fn name(&self) -> String {
        match self {
            Self::Short(c) => c.to_string(),
            Self::Long(name) => name.clone(),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short(c) => write!(f, "-{c}"),
            Self::Long(name) => write!(f, "--{name}"),
        }
    }
}

/// Classification of one raw command-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `-x`
    Short(char),
    /// `--name` or `--name=a,b`; `params` is the text after the first `=`.
    Long {
        written: &'a str,
        params: Option<&'a str>,
    },
    /// Exactly `--`.
    Delimiter,
    /// Anything else: a parameter or a positional argument.
    Other(&'a str),
}

pub(crate) fn classify(token: &str) -> Token<'_> {
    if token == DELIMITER {
        return Token::Delimiter;
    }
    if SHORT_TOKEN.is_match(token) {
        if let Some(c) = token[1..].chars().next() {
            return Token::Short(c);
        }
    }
    if LONG_TOKEN.is_match(token) {
        return match token.split_once('=') {
            Some((written, params)) => Token::Long {
                written,
                params: Some(params),
            },
            None => Token::Long {
                written: token,
                params: None,
            },
        };
    }
    Token::Other(token)
}

/// Returns `true` for a bundled short-flag group such as `-abc`.
pub(crate) fn is_bundle(token: &str) -> bool {
    BUNDLE_TOKEN.is_match(token)
}
