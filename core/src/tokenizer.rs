//! Token scanning.
//!
//! Turns the raw argument list into detected options and positional
//! arguments in three steps:
//!
//! 1. [`expand_bundles`] rewrites `-abc` into `-a -b -c` across the whole
//!    list;
//! 2. [`scan`] walks the tokens once, keeping at most one short option open
//!    to collect the tokens that follow it;
//! 3. [`reconcile_tail`] decides how many of the last short option's tokens
//!    it really owns, releasing the rest to the positional list.
//!
//! Nothing here fails; unknown flags and bad parameter counts are reported
//! by later stages.

use tracing::{debug, trace};

use crate::flag::{self, Flag, Token};
use crate::registry::OptionRegistry;

/// An option found on the command line, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedOption {
    /// Flag key used for lookup.
    pub flag: Flag,
    /// Flag exactly as the user wrote it (`-o`, `--output`).
    pub written: String,
    /// Raw parameter tokens, in order.
    pub params: Vec<String>,
}

impl DetectedOption {
    fn short(c: char) -> Self {
        Self {
            flag: Flag::Short(c),
            written: format!("-{c}"),
            params: Vec::new(),
        }
    }

    fn long(written: &str, params: Option<&str>) -> Self {
        let name = written.strip_prefix(flag::DELIMITER).unwrap_or(written);
        Self {
            flag: Flag::Long(name.to_string()),
            written: written.to_string(),
            params: params
                .map(|list| list.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

/// Result of a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Detected options in input order.
    pub options: Vec<DetectedOption>,
    /// Positional arguments in input order.
    pub positional: Vec<String>,
    /// Whether the `--` delimiter was seen.
    pub delimited: bool,
}

/// Expands every bundled short-flag group into single short flags.
///
/// # Examples
///
/// ```
/// use optparse_core::tokenizer::expand_bundles;
///
/// assert_eq!(expand_bundles(&["-xyz", "file"]), vec!["-x", "-y", "-z", "file"]);
/// ```
pub fn expand_bundles<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.as_ref();
        if flag::is_bundle(token) {
            expanded.extend(token[1..].chars().map(|c| format!("-{c}")));
        } else {
            expanded.push(token.to_string());
        }
    }
    expanded
}

/// Splits tokens into detected options and positional arguments.
///
/// Tail reconciliation is not applied here; see [`reconcile_tail`].
pub fn scan<S: AsRef<str>>(tokens: &[S]) -> Scan {
    let mut out = Scan::default();
    let mut open: Option<DetectedOption> = None;

    for token in expand_bundles(tokens) {
        if out.delimited {
            out.positional.push(token);
            continue;
        }

        match flag::classify(&token) {
            Token::Long { written, params } => {
                out.options.extend(open.take());
                out.options.push(DetectedOption::long(written, params));
            }
            Token::Short(c) => {
                out.options.extend(open.take());
                open = Some(DetectedOption::short(c));
            }
            Token::Delimiter => {
                out.options.extend(open.take());
                out.delimited = true;
            }
            Token::Other(_) => match open.as_mut() {
                Some(option) => option.params.push(token),
                None => out.positional.push(token),
            },
        }
    }
    out.options.extend(open);

    trace!(
        options = out.options.len(),
        positional = out.positional.len(),
        delimited = out.delimited,
        "Scanned tokens"
    );
    out
}

/// Trims the last detected option to the tokens it owns.
///
/// Applies only when the last option was written as a short flag and no
/// delimiter was seen: its whitespace-separated parameters cannot be told
/// apart from trailing positional arguments. Tokens beyond the declared
/// arity move to the end of the positional list. If the parameter is
/// optional and too few tokens were collected, the option keeps none.
///
/// Earlier options and long options are left untouched, as is a last flag
/// that no registered option declares.
pub fn reconcile_tail(scan: &mut Scan, registry: &OptionRegistry) {
    if scan.delimited {
        return;
    }
    let Some(last) = scan.options.last_mut() else {
        return;
    };
    if !last.flag.is_short() {
        return;
    }
    let Some(spec) = registry.lookup(&last.flag).and_then(|id| registry.get(id)) else {
        return;
    };

    let mut expected = spec.arity();
    if let Some(contract) = spec.parameter() {
        if !contract.is_required() && last.params.len() < expected {
            expected = 0;
        }
    }

    let keep = last.params.len().min(expected);
    let released = last.params.split_off(keep);
    if !released.is_empty() {
        debug!(
            flag = %last.written,
            kept = keep,
            released = ?released,
            "Released trailing tokens to positional arguments"
        );
        scan.positional.extend(released);
    }
}
