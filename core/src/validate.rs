//! Flag resolution, required-option checks and the parse pipeline.

use tracing::debug;

use crate::coerce::coerce;
use crate::error::ParseError;
use crate::registry::{OptionId, OptionRegistry};
use crate::result::{ParsedOption, ResultSet};
use crate::tokenizer::{self, DetectedOption};

/// Resolves a detected option to its registered spec.
///
/// # Errors
///
/// [`ParseError::UnrecognizedOption`] naming the flag as written.
pub fn resolve(registry: &OptionRegistry, detected: &DetectedOption) -> Result<OptionId, ParseError> {
    registry
        .lookup(&detected.flag)
        .ok_or_else(|| ParseError::UnrecognizedOption {
            flag: detected.written.clone(),
        })
}

/// Checks that every mandatory option was supplied.
///
/// # Errors
///
/// [`ParseError::MissingRequiredOption`] for the first mandatory option, in
/// registration order, that is absent from `parsed`.
pub fn check_required(registry: &OptionRegistry, parsed: &[ParsedOption]) -> Result<(), ParseError> {
    for (id, spec) in registry.required() {
        if !parsed.iter().any(|option| option.id == id) {
            return Err(ParseError::MissingRequiredOption {
                flag: spec.primary_flag().to_string(),
            });
        }
    }
    Ok(())
}

/// Parses a token list (without the program name) against `registry`.
///
/// Runs the whole pipeline: scan, tail reconciliation, then per detected
/// option flag resolution and coercion in input order, then the
/// required-option check. The first error ends the parse.
///
/// # Examples
///
/// ```
/// use optparse_core::{OptionRegistry, OptionSpec, ParameterContract, ParseError, ValueKind, parse_tokens};
///
/// let mut registry = OptionRegistry::new();
/// let sum = registry
///     .add(OptionSpec::new(["s", "sum"]).unwrap().with_parameter(
///         ParameterContract::of_kind(ValueKind::Integer).count(2).required(),
///     ))
///     .unwrap();
///
/// let result = parse_tokens(&registry, &["-s", "2", "4", "extra"]).unwrap();
/// assert_eq!(result.get_values(sum).unwrap().len(), 2);
/// assert_eq!(result.positional_arguments(), ["extra"]);
///
/// let err = parse_tokens(&registry, &["-x"]).unwrap_err();
/// assert_eq!(err, ParseError::UnrecognizedOption { flag: "-x".to_string() });
/// ```
pub fn parse_tokens<S: AsRef<str>>(
    registry: &OptionRegistry,
    tokens: &[S],
) -> Result<ResultSet, ParseError> {
    let mut scan = tokenizer::scan(tokens);
    tokenizer::reconcile_tail(&mut scan, registry);

    let mut parsed = Vec::with_capacity(scan.options.len());
    for detected in &scan.options {
        let id = resolve(registry, detected)?;
        let parameter = coerce(&registry[id], &detected.params)?;
        parsed.push(ParsedOption { id, parameter });
    }
    check_required(registry, &parsed)?;

    debug!(
        options = parsed.len(),
        positional = scan.positional.len(),
        "Parsed command line"
    );
    Ok(ResultSet::new(parsed, scan.positional))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::OptionSpec;

    #[test]
    fn test_resolve_reports_flag_as_written() {
        let registry = OptionRegistry::new();
        let scan = tokenizer::scan(&["--nope=1"]);
        assert_eq!(
            resolve(&registry, &scan.options[0]),
            Err(ParseError::UnrecognizedOption {
                flag: "--nope".to_string()
            })
        );
    }

    #[test]
    fn test_check_required_names_primary_flag() {
        let mut registry = OptionRegistry::new();
        registry
            .add(OptionSpec::new(["required_flag", "r"]).unwrap().required())
            .unwrap();
        assert_eq!(
            check_required(&registry, &[]),
            Err(ParseError::MissingRequiredOption {
                flag: "--required_flag".to_string()
            })
        );
    }

    #[test]
    fn test_first_error_in_input_order_wins() {
        let mut registry = OptionRegistry::new();
        registry.add(OptionSpec::new(["a"]).unwrap()).unwrap();
        registry
            .add(OptionSpec::new(["m"]).unwrap().required())
            .unwrap();
        // `-a` takes no parameters; `-q` is unknown; `-m` is missing.
        let err = parse_tokens(&registry, &["-a", "x", "-q"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::ArityMismatch {
                option: "-a".to_string(),
                received: 1,
                expected: 0,
            }
        );
    }
}
