//! Parameter coercion.

use crate::error::ParseError;
use crate::spec::{OptionSpec, Parameter};

/// Converts an option's raw parameter tokens into typed values.
///
/// Returns `Ok(None)` when no tokens were supplied and the parameter is
/// optional (or the option takes none). Otherwise the token count must equal
/// the declared arity; tokens are converted left to right and each value is
/// checked by the validator right after its conversion. The first failing
/// token is reported and the remaining ones are not looked at.
///
/// # Errors
///
/// [`ParseError::MissingRequiredParameter`], [`ParseError::ArityMismatch`],
/// [`ParseError::ParameterType`] or [`ParseError::InvalidParameter`].
pub fn coerce(spec: &OptionSpec, raw: &[String]) -> Result<Option<Parameter>, ParseError> {
    let option = || spec.primary_flag().to_string();

    if raw.is_empty() {
        return match spec.parameter() {
            Some(contract) if contract.is_required() => {
                Err(ParseError::MissingRequiredParameter {
                    option: option(),
                    expected: contract.arity(),
                })
            }
            _ => Ok(None),
        };
    }

    let expected = spec.arity();
    let contract = match spec.parameter() {
        Some(contract) if raw.len() == expected => contract,
        _ => {
            return Err(ParseError::ArityMismatch {
                option: option(),
                received: raw.len(),
                expected,
            });
        }
    };

    let mut values = Vec::with_capacity(raw.len());
    for token in raw {
        let value = contract
            .convert(token)
            .map_err(|reason| ParseError::ParameterType {
                option: option(),
                token: token.clone(),
                reason,
            })?;
        if !contract.accepts(&value) {
            return Err(ParseError::InvalidParameter {
                option: option(),
                token: token.clone(),
            });
        }
        values.push(value);
    }

    Ok(Some(if expected == 1 {
        Parameter::Single(values.remove(0))
    } else {
        Parameter::List(values)
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::spec::{ParameterContract, Value, ValueKind};

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn option_with(contract: ParameterContract) -> OptionSpec {
        OptionSpec::new(["o", "option"])
            .unwrap()
            .with_parameter(contract)
    }

    #[test]
    fn test_no_tokens_without_contract_is_empty() {
        let spec = OptionSpec::new(["v"]).unwrap();
        assert_eq!(coerce(&spec, &[]), Ok(None));
    }

    #[test]
    fn test_no_tokens_optional_is_empty() {
        let spec = option_with(ParameterContract::new().count(3));
        assert_eq!(coerce(&spec, &[]), Ok(None));
    }

    #[test]
    fn test_no_tokens_required_fails() {
        let spec = option_with(ParameterContract::new().count(2).required());
        assert_eq!(
            coerce(&spec, &[]),
            Err(ParseError::MissingRequiredParameter {
                option: "-o".to_string(),
                expected: 2,
            })
        );
    }

    #[test]
    fn test_arity_mismatch_names_counts() {
        let spec = option_with(ParameterContract::new().count(2));
        assert_eq!(
            coerce(&spec, &tokens(&["a", "b", "c"])),
            Err(ParseError::ArityMismatch {
                option: "-o".to_string(),
                received: 3,
                expected: 2,
            })
        );
    }

    #[test]
    fn test_parameters_on_parameterless_option() {
        let spec = OptionSpec::new(["flag"]).unwrap();
        assert_eq!(
            coerce(&spec, &tokens(&["x"])),
            Err(ParseError::ArityMismatch {
                option: "--flag".to_string(),
                received: 1,
                expected: 0,
            })
        );
    }

    #[test]
    fn test_arity_one_yields_single_value() {
        let spec = option_with(ParameterContract::of_kind(ValueKind::Integer));
        assert_eq!(
            coerce(&spec, &tokens(&["-50"])),
            Ok(Some(Parameter::Single(Value::Integer(-50))))
        );
    }

    #[test]
    fn test_arity_many_yields_ordered_list() {
        let spec = option_with(ParameterContract::of_kind(ValueKind::Integer).count(3));
        assert_eq!(
            coerce(&spec, &tokens(&["3", "1", "2"])),
            Ok(Some(Parameter::List(vec![
                Value::Integer(3),
                Value::Integer(1),
                Value::Integer(2),
            ])))
        );
    }

    #[test]
    fn test_type_error_reports_first_bad_token() {
        let spec = option_with(ParameterContract::of_kind(ValueKind::Integer).count(3));
        let err = coerce(&spec, &tokens(&["1", "two", "three"])).unwrap_err();
        match err {
            ParseError::ParameterType { option, token, .. } => {
                assert_eq!(option, "-o");
                assert_eq!(token, "two");
            }
            other => panic!("expected ParameterType, got: {other:?}"),
        }
    }

    #[test]
    fn test_type_error_skips_validator() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let spec = option_with(
            ParameterContract::of_kind(ValueKind::Integer)
                .count(3)
                .with_validator(move |_| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    true
                }),
        );
        assert!(coerce(&spec, &tokens(&["1", "x", "3"])).is_err());
        // Only the first token got as far as validation.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_validator_failure_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let spec = option_with(
            ParameterContract::new()
                .count(5)
                .with_validator(move |v| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    matches!(v.as_str(), Some("allowed1" | "allowed2"))
                }),
        );
        let err = coerce(
            &spec,
            &tokens(&["allowed1", "allowed2", "not-allowed", "allowed2", "allowed1"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidParameter {
                option: "-o".to_string(),
                token: "not-allowed".to_string(),
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_validator_sees_coerced_value() {
        let spec = option_with(
            ParameterContract::of_kind(ValueKind::Integer)
                .with_validator(|v| v.as_i64().is_some_and(|n| (3..=7).contains(&n))),
        );
        assert!(coerce(&spec, &tokens(&["4"])).is_ok());
        assert!(matches!(
            coerce(&spec, &tokens(&["8"])),
            Err(ParseError::InvalidParameter { .. })
        ));
    }
}
