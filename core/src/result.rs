//! Parse results.

use std::collections::BTreeMap;

use crate::registry::OptionId;
use crate::spec::{Parameter, Value};

/// One supplied option and its coerced parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOption {
    pub id: OptionId,
    /// `None` when the option was supplied without parameters.
    pub parameter: Option<Parameter>,
}

/// Immutable snapshot of a successful parse.
///
/// Options are keyed by [`OptionId`]; an option supplied more than once
/// keeps its last occurrence.
///
/// # Examples
///
/// ```
/// use optparse_core::{OptionRegistry, OptionSpec, ParameterContract, Value, parse_tokens};
///
/// let mut registry = OptionRegistry::new();
/// let name = registry
///     .add(OptionSpec::new(["n", "name"]).unwrap().with_parameter(ParameterContract::new()))
///     .unwrap();
///
/// let result = parse_tokens(&registry, &["--name=ada", "notes.txt"]).unwrap();
/// assert!(result.is_set(name));
/// assert_eq!(result.get_value(name), Some(&Value::from("ada")));
/// assert_eq!(result.positional_arguments(), ["notes.txt"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    options: BTreeMap<OptionId, Option<Parameter>>,
    positional: Vec<String>,
}

impl ResultSet {
    pub fn new(parsed: impl IntoIterator<Item = ParsedOption>, positional: Vec<String>) -> Self {
        let options = parsed
            .into_iter()
            .map(|option| (option.id, option.parameter))
            .collect();
        Self {
            options,
            positional,
        }
    }

    /// Number of distinct options supplied; positional arguments not counted.
    pub fn count(&self) -> usize {
        self.options.len()
    }

    pub fn is_set(&self, id: OptionId) -> bool {
        self.options.contains_key(&id)
    }

    /// Returns `true` if the option was supplied with parameters.
    pub fn has_parameter(&self, id: OptionId) -> bool {
        self.get_parameter(id).is_some()
    }

    /// The option's parameters, or `None` if it was not supplied or was
    /// supplied without parameters.
    pub fn get_parameter(&self, id: OptionId) -> Option<&Parameter> {
        self.options.get(&id).and_then(Option::as_ref)
    }

    /// The value of an arity-1 option.
    pub fn get_value(&self, id: OptionId) -> Option<&Value> {
        match self.get_parameter(id)? {
            Parameter::Single(value) => Some(value),
            Parameter::List(_) => None,
        }
    }

    /// All values of the option, whatever its arity.
    pub fn get_values(&self, id: OptionId) -> Option<&[Value]> {
        self.get_parameter(id).map(Parameter::values)
    }

    pub fn positional_arguments(&self) -> &[String] {
        &self.positional
    }

    /// Supplied options in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, Option<&Parameter>)> {
        self.options.iter().map(|(id, param)| (*id, param.as_ref()))
    }
}
