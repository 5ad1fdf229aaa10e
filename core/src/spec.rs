//! Option declarations.
//!
//! An [`OptionSpec`] names one logical option by one or more aliased flags
//! and optionally carries a [`ParameterContract`] describing the parameters
//! it accepts. Specs are built once at program setup and never change.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::flag::Flag;

/// A coerced parameter value.
///
/// # Examples
///
/// ```
/// use optparse_core::Value;
///
/// let v = Value::from(42i64);
/// assert_eq!(v.as_i64(), Some(42));
/// assert_eq!(v.to_string(), "42");
/// assert_eq!(Value::from("x").as_str(), Some("x"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Built-in parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Keep the token as text (the default).
    #[default]
    Text,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// `true`/`false`, `yes`/`no`, `1`/`0`, case-insensitive.
    Bool,
}

impl ValueKind {
    /// Converts one raw token.
    ///
    /// # Errors
    ///
    /// Returns a short reason when the token does not have this kind.
    pub fn coerce(self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Text => Ok(Value::Text(raw.to_string())),
            Self::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|err| err.to_string()),
            Self::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|err| err.to_string()),
            Self::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "0" => Ok(Value::Bool(false)),
                _ => Err("expected true or false".to_string()),
            },
        }
    }

    /// Returns `true` for kinds whose values are numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// Help-page label(s) for an option's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placeholder {
    /// One label shown as is, whatever the arity.
    Single(String),
    /// One label per parameter; length must equal the arity.
    List(Vec<String>),
}

impl From<&str> for Placeholder {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for Placeholder {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for Placeholder {
    fn from(labels: Vec<String>) -> Self {
        Self::List(labels)
    }
}

impl<const N: usize> From<[&str; N]> for Placeholder {
    fn from(labels: [&str; N]) -> Self {
        Self::List(labels.iter().map(|s| s.to_string()).collect())
    }
}

/// Converts one raw token into a [`Value`].
pub type CoerceFn = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;
/// Accepts or rejects one coerced [`Value`].
pub type ValidatorFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Describes the parameters an option accepts.
///
/// Defaults: one optional text parameter, no placeholder, no validator.
///
/// # Examples
///
/// ```
/// use optparse_core::{ParameterContract, ValueKind};
///
/// let vector = ParameterContract::of_kind(ValueKind::Integer)
///     .count(2)
///     .required()
///     .with_placeholder(["x", "y"])
///     .with_validator(|v| v.as_i64().is_some_and(|n| n >= 0));
/// assert_eq!(vector.arity(), 2);
/// assert!(vector.is_required());
/// ```
#[derive(Clone)]
pub struct ParameterContract {
    arity: usize,
    required: bool,
    kind: Option<ValueKind>,
    placeholder: Option<Placeholder>,
    coerce: CoerceFn,
    validator: Option<ValidatorFn>,
}

impl ParameterContract {
    /// One optional text parameter.
    pub fn new() -> Self {
        Self::of_kind(ValueKind::Text)
    }

    /// One optional parameter of a built-in kind.
    pub fn of_kind(kind: ValueKind) -> Self {
        Self {
            arity: 1,
            required: false,
            kind: Some(kind),
            placeholder: None,
            coerce: Arc::new(move |raw| kind.coerce(raw)),
            validator: None,
        }
    }

    /// Sets how many parameters the option takes.
    pub fn count(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the help-page placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<Placeholder>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Replaces the conversion applied to every raw token.
    pub fn with_coercion<F>(mut self, coerce: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.kind = None;
        self.coerce = Arc::new(coerce);
        self
    }

    /// Adds a predicate every coerced value must satisfy.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The built-in kind, or `None` when a custom coercion is installed.
    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    pub(crate) fn convert(&self, raw: &str) -> Result<Value, String> {
        (self.coerce)(raw)
    }

    pub(crate) fn accepts(&self, value: &Value) -> bool {
        self.validator.as_ref().is_none_or(|validator| validator(value))
    }
}

impl Default for ParameterContract {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParameterContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterContract")
            .field("arity", &self.arity)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("placeholder", &self.placeholder)
            .field("validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

/// Declaration of one option.
///
/// # Examples
///
/// ```
/// use optparse_core::{OptionSpec, ParameterContract, ValueKind};
///
/// let sum = OptionSpec::new(["s", "sum"])
///     .unwrap()
///     .with_description("Returns the sum of x and y")
///     .with_parameter(
///         ParameterContract::of_kind(ValueKind::Integer)
///             .count(2)
///             .required()
///             .with_placeholder(["x", "y"]),
///     );
/// assert_eq!(sum.primary_flag().to_string(), "-s");
/// assert_eq!(sum.arity(), 2);
/// assert!(!sum.is_required());
/// ```
#[derive(Debug, Clone)]
pub struct OptionSpec {
    flags: Vec<Flag>,
    required: bool,
    description: Option<String>,
    parameter: Option<ParameterContract>,
}

impl OptionSpec {
    /// Declares an option from bare flags (`"o"`, `"output"`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyFlags`] for an empty list and
    /// [`ConfigError::InvalidFlag`] for a malformed flag.
    pub fn new<I, S>(flags: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let flags = flags
            .into_iter()
            .map(|raw| Flag::parse(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if flags.is_empty() {
            return Err(ConfigError::EmptyFlags);
        }
        Ok(Self::from_flags(flags))
    }

    pub(crate) fn from_flags(flags: Vec<Flag>) -> Self {
        Self {
            flags,
            required: false,
            description: None,
            parameter: None,
        }
    }

    /// Marks the option as mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Enables parameters, replacing any previous contract.
    pub fn with_parameter(mut self, contract: ParameterContract) -> Self {
        self.parameter = Some(contract);
        self
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// The first declared flag, used to name the option in messages.
    pub fn primary_flag(&self) -> &Flag {
        // `new` rejects empty flag lists.
        &self.flags[0]
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parameter(&self) -> Option<&ParameterContract> {
        self.parameter.as_ref()
    }

    /// Declared parameter count; 0 for options without a contract.
    pub fn arity(&self) -> usize {
        self.parameter.as_ref().map_or(0, ParameterContract::arity)
    }

    /// Returns `true` when `flag` is one of this option's aliases.
    pub fn matches(&self, flag: &Flag) -> bool {
        self.flags.contains(flag)
    }
}

/// Coerced parameters of a supplied option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parameter {
    /// Arity 1.
    Single(Value),
    /// Arity > 1, in input order.
    List(Vec<Value>),
}

impl Parameter {
    /// All values as a slice; a single value yields a one-element slice.
    pub fn values(&self) -> &[Value] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind_coercion() {
        assert_eq!(ValueKind::Integer.coerce("-50"), Ok(Value::Integer(-50)));
        assert!(ValueKind::Integer.coerce("abc").is_err());
        assert_eq!(ValueKind::Float.coerce("2.5"), Ok(Value::Float(2.5)));
        assert_eq!(ValueKind::Bool.coerce("YES"), Ok(Value::Bool(true)));
        assert_eq!(ValueKind::Bool.coerce("0"), Ok(Value::Bool(false)));
        assert!(ValueKind::Bool.coerce("maybe").is_err());
        assert_eq!(ValueKind::Text.coerce(""), Ok(Value::Text(String::new())));
    }

    #[test]
    fn test_contract_defaults() {
        let contract = ParameterContract::default();
        assert_eq!(contract.arity(), 1);
        assert!(!contract.is_required());
        assert_eq!(contract.kind(), Some(ValueKind::Text));
        assert!(contract.placeholder().is_none());
        assert!(contract.accepts(&Value::from("anything")));
    }

    #[test]
    fn test_custom_coercion_clears_kind() {
        let contract = ParameterContract::new().with_coercion(|raw| {
            if raw == "token" {
                Ok(Value::from(raw))
            } else {
                Err("not a token".to_string())
            }
        });
        assert_eq!(contract.kind(), None);
        assert_eq!(contract.convert("token"), Ok(Value::from("token")));
        assert!(contract.convert("other").is_err());
    }

    #[test]
    fn test_spec_rejects_empty_and_malformed_flags() {
        let empty: [&str; 0] = [];
        assert_eq!(OptionSpec::new(empty).unwrap_err(), ConfigError::EmptyFlags);
        assert_eq!(
            OptionSpec::new(["o", "bad flag"]).unwrap_err(),
            ConfigError::InvalidFlag("bad flag".to_string())
        );
    }

    #[test]
    fn test_spec_arity_without_contract_is_zero() {
        let spec = OptionSpec::new(["v", "verbose"]).unwrap();
        assert_eq!(spec.arity(), 0);
        assert!(spec.parameter().is_none());
        assert!(spec.matches(&Flag::Long("verbose".to_string())));
        assert!(!spec.matches(&Flag::Short('x')));
    }

    #[test]
    fn test_parameter_values_view() {
        let single = Parameter::Single(Value::from(4i64));
        assert_eq!(single.values(), &[Value::Integer(4)]);
        let list = Parameter::List(vec![Value::from(2i64), Value::from(4i64)]);
        assert_eq!(list.values().len(), 2);
    }

    #[test]
    fn test_parameter_serializes_untagged() {
        let list = Parameter::List(vec![Value::from(2i64), Value::from("x")]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"[2,"x"]"#);
        let single = Parameter::Single(Value::from(true));
        assert_eq!(serde_json::to_string(&single).unwrap(), "true");
    }
}
