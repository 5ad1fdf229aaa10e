//! Declarative option schemas.
//!
//! A schema file describes a program's options so that a parser can be built
//! without writing Rust code for every option.
//!
//! # Example YAML
//!
//! ```yaml
//! description: Calculate the sum or product
//! options:
//!   - flags: [s, sum]
//!     description: Returns the sum of x and y
//!     parameter:
//!       kind: integer
//!       count: 2
//!       required: true
//!       placeholder: [x, y]
//!       range: { min: 0, max: 100 }
//!   - flags: [m, mode]
//!     parameter:
//!       allowed: [fast, slow]
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use optparse_core::{OnError, OptionParser, OptionSpec, ParameterContract, Placeholder, ValueKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SchemaError};

fn default_count() -> usize {
    1
}

fn is_default_count(count: &usize) -> bool {
    *count == 1
}

/// Inclusive numeric bounds; either side may be left open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RangeEntry {
    pub fn contains(&self, n: f64) -> bool {
        self.min.is_none_or(|min| n >= min) && self.max.is_none_or(|max| n <= max)
    }
}

/// Parameter section of an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterEntry {
    /// Value kind every parameter is coerced to.
    #[serde(default)]
    pub kind: ValueKind,
    /// Number of parameters.
    #[serde(default = "default_count", skip_serializing_if = "is_default_count")]
    pub count: usize,
    /// Whether parameters must be supplied with the option.
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
    /// Bounds for numeric kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeEntry>,
    /// Accepted values, compared on the coerced value's text form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

impl Default for ParameterEntry {
    fn default() -> Self {
        Self {
            kind: ValueKind::default(),
            count: default_count(),
            required: false,
            placeholder: None,
            range: None,
            allowed: Vec::new(),
        }
    }
}

impl ParameterEntry {
    fn to_contract(&self, option: &str) -> Result<ParameterContract> {
        let mut contract = ParameterContract::of_kind(self.kind).count(self.count);
        if self.required {
            contract = contract.required();
        }
        if let Some(placeholder) = &self.placeholder {
            contract = contract.with_placeholder(placeholder.clone());
        }

        let range = match self.range {
            Some(range) => Some(self.checked_range(range, option)?),
            None => None,
        };
        if range.is_some() || !self.allowed.is_empty() {
            let allowed = self.allowed.clone();
            contract = contract.with_validator(move |value| {
                let in_range = range.is_none_or(|range| value.as_f64().is_some_and(|n| range.contains(n)));
                let listed = allowed.is_empty() || allowed.contains(&value.to_string());
                in_range && listed
            });
        }
        Ok(contract)
    }

    fn checked_range(&self, range: RangeEntry, option: &str) -> Result<RangeEntry> {
        let invalid = |reason: &str| SchemaError::InvalidRange {
            option: option.to_string(),
            reason: reason.to_string(),
        };
        if !self.kind.is_numeric() {
            return Err(invalid("range requires a numeric kind"));
        }
        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > max {
                return Err(invalid("min is greater than max"));
            }
        }
        Ok(range)
    }
}

/// One option of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionEntry {
    /// Bare flags; the first one names the option in messages.
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the option itself is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Omitted for options that take no parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<ParameterEntry>,
}

impl OptionEntry {
    /// Builds the option's [`OptionSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](SchemaError::ConfigError) for bad flags and
    /// [`InvalidRange`](SchemaError::InvalidRange) for an unusable range.
    pub fn to_spec(&self) -> Result<OptionSpec> {
        let mut spec = OptionSpec::new(&self.flags)?;
        if self.required {
            spec = spec.required();
        }
        if let Some(description) = &self.description {
            spec = spec.with_description(description);
        }
        if let Some(parameter) = &self.parameter {
            let option = spec.primary_flag().to_string();
            spec = spec.with_parameter(parameter.to_contract(&option)?);
        }
        Ok(spec)
    }
}

/// A program's option schema.
///
/// # Examples
///
/// ```
/// use optparse_schema::SchemaFile;
///
/// let schema = SchemaFile::from_yaml_str(
///     r#"
/// description: Greets someone
/// options:
///   - flags: [n, name]
///     required: true
///     parameter: { required: true, placeholder: NAME }
/// "#,
/// )
/// .unwrap();
///
/// let parser = schema.build_parser().unwrap();
/// let name = parser.registry().find("--name").unwrap();
/// let result = parser.parse_from(&["-n", "ada"]).unwrap();
/// assert_eq!(result.get_value(name).unwrap().as_str(), Some("ada"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Program description shown at the top of the help page.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl SchemaFile {
    /// Loads a schema file; `.json` files are read as JSON, anything else as
    /// YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](SchemaError::IoError) if the file cannot be read,
    /// or [`JsonError`](SchemaError::JsonError) /
    /// [`YamlError`](SchemaError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let schema: Self = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        debug!(path = %path.display(), options = schema.options.len(), "Loaded schema");
        Ok(schema)
    }

    /// Saves the schema, picking the format from the extension as
    /// [`load`](Self::load) does.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a parser that returns errors to the caller
    /// ([`OnError::Return`]).
    ///
    /// # Errors
    ///
    /// The first option that cannot be declared or registered.
    pub fn build_parser(&self) -> Result<OptionParser> {
        let mut parser = OptionParser::new(self.description.as_str()).on_error(OnError::Return);
        for entry in &self.options {
            parser.add_option(entry.to_spec()?)?;
        }
        Ok(parser)
    }

    /// Consuming form of [`build_parser`](Self::build_parser).
    pub fn into_parser(self) -> Result<OptionParser> {
        self.build_parser()
    }
}
