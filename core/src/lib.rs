//! Declarative command-line option parsing.
//!
//! Programs declare their options up front and hand the raw argument list
//! to a parser, which returns either a typed result or the first error found:
//!
//! - [`OptionSpec`]: one option with aliased flags, requiredness, a description
//!   and an optional [`ParameterContract`] (count, type, placeholder,
//!   validator).
//! - [`OptionRegistry`]: the registered options, addressed by [`OptionId`].
//!   All configuration checks happen on registration.
//! - [`tokenizer`]: bundle expansion, the single-pass scan and recovery of
//!   trailing positional arguments swallowed by the last short option.
//! - [`parse_tokens`]: the full pipeline, yielding a [`ResultSet`].
//! - [`OptionParser`]: the usual entry point, adding `-h/--help`, a help
//!   page ([`help::render`]) and an [`OnError`] policy.
//!
//! # Example
//!
//! ```
//! use optparse_core::*;
//!
//! let mut parser = OptionParser::new("Calculate the sum or product").on_error(OnError::Return);
//! let product = parser
//!     .add_option(
//!         OptionSpec::new(["p", "product"])
//!             .unwrap()
//!             .with_description("Returns the product of x and y")
//!             .with_parameter(
//!                 ParameterContract::of_kind(ValueKind::Integer)
//!                     .count(2)
//!                     .required()
//!                     .with_placeholder(["x", "y"]),
//!             ),
//!     )
//!     .unwrap();
//!
//! let result = parser.parse_from(&["--product=3,5", "notes"]).unwrap();
//! let values = result.get_values(product).unwrap();
//! assert_eq!(values, [Value::Integer(3), Value::Integer(5)]);
//! assert_eq!(result.positional_arguments(), ["notes"]);
//!
//! let err = parser.parse_from(&["-p", "3", "five"]).unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::Parameter);
//! ```

mod coerce;
mod error;
mod flag;
pub mod help;
mod parser;
mod registry;
mod result;
mod spec;
pub mod tokenizer;
mod validate;

pub use coerce::coerce;
pub use error::{ConfigError, ErrorCategory, ParseError};
pub use flag::{DELIMITER, Flag};
pub use parser::{OnError, OptionParser, ParseOutcome};
pub use registry::{OptionId, OptionRegistry};
pub use result::{ParsedOption, ResultSet};
pub use spec::{
    CoerceFn, OptionSpec, Parameter, ParameterContract, Placeholder, ValidatorFn, Value, ValueKind,
};
pub use validate::{check_required, parse_tokens, resolve};
