//! High-level parser with help handling and an error policy.

use std::process;

use tracing::debug;

use crate::error::{ConfigError, ParseError};
use crate::flag::{self, Flag, Token};
use crate::help;
use crate::registry::{OptionId, OptionRegistry};
use crate::result::ResultSet;
use crate::spec::OptionSpec;
use crate::tokenizer;
use crate::validate::parse_tokens;

const HELP_DESCRIPTION: &str = "Prints this help message and exits.";

/// What [`OptionParser::parse_from`] does with a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnError {
    /// Print `Error: <message>` and the help page to stderr, exit with status 1.
    #[default]
    Exit,
    /// Hand the error back to the caller.
    Return,
}

/// Result of [`OptionParser::try_parse_from`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(ResultSet),
    /// `-h` or `--help` was given; holds the rendered help page.
    Help(String),
}

/// Option parser for one program.
///
/// Owns the program description and the registered options. The help
/// option (`-h`, `--help`) is registered on construction.
///
/// # Examples
///
/// ```
/// use optparse_core::{OnError, OptionParser, OptionSpec, ParameterContract, ParseOutcome, ValueKind};
///
/// let mut parser = OptionParser::new("Calculate the sum or product").on_error(OnError::Return);
/// let sum = parser
///     .add_option(
///         OptionSpec::new(["s", "sum"])
///             .unwrap()
///             .with_description("Returns the sum of x and y")
///             .with_parameter(ParameterContract::of_kind(ValueKind::Integer).count(2).required()),
///     )
///     .unwrap();
///
/// let ParseOutcome::Parsed(result) = parser.try_parse_from(&["-s", "2", "4"]).unwrap() else {
///     panic!("expected a parse result");
/// };
/// let total: i64 = result.get_values(sum).unwrap().iter().filter_map(|v| v.as_i64()).sum();
/// assert_eq!(total, 6);
///
/// assert!(matches!(parser.try_parse_from(&["-s", "1", "-h"]), Ok(ParseOutcome::Help(_))));
/// ```
#[derive(Debug, Clone)]
pub struct OptionParser {
    description: String,
    registry: OptionRegistry,
    help_id: OptionId,
    on_error: OnError,
}

impl OptionParser {
    pub fn new(description: impl Into<String>) -> Self {
        let mut registry = OptionRegistry::new();
        let help_id = registry.insert(
            OptionSpec::from_flags(vec![Flag::Short('h'), Flag::Long("help".to_string())])
                .with_description(HELP_DESCRIPTION),
        );
        Self {
            description: description.into(),
            registry,
            help_id,
            on_error: OnError::default(),
        }
    }

    /// Sets the error policy used by [`parse_from`](Self::parse_from).
    pub fn on_error(mut self, policy: OnError) -> Self {
        self.on_error = policy;
        self
    }

    /// Registers an option.
    ///
    /// # Errors
    ///
    /// See [`OptionRegistry::add`]. The flags `h` and `help` are taken.
    pub fn add_option(&mut self, spec: OptionSpec) -> Result<OptionId, ConfigError> {
        self.registry.add(spec)
    }

    /// Registers several options, stopping at the first error.
    pub fn add_options(
        &mut self,
        specs: impl IntoIterator<Item = OptionSpec>,
    ) -> Result<Vec<OptionId>, ConfigError> {
        specs
            .into_iter()
            .map(|spec| self.add_option(spec))
            .collect()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Id of the built-in help option.
    pub fn help_option(&self) -> OptionId {
        self.help_id
    }

    /// Renders the help page; the help option is listed last.
    pub fn help(&self) -> String {
        let options = self
            .registry
            .iter()
            .filter(|(id, _)| *id != self.help_id)
            .map(|(_, spec)| spec)
            .chain(std::iter::once(&self.registry[self.help_id]));
        help::render(&self.description, options)
    }

    /// Parses `tokens` without printing or exiting.
    ///
    /// A help flag before the delimiter wins over everything else, including
    /// errors elsewhere on the command line.
    ///
    /// # Errors
    ///
    /// The first [`ParseError`] found.
    pub fn try_parse_from<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome, ParseError> {
        if wants_help(tokens) {
            debug!("Help requested");
            return Ok(ParseOutcome::Help(self.help()));
        }
        parse_tokens(&self.registry, tokens).map(ParseOutcome::Parsed)
    }

    /// Parses `tokens`, printing the help page and exiting with status 0
    /// when help is requested. Errors follow the [`OnError`] policy.
    pub fn parse_from<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ResultSet, ParseError> {
        match self.try_parse_from(tokens) {
            Ok(ParseOutcome::Parsed(result)) => Ok(result),
            Ok(ParseOutcome::Help(page)) => {
                print!("{page}");
                process::exit(0);
            }
            Err(err) => match self.on_error {
                OnError::Return => Err(err),
                OnError::Exit => {
                    eprintln!("Error: {err}\n");
                    eprint!("{}", self.help());
                    process::exit(1);
                }
            },
        }
    }

    /// Parses the process arguments, without the program name.
    pub fn parse(&self) -> Result<ResultSet, ParseError> {
        let tokens: Vec<String> = std::env::args().skip(1).collect();
        self.parse_from(&tokens)
    }
}

fn wants_help<S: AsRef<str>>(tokens: &[S]) -> bool {
    tokenizer::expand_bundles(tokens)
        .iter()
        .map(|token| flag::classify(token))
        .take_while(|token| *token != Token::Delimiter)
        .any(|token| match token {
            Token::Short(c) => c == 'h',
            Token::Long { written, .. } => written == "--help",
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ParameterContract;

    fn parser() -> OptionParser {
        let mut parser = OptionParser::new("Greets someone").on_error(OnError::Return);
        parser
            .add_option(
                OptionSpec::new(["n", "name"])
                    .unwrap()
                    .required()
                    .with_description("Your name")
                    .with_parameter(ParameterContract::new().required().with_placeholder("NAME")),
            )
            .unwrap();
        parser
    }

    #[test]
    fn test_help_option_is_reserved() {
        let mut parser = OptionParser::new("");
        for flags in [["h"], ["help"]] {
            assert!(matches!(
                parser.add_option(OptionSpec::new(flags).unwrap()),
                Err(ConfigError::DuplicateFlag(_))
            ));
        }
    }

    #[test]
    fn test_help_wins_over_errors() {
        let parser = parser();
        for tokens in [&["-h"][..], &["--help"], &["--bogus", "-h"], &["-xh"]] {
            assert!(
                matches!(parser.try_parse_from(tokens), Ok(ParseOutcome::Help(_))),
                "{tokens:?}"
            );
        }
    }

    #[test]
    fn test_help_after_delimiter_is_positional() {
        let parser = parser();
        let outcome = parser.try_parse_from(&["-n", "ada", "--", "-h"]).unwrap();
        let ParseOutcome::Parsed(result) = outcome else {
            panic!("expected parsed outcome");
        };
        assert_eq!(result.positional_arguments(), ["-h"]);
    }

    #[test]
    fn test_help_page_lists_help_option_last() {
        let page = parser().help();
        assert!(page.starts_with("Greets someone\n\nOptions:\n"));
        let name = page.find("--name=NAME").unwrap();
        let help = page.find("-h, --help").unwrap();
        let delimiter = page.find("Terminate option list.").unwrap();
        assert!(name < help && help < delimiter);
        assert!(page.contains("Your name (required)"));
    }

    #[test]
    fn test_return_policy_hands_back_errors() {
        let err = parser().parse_from(&["--unknown"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnrecognizedOption {
                flag: "--unknown".to_string()
            }
        );
    }

    #[test]
    fn test_add_options_returns_ids_in_order() {
        let mut parser = OptionParser::new("");
        let ids = parser
            .add_options([
                OptionSpec::new(["a"]).unwrap(),
                OptionSpec::new(["b"]).unwrap(),
            ])
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);
        assert_ne!(ids[0], parser.help_option());
    }
}
