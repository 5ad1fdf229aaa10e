use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use optparse_core::{OptionParser, Parameter, ParseOutcome, ResultSet};
use optparse_schema::SchemaFile;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Output format for parse results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "optparse", version)]
#[command(about = "Parse argument lists against option schema files")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Log pipeline details to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments against a schema and print the result.
    Parse(ParseArgs),
    /// Print the help page a schema produces.
    Help(SchemaArgs),
    /// Check that a schema declares a valid set of options.
    Check(SchemaArgs),
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Schema file (`.json` is read as JSON, anything else as YAML).
    #[arg(long)]
    schema: PathBuf,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Arguments to parse, given after `--`.
    #[arg(last = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Help(args) => run_help(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_parser(args: &SchemaArgs) -> Result<OptionParser, String> {
    SchemaFile::load(&args.schema)
        .and_then(SchemaFile::into_parser)
        .map_err(|e| format!("{}: {e}", args.schema.display()))
}

// ---------------------------------------------------------------------------
// parse command
// ---------------------------------------------------------------------------

/// Serializable view of a [`ResultSet`], keyed by each option's primary flag.
#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    options: BTreeMap<String, Option<&'a Parameter>>,
    positional: &'a [String],
}

impl<'a> ParseReport<'a> {
    fn new(parser: &OptionParser, result: &'a ResultSet) -> Self {
        let options = result
            .iter()
            .map(|(id, parameter)| (parser.registry()[id].primary_flag().to_string(), parameter))
            .collect();
        Self {
            options,
            positional: result.positional_arguments(),
        }
    }
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let parser = load_parser(&args.schema)?;
    debug!(tokens = ?args.args, "Parsing arguments");

    let result = match parser.try_parse_from(&args.args).map_err(|e| e.to_string())? {
        ParseOutcome::Help(page) => {
            print!("{page}");
            return Ok(());
        }
        ParseOutcome::Parsed(result) => result,
    };

    let report = ParseReport::new(&parser, &result);
    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&report)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            print!("{yaml}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// help and check commands
// ---------------------------------------------------------------------------

fn run_help(args: SchemaArgs) -> Result<(), String> {
    let parser = load_parser(&args)?;
    print!("{}", parser.help());
    Ok(())
}

fn run_check(args: SchemaArgs) -> Result<(), String> {
    let parser = load_parser(&args)?;
    // The built-in help option is not counted.
    let declared = parser.registry().len() - 1;
    let required = parser.registry().required().count();
    println!(
        "Validated {} with {declared} option(s), {required} required.",
        args.schema.display()
    );
    Ok(())
}
