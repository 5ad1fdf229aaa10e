//! Option schemas stored as YAML or JSON files.
//!
//! A [`SchemaFile`] lists a program's description and options; loading one
//! and calling [`SchemaFile::build_parser`] yields a ready
//! [`OptionParser`](optparse_core::OptionParser) that returns its errors to
//! the caller.
//!
//! # Quick start
//!
//! ```no_run
//! use optparse_schema::SchemaFile;
//!
//! let parser = SchemaFile::load("calc.yaml").unwrap().into_parser().unwrap();
//! match parser.parse_from(&["--sum=2,4"]) {
//!     Ok(result) => println!("{} option(s) set", result.count()),
//!     Err(err) => eprintln!("error: {err}"),
//! }
//! ```

mod error;
mod schema;

pub use error::{Result, SchemaError};
pub use schema::{OptionEntry, ParameterEntry, RangeEntry, SchemaFile};
