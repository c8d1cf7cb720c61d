//! Command-line argument parsing onto caller-owned storage.
//!
//! This crate maps a flat sequence of argument tokens to typed values:
//!
//! - [`OptionSpec`] — a named option (short `-x` and/or long `--name`) bound
//!   to a variable the caller owns, through a typed [`Binding`].
//! - [`OptionRegistry`] — resolves names to descriptors and rejects name
//!   collisions.
//! - [`Token`] — classifies one token as a name cluster, a value, `--`, or
//!   a help request.
//! - [`ArgumentParser`] — the scanner/binder, with one hop of subcommand
//!   dispatch through the [`Subcommand`] trait.
//!
//! For parsers described as data rather than code, [`ParserConfig`] loads a
//! YAML or JSON option set and [`ConfiguredParser`] parses against it with
//! its own storage.
//!
//! # Example
//!
//! ```
//! use argument_parser_core::*;
//!
//! let (mut level, mut name, mut force, mut files) = (0, String::new(), false, Vec::new());
//! let mut parser = ArgumentParser::new()
//!     .with_option(OptionSpec::int(Some('l'), Some("level"), &mut level))
//!     .with_option(OptionSpec::string(None, Some("name"), &mut name).with_usage("Run name"))
//!     .with_option(OptionSpec::bool(Some('f'), Some("force"), &mut force))
//!     .with_option(OptionSpec::strings(Some('i'), Some("input"), &mut files));
//!
//! parser
//!     .parse_args(&["-l", "3", "--name", "nightly", "-f", "-i", "a.txt", "b.txt"])
//!     .unwrap();
//! drop(parser);
//!
//! assert_eq!(level, 3);
//! assert_eq!(name, "nightly");
//! assert!(force);
//! assert_eq!(files, vec!["a.txt", "b.txt"]);
//! ```

mod config;
mod error;
mod option;
mod parser;
mod registry;
mod token;
mod validate;

pub use config::{
    ConfiguredParser, OptionConfig, OptionType, ParseReport, ParserConfig, SubcommandConfig,
    ValueStore,
};
pub use error::{ConfigError, ErrorKind, ParseError, Result};
pub use option::{Binding, Nargs, OptionSpec};
pub use parser::{ArgumentParser, Subcommand};
pub use registry::OptionRegistry;
pub use token::{Token, argument_names};
pub use validate::{ValidationError, validate_config};
