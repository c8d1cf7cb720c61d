//! Error types for argument parsing.
//!
//! Every failure aborts the parse call that produced it. Variants carry the
//! offending name, value, or path so a failure can be diagnosed without
//! re-running, and the two context wrappers ([`ParseError::Subcommand`] and
//! [`ParseError::Arguments`]) record where in the parser tree it happened.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur while building a registry or scanning arguments.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Two descriptors claim the same short or long name.
    #[error("multiple options with same name: {0}")]
    DuplicateName(String),

    /// An argument references a name that no descriptor claims.
    #[error("name not found: {0}")]
    NameNotFound(String),

    /// A value-taking option was left open without receiving a value.
    #[error("unset option: {0}")]
    UnsetOption(String),

    /// A bare value appeared while no option was open to receive it.
    #[error("no current option for value '{0}'")]
    NoCurrentOption(String),

    /// The descriptor's storage cell was never supplied.
    #[error("nil value for option {0}")]
    NilValue(String),

    /// A value-taking option was named inside a short-option cluster.
    #[error("non-zero arg combined option: {0}")]
    NonZeroArgCombinedOption(String),

    /// A value could not be converted to the descriptor's target type.
    #[error("invalid value '{value}' for option {name}: {source}")]
    Conversion {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A file option failed to open its path.
    #[error("failed to open '{path}' for option {name}: {source}")]
    Io {
        name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A required option never received a value.
    #[error("missing required option: {0}")]
    MissingRequired(String),

    /// A delegated subcommand failed.
    #[error("subcommand '{command}' parse args {args:?}: {source}")]
    Subcommand {
        command: String,
        args: Vec<String>,
        #[source]
        source: Box<ParseError>,
    },

    /// Parsing the process arguments failed.
    #[error("parse args {args:?}: {source}")]
    Arguments {
        args: Vec<String>,
        #[source]
        source: Box<ParseError>,
    },
}

/// Root cause of a [`ParseError`], with context wrappers stripped.
///
/// # Examples
///
/// ```
/// use argument_parser_core::{ArgumentParser, ErrorKind, OptionSpec};
///
/// let mut n = 0;
/// let mut parser = ArgumentParser::new().with_option(OptionSpec::int(Some('n'), None, &mut n));
/// let err = parser.parse_args(&["-n"]).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnsetOption);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicateName,
    NameNotFound,
    UnsetOption,
    NoCurrentOption,
    NilValue,
    NonZeroArgCombinedOption,
    Conversion,
    Io,
    MissingRequired,
}

impl ParseError {
    /// Returns the root cause, looking through subcommand and argument-list
    /// context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateName(_) => ErrorKind::DuplicateName,
            Self::NameNotFound(_) => ErrorKind::NameNotFound,
            Self::UnsetOption(_) => ErrorKind::UnsetOption,
            Self::NoCurrentOption(_) => ErrorKind::NoCurrentOption,
            Self::NilValue(_) => ErrorKind::NilValue,
            Self::NonZeroArgCombinedOption(_) => ErrorKind::NonZeroArgCombinedOption,
            Self::Conversion { .. } => ErrorKind::Conversion,
            Self::Io { .. } => ErrorKind::Io,
            Self::MissingRequired(_) => ErrorKind::MissingRequired,
            Self::Subcommand { source, .. } | Self::Arguments { source, .. } => source.kind(),
        }
    }
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while loading a [`ParserConfig`](crate::ParserConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The configuration parsed but describes an invalid option set.
    #[error("invalid config: {0}")]
    Invalid(#[from] crate::validate::ValidationError),
}
