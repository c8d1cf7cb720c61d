//! Parser configuration validation.
//!
//! Catches structural errors in a [`ParserConfig`] (unnamed options,
//! malformed or reserved names, name collisions, duplicate subcommands)
//! before any tokens are scanned.
//!
//! # Examples
//!
//! ```
//! use argument_parser_core::{ParserConfig, validate_config};
//!
//! let config = ParserConfig::from_yaml_str(
//!     "options:\n  - { short: v, long: verbose, type: bool }\n",
//! )
//! .unwrap();
//! assert!(validate_config(&config).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::config::{OptionConfig, ParserConfig};

const RESERVED_SHORT: char = 'h';
const RESERVED_LONG: &str = "help";

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An option has neither a short nor a long name.
    #[error("option must define short or long name")]
    MissingOptionName,
    /// Short name is a dash or whitespace.
    #[error("invalid short name: {0:?}")]
    InvalidShortName(char),
    /// Long name is empty, starts with a dash, or contains whitespace.
    #[error("invalid long name: {0:?}")]
    InvalidLongName(String),
    /// `h` and `help` always classify as the help token.
    #[error("reserved option name: {0}")]
    ReservedName(String),
    /// Two options in the same scope share a name.
    #[error("duplicate option name in scope: {0}")]
    DuplicateOptionName(String),
    /// A subcommand has an empty command string.
    #[error("subcommand command cannot be empty")]
    EmptyCommand,
    /// Two subcommands share a command string.
    #[error("duplicate subcommand: {0}")]
    DuplicateSubcommand(String),
}

/// Validates a parser configuration.
///
/// Stops at the first problem found, so the result holds at most one error.
pub fn validate_config(config: &ParserConfig) -> Vec<ValidationError> {
    let mut errors = validate_options(&config.options);
    if !errors.is_empty() {
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for sub in &config.subcommands {
        let command = sub.command.trim();
        if command.is_empty() {
            errors.push(ValidationError::EmptyCommand);
            return errors;
        }
        if !seen.insert(command) {
            errors.push(ValidationError::DuplicateSubcommand(command.to_string()));
            return errors;
        }

        errors.extend(validate_options(&sub.options));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_options(options: &[OptionConfig]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for option in options {
        if option.short.is_none() && option.long.is_none() {
            errors.push(ValidationError::MissingOptionName);
            return errors;
        }

        if let Some(short) = option.short {
            if short == '-' || short.is_whitespace() {
                errors.push(ValidationError::InvalidShortName(short));
                return errors;
            }
            if short == RESERVED_SHORT {
                errors.push(ValidationError::ReservedName(short.to_string()));
                return errors;
            }
            if !seen.insert(short.to_string()) {
                errors.push(ValidationError::DuplicateOptionName(short.to_string()));
                return errors;
            }
        }

        if let Some(long) = &option.long {
            if long.is_empty() || long.starts_with('-') || long.contains(char::is_whitespace) {
                errors.push(ValidationError::InvalidLongName(long.clone()));
                return errors;
            }
            if long == RESERVED_LONG {
                errors.push(ValidationError::ReservedName(long.clone()));
                return errors;
            }
            if !seen.insert(long.clone()) {
                errors.push(ValidationError::DuplicateOptionName(long.clone()));
                return errors;
            }
        }
    }

    errors
}
