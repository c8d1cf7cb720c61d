//! The argument scanner and binder.
//!
//! [`ArgumentParser`] walks the tokens left to right and keeps track of at
//! most one open option awaiting a value. Name tokens open options (or set
//! flags immediately); value tokens are bound to the open option through its
//! [`OptionSpec::set`] contract. A parser with child parsers first checks
//! whether the leading token selects one of them and, if so, hands over all
//! remaining tokens.
//!
//! # Examples
//!
//! ```
//! use argument_parser_core::{ArgumentParser, OptionSpec};
//!
//! let (mut jobs, mut verbose, mut targets) = (1, false, Vec::new());
//! let mut parser = ArgumentParser::new()
//!     .with_option(OptionSpec::int(Some('j'), Some("jobs"), &mut jobs))
//!     .with_option(OptionSpec::bool(Some('v'), Some("verbose"), &mut verbose))
//!     .with_option(OptionSpec::strings(Some('t'), Some("target"), &mut targets));
//!
//! parser.parse_args(&["-v", "--jobs", "4", "-t", "x86", "arm"]).unwrap();
//! drop(parser);
//!
//! assert_eq!(jobs, 4);
//! assert!(verbose);
//! assert_eq!(targets, vec!["x86", "arm"]);
//! ```

use std::fmt;

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::option::OptionSpec;
use crate::registry::OptionRegistry;
use crate::token::Token;

/// A parser selectable by a leading command token.
///
/// [`ArgumentParser`] implements this, so child parsers are usually built
/// with [`ArgumentParser::subcommand`]. Custom implementations can route the
/// delegated tokens anywhere.
pub trait Subcommand {
    /// The command string matched exactly against the first token.
    fn command(&self) -> &str;

    /// Parses the tokens that follow the command string.
    fn parse_args(&mut self, args: &[&str]) -> Result<()>;
}

/// Scan state for one parse call.
#[derive(Debug)]
enum ScanState {
    Idle,
    AwaitingValue {
        index: usize,
        name: String,
        satisfied: bool,
    },
}

/// Option descriptors plus optional one-hop subcommand dispatch.
#[derive(Default)]
pub struct ArgumentParser<'a> {
    command: Option<String>,
    options: Vec<OptionSpec<'a>>,
    subcommands: Vec<Box<dyn Subcommand + 'a>>,
    enforce_required: bool,
}

impl<'a> ArgumentParser<'a> {
    /// Creates a top-level parser with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a child parser selected by `command`.
    pub fn subcommand(command: &str) -> Self {
        Self {
            command: Some(command.to_string()),
            ..Self::default()
        }
    }

    /// Adds an option descriptor.
    pub fn with_option(mut self, option: OptionSpec<'a>) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a child parser.
    pub fn with_subcommand(mut self, parser: impl Subcommand + 'a) -> Self {
        self.subcommands.push(Box::new(parser));
        self
    }

    /// Fails a completed scan with [`ParseError::MissingRequired`] when a
    /// required option never received a value. Off by default.
    pub fn enforce_required(mut self, enforce: bool) -> Self {
        self.enforce_required = enforce;
        self
    }

    pub fn add_option(&mut self, option: OptionSpec<'a>) {
        self.options.push(option);
    }

    pub fn add_subcommand(&mut self, parser: impl Subcommand + 'a) {
        self.subcommands.push(Box::new(parser));
    }

    /// Command strings of the child parsers, in registration order.
    pub fn subcommand_names(&self) -> Vec<&str> {
        self.subcommands.iter().map(|s| s.command()).collect()
    }

    /// Parses the current process arguments.
    ///
    /// # Errors
    ///
    /// Any scan failure, wrapped in [`ParseError::Arguments`].
    pub fn parse(&mut self) -> Result<()> {
        self.parse_argv(std::env::args())
    }

    /// Parses a full `argv` whose first item is the program name.
    ///
    /// Does nothing when no arguments follow the program name.
    pub fn parse_argv<I, S>(&mut self, argv: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = argv
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();
        if args.is_empty() {
            return Ok(());
        }

        let tokens: Vec<&str> = args.iter().map(String::as_str).collect();
        self.parse_args(&tokens)
            .map_err(|source| ParseError::Arguments {
                args,
                source: Box::new(source),
            })
    }

    /// Parses any sequence of string-like tokens.
    pub fn parse_from<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let tokens: Vec<&str> = args.iter().map(|s| s.as_ref()).collect();
        self.parse_args(&tokens)
    }

    /// Parses an explicit token sequence.
    ///
    /// # Errors
    ///
    /// The first failure aborts the scan; values bound before it stay
    /// written. See [`ParseError`] for the taxonomy.
    pub fn parse_args(&mut self, args: &[&str]) -> Result<()> {
        if let Some((&first, rest)) = args.split_first() {
            if let Some(child) = self.subcommands.iter_mut().find(|s| s.command() == first) {
                debug!(command = first, args = ?rest, "Delegating to subcommand");
                return child
                    .parse_args(rest)
                    .map_err(|source| ParseError::Subcommand {
                        command: first.to_string(),
                        args: rest.iter().map(|s| s.to_string()).collect(),
                        source: Box::new(source),
                    });
            }
        }

        let registry = OptionRegistry::build(&self.options)?;
        debug!(names = registry.len(), "Built option registry");

        let mut state = ScanState::Idle;
        let mut bound = vec![false; self.options.len()];

        for &arg in args {
            match Token::classify(arg) {
                Token::Help => {
                    debug!(token = arg, "Help requested; no usage output is generated");
                }
                // Positional arguments after `--` are not collected.
                Token::Terminator => {
                    debug!("Terminator reached; remaining arguments ignored");
                    return Ok(());
                }
                Token::Names(names) => {
                    let clustered = names.len() > 1;
                    for name in names {
                        let index = registry
                            .resolve(&name)
                            .ok_or_else(|| ParseError::NameNotFound(name.clone()))?;

                        if let ScanState::AwaitingValue {
                            name: open,
                            satisfied: false,
                            ..
                        } = &state
                        {
                            return Err(ParseError::UnsetOption(open.clone()));
                        }

                        let option = &mut self.options[index];
                        if option.nargs().takes_value() {
                            if clustered {
                                return Err(ParseError::NonZeroArgCombinedOption(name));
                            }
                            state = ScanState::AwaitingValue {
                                index,
                                name,
                                satisfied: false,
                            };
                        } else {
                            option.set("")?;
                            bound[index] = true;
                            state = ScanState::Idle;
                        }
                    }
                }
                Token::Value(value) => {
                    let ScanState::AwaitingValue {
                        index, satisfied, ..
                    } = &mut state
                    else {
                        return Err(ParseError::NoCurrentOption(value.to_string()));
                    };
                    self.options[*index].set(value)?;
                    bound[*index] = true;
                    *satisfied = true;
                }
            }
        }

        if let ScanState::AwaitingValue {
            name,
            satisfied: false,
            ..
        } = state
        {
            return Err(ParseError::UnsetOption(name));
        }

        if self.enforce_required {
            if let Some((option, _)) = self
                .options
                .iter()
                .zip(&bound)
                .find(|(option, seen)| option.is_required() && !**seen)
            {
                return Err(ParseError::MissingRequired(option.display_name()));
            }
        }

        Ok(())
    }
}

impl Subcommand for ArgumentParser<'_> {
    fn command(&self) -> &str {
        self.command.as_deref().unwrap_or_default()
    }

    fn parse_args(&mut self, args: &[&str]) -> Result<()> {
        ArgumentParser::parse_args(self, args)
    }
}

impl fmt::Debug for ArgumentParser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentParser")
            .field("command", &self.command)
            .field("options", &self.options)
            .field("subcommands", &self.subcommand_names())
            .field("enforce_required", &self.enforce_required)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::option::Binding;

    #[derive(Debug, Default)]
    struct Values {
        int: i64,
        string: String,
        boolean: bool,
    }

    fn parse_basic(args: &[&str]) -> (Result<()>, Values) {
        let mut values = Values::default();
        let result = ArgumentParser::new()
            .with_option(OptionSpec::int(Some('i'), Some("int"), &mut values.int))
            .with_option(OptionSpec::string(Some('s'), Some("str"), &mut values.string))
            .with_option(OptionSpec::bool(Some('b'), Some("bool"), &mut values.boolean))
            .parse_args(args);
        (result, values)
    }

    #[test]
    fn test_full() {
        let (result, values) = parse_basic(&["-i", "42", "--str", "abc", "--bool"]);
        result.unwrap();
        assert_eq!(values.int, 42);
        assert_eq!(values.string, "abc");
        assert!(values.boolean);
    }

    #[test]
    fn test_multiple_same_last_wins() {
        let (result, values) = parse_basic(&["-i", "1", "-i", "2"]);
        result.unwrap();
        assert_eq!(values.int, 2);
    }

    #[test]
    fn test_repeated_values_overwrite_single() {
        let (result, values) = parse_basic(&["-s", "first", "second"]);
        result.unwrap();
        assert_eq!(values.string, "second");
    }

    #[test]
    fn test_unset_option_at_end() {
        let (result, _) = parse_basic(&["-i"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::UnsetOption);
    }

    #[test]
    fn test_unset_option_before_next_name() {
        let (result, values) = parse_basic(&["-i", "42", "--bool", "--int"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::UnsetOption);
        assert_eq!(values.int, 42);

        let (result, _) = parse_basic(&["--int", "--bool"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsetOption);
        assert!(err.to_string().contains("int"));
    }

    #[test]
    fn test_name_not_found() {
        let (result, _) = parse_basic(&["--unknown", "1"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NameNotFound);
    }

    #[test]
    fn test_no_current_option() {
        let (result, _) = parse_basic(&["stray"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NoCurrentOption);
    }

    #[test]
    fn test_flag_closes_open_option() {
        let (result, values) = parse_basic(&["-i", "1", "-b", "2"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NoCurrentOption);
        assert_eq!(values.int, 1);
    }

    #[test]
    fn test_conversion_error() {
        let (result, _) = parse_basic(&["-i", "forty-two"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Conversion);
    }

    #[test]
    fn test_non_zero_arg_combined_option() {
        let (mut i, mut p) = (0, 0);
        let err = ArgumentParser::new()
            .with_option(OptionSpec::int(Some('i'), Some("ii"), &mut i))
            .with_option(OptionSpec::int(Some('p'), Some("pp"), &mut p))
            .parse_args(&["-ip"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonZeroArgCombinedOption);
    }

    #[test]
    fn test_single_short_value_option_is_not_a_cluster() {
        let (result, values) = parse_basic(&["-s", "x"]);
        result.unwrap();
        assert_eq!(values.string, "x");
    }

    #[test]
    fn test_cluster_of_flags() {
        let (mut a, mut b, mut verbosity) = (false, false, 0);
        ArgumentParser::new()
            .with_option(OptionSpec::bool(Some('a'), None, &mut a))
            .with_option(OptionSpec::bool(Some('b'), None, &mut b))
            .with_option(OptionSpec::count(Some('v'), None, &mut verbosity))
            .parse_args(&["-avb", "-vv"])
            .unwrap();
        assert!(a && b);
        assert_eq!(verbosity, 3);
    }

    #[test]
    fn test_cluster_with_unknown_name() {
        let (result, _) = parse_basic(&["-bz"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NameNotFound);
    }

    #[test]
    fn test_terminator_stops_scan() {
        let (result, values) = parse_basic(&["-i", "3", "--", "--unknown", "value"]);
        result.unwrap();
        assert_eq!(values.int, 3);
    }

    #[test]
    fn test_terminator_skips_unset_check() {
        let (result, _) = parse_basic(&["-i", "--"]);
        result.unwrap();
    }

    #[test]
    fn test_help_is_inert() {
        let (result, values) = parse_basic(&["-h", "-i", "5", "--help"]);
        result.unwrap();
        assert_eq!(values.int, 5);
    }

    #[test]
    fn test_empty_args() {
        let (result, values) = parse_basic(&[]);
        result.unwrap();
        assert_eq!(values.int, 0);
    }

    #[test]
    fn test_duplicate_names_fail_before_scan() {
        let (mut a, mut b) = (0, 0);
        let err = ArgumentParser::new()
            .with_option(OptionSpec::int(Some('a'), Some("same"), &mut a))
            .with_option(OptionSpec::int(Some('b'), Some("same"), &mut b))
            .parse_args(&["-a", "1"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
        assert_eq!(a, 0);
    }

    #[test]
    fn test_duplicate_names_fail_on_empty_args() {
        let (mut a, mut b) = (0, 0);
        let err = ArgumentParser::new()
            .with_option(OptionSpec::int(Some('a'), None, &mut a))
            .with_option(OptionSpec::int(Some('a'), None, &mut b))
            .parse_args(&[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
    }

    #[test]
    fn test_nil_value() {
        let err = ArgumentParser::new()
            .with_option(OptionSpec::new(Some('i'), None, Binding::Int(None)))
            .parse_args(&["-i", "1"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NilValue);
    }

    #[test]
    fn test_required_not_enforced_by_default() {
        let mut name = String::new();
        ArgumentParser::new()
            .with_option(OptionSpec::string(Some('n'), Some("name"), &mut name).required())
            .parse_args(&[])
            .unwrap();
    }

    #[test]
    fn test_required_enforced() {
        let (mut name, mut verbose) = (String::new(), false);
        let err = ArgumentParser::new()
            .enforce_required(true)
            .with_option(OptionSpec::bool(Some('v'), None, &mut verbose))
            .with_option(OptionSpec::string(Some('n'), Some("name"), &mut name).required())
            .parse_args(&["-v"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequired);
        assert!(err.to_string().contains("--name"));

        let mut name = String::new();
        ArgumentParser::new()
            .enforce_required(true)
            .with_option(OptionSpec::string(Some('n'), Some("name"), &mut name).required())
            .parse_args(&["-n", "x"])
            .unwrap();
    }

    #[test]
    fn test_subcommand_delegation() {
        let (mut parent, mut child) = (0, 0);
        let mut parser = ArgumentParser::new()
            .with_option(OptionSpec::int(Some('i'), None, &mut parent))
            .with_subcommand(
                ArgumentParser::subcommand("build")
                    .with_option(OptionSpec::int(Some('i'), None, &mut child)),
            );
        assert_eq!(parser.subcommand_names(), vec!["build"]);
        parser.parse_args(&["build", "-i", "7"]).unwrap();
        drop(parser);
        assert_eq!(parent, 0);
        assert_eq!(child, 7);
    }

    #[test]
    fn test_subcommand_error_is_wrapped() {
        let mut child = 0;
        let err = ArgumentParser::new()
            .with_subcommand(
                ArgumentParser::subcommand("build")
                    .with_option(OptionSpec::int(Some('i'), None, &mut child)),
            )
            .parse_args(&["build", "-x"])
            .unwrap_err();
        assert!(matches!(err, ParseError::Subcommand { ref command, .. } if command == "build"));
        assert_eq!(err.kind(), ErrorKind::NameNotFound);
    }

    #[test]
    fn test_subcommand_only_matches_first_token() {
        let (mut parent, mut child) = (String::new(), 0);
        ArgumentParser::new()
            .with_option(OptionSpec::string(Some('s'), None, &mut parent))
            .with_subcommand(
                ArgumentParser::subcommand("build")
                    .with_option(OptionSpec::int(Some('i'), None, &mut child)),
            )
            .parse_args(&["-s", "build"])
            .unwrap();
        assert_eq!(parent, "build");
        assert_eq!(child, 0);
    }

    #[test]
    fn test_parse_argv_skips_program_name() {
        let (result, values) = {
            let mut values = Values::default();
            let result = ArgumentParser::new()
                .with_option(OptionSpec::int(Some('i'), None, &mut values.int))
                .parse_argv(["prog", "-i", "9"]);
            (result, values)
        };
        result.unwrap();
        assert_eq!(values.int, 9);
    }

    #[test]
    fn test_parse_argv_wraps_errors_with_arguments() {
        let mut int = 0;
        let err = ArgumentParser::new()
            .with_option(OptionSpec::int(Some('i'), None, &mut int))
            .parse_argv(["prog", "-q"])
            .unwrap_err();
        match &err {
            ParseError::Arguments { args, .. } => assert_eq!(args, &vec!["-q".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::NameNotFound);
    }

    #[test]
    fn test_parse_argv_program_name_only() {
        let mut int = 0;
        ArgumentParser::new()
            .with_option(OptionSpec::int(Some('i'), None, &mut int).required())
            .enforce_required(true)
            .parse_argv(["prog"])
            .unwrap();
    }

    #[test]
    fn test_parse_from_owned_strings() {
        let mut values = Vec::new();
        let args = vec!["-n".to_string(), "1".to_string(), "2".to_string()];
        ArgumentParser::new()
            .with_option(OptionSpec::ints(Some('n'), None, &mut values))
            .parse_from(args)
            .unwrap();
        assert_eq!(values, vec![1, 2]);
    }
}
