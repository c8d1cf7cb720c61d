//! Option descriptors and their value-binding contract.
//!
//! An [`OptionSpec`] names an option (short and/or long form) and pairs it
//! with a [`Binding`]: a typed, borrowed handle to storage owned by the
//! caller. The parser never owns option values; it writes through the
//! binding, and the caller reads its own variables once the parser is gone.
//!
//! # Examples
//!
//! ```
//! use argument_parser_core::{Nargs, OptionSpec};
//!
//! let mut port = 0;
//! let mut spec = OptionSpec::int(Some('p'), Some("port"), &mut port)
//!     .with_usage("Port to listen on");
//! assert_eq!(spec.nargs(), Nargs::One);
//! spec.set("8080").unwrap();
//! drop(spec);
//! assert_eq!(port, 8080);
//! ```

use std::fmt;
use std::fs::{File, OpenOptions};
use std::str::FromStr;

use tracing::debug;

use crate::error::{ParseError, Result};

/// How many value tokens an option consumes.
///
/// The textual forms follow the familiar `nargs` convention: `"0"` for a
/// flag, `""` for exactly one value, `"+"` for one or more.
///
/// # Examples
///
/// ```
/// use argument_parser_core::Nargs;
///
/// assert_eq!("+".parse::<Nargs>().unwrap(), Nargs::OneOrMore);
/// assert_eq!(Nargs::Zero.to_string(), "0");
/// assert_eq!(Nargs::default(), Nargs::One);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nargs {
    /// Flag only; the option never takes a value.
    Zero,
    /// Exactly one value. Repeated values overwrite.
    #[default]
    One,
    /// One or more values. Repeated values accumulate.
    OneOrMore,
}

impl Nargs {
    /// Returns `true` if the option needs at least one value token.
    pub fn takes_value(self) -> bool {
        self != Self::Zero
    }
}

impl fmt::Display for Nargs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("0"),
            Self::One => f.write_str(""),
            Self::OneOrMore => f.write_str("+"),
        }
    }
}

impl FromStr for Nargs {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Zero),
            "" => Ok(Self::One),
            "+" => Ok(Self::OneOrMore),
            other => Err(format!("unsupported nargs: {other:?}")),
        }
    }
}

/// Borrowed handle to the caller's storage for one option.
///
/// `None` inside a variant means no storage cell was supplied; binding a
/// value then fails with [`ParseError::NilValue`].
#[derive(Debug)]
pub enum Binding<'a> {
    /// Base-10 integer; each value overwrites.
    Int(Option<&'a mut i64>),
    /// Base-10 integers; each value is appended.
    Ints(Option<&'a mut Vec<i64>>),
    /// String; each value overwrites.
    String(Option<&'a mut String>),
    /// Strings; each value is appended.
    Strings(Option<&'a mut Vec<String>>),
    /// Flag; set to `true` whenever the name appears.
    Bool(Option<&'a mut bool>),
    /// Flag; incremented each time the name appears (`-vvv` counts 3).
    Count(Option<&'a mut u32>),
    /// Path opened with `options`; the handle replaces the previous one.
    File {
        file: Option<&'a mut Option<File>>,
        options: OpenOptions,
    },
}

impl Binding<'_> {
    /// Arity implied by the storage type.
    pub fn nargs(&self) -> Nargs {
        match self {
            Self::Bool(_) | Self::Count(_) => Nargs::Zero,
            Self::Ints(_) | Self::Strings(_) => Nargs::OneOrMore,
            Self::Int(_) | Self::String(_) | Self::File { .. } => Nargs::One,
        }
    }

    fn bind(&mut self, name: &str, token: &str) -> Result<()> {
        let nil = || ParseError::NilValue(name.to_string());

        match self {
            Self::Int(slot) => {
                let cell = slot.as_deref_mut().ok_or_else(nil)?;
                *cell = parse_int(name, token)?;
            }
            Self::Ints(slot) => {
                let cell = slot.as_deref_mut().ok_or_else(nil)?;
                cell.push(parse_int(name, token)?);
            }
            Self::String(slot) => {
                let cell = slot.as_deref_mut().ok_or_else(nil)?;
                *cell = token.to_string();
            }
            Self::Strings(slot) => {
                let cell = slot.as_deref_mut().ok_or_else(nil)?;
                cell.push(token.to_string());
            }
            Self::Bool(slot) => {
                let cell = slot.as_deref_mut().ok_or_else(nil)?;
                *cell = true;
            }
            Self::Count(slot) => {
                let cell = slot.as_deref_mut().ok_or_else(nil)?;
                *cell = cell.saturating_add(1);
            }
            Self::File { file, options } => {
                let cell = file.as_deref_mut().ok_or_else(nil)?;
                let opened = options.open(token).map_err(|source| ParseError::Io {
                    name: name.to_string(),
                    path: token.to_string(),
                    source,
                })?;
                *cell = Some(opened);
            }
        }

        Ok(())
    }
}

fn parse_int(name: &str, token: &str) -> Result<i64> {
    token.parse().map_err(|source| ParseError::Conversion {
        name: name.to_string(),
        value: token.to_string(),
        source,
    })
}

/// A named, typed option bound to caller storage.
///
/// Use the typed constructors ([`int`](OptionSpec::int),
/// [`strings`](OptionSpec::strings), [`bool`](OptionSpec::bool), ...) and
/// chain [`with_usage`](OptionSpec::with_usage) or
/// [`required`](OptionSpec::required). Empty long names are treated as
/// absent.
///
/// # Examples
///
/// ```
/// use argument_parser_core::{Nargs, OptionSpec};
///
/// let mut verbose = false;
/// let spec = OptionSpec::bool(Some('v'), Some("verbose"), &mut verbose);
/// assert_eq!(spec.nargs(), Nargs::Zero);
/// assert_eq!(spec.display_name(), "--verbose");
/// ```
#[derive(Debug)]
pub struct OptionSpec<'a> {
    short: Option<char>,
    long: Option<String>,
    usage: String,
    required: bool,
    binding: Binding<'a>,
}

impl<'a> OptionSpec<'a> {
    /// Creates a descriptor from an explicit binding.
    ///
    /// This is the only way to build a descriptor without storage, e.g.
    /// `Binding::Int(None)`.
    pub fn new(short: Option<char>, long: Option<&str>, binding: Binding<'a>) -> Self {
        Self {
            short,
            long: long.filter(|l| !l.is_empty()).map(String::from),
            usage: String::new(),
            required: false,
            binding,
        }
    }

    /// Single integer option.
    pub fn int(short: Option<char>, long: Option<&str>, value: &'a mut i64) -> Self {
        Self::new(short, long, Binding::Int(Some(value)))
    }

    /// Accumulating integer option.
    pub fn ints(short: Option<char>, long: Option<&str>, values: &'a mut Vec<i64>) -> Self {
        Self::new(short, long, Binding::Ints(Some(values)))
    }

    /// Single string option.
    pub fn string(short: Option<char>, long: Option<&str>, value: &'a mut String) -> Self {
        Self::new(short, long, Binding::String(Some(value)))
    }

    /// Accumulating string option.
    pub fn strings(short: Option<char>, long: Option<&str>, values: &'a mut Vec<String>) -> Self {
        Self::new(short, long, Binding::Strings(Some(values)))
    }

    /// Boolean flag.
    pub fn bool(short: Option<char>, long: Option<&str>, value: &'a mut bool) -> Self {
        Self::new(short, long, Binding::Bool(Some(value)))
    }

    /// Occurrence-counting flag.
    pub fn count(short: Option<char>, long: Option<&str>, count: &'a mut u32) -> Self {
        Self::new(short, long, Binding::Count(Some(count)))
    }

    /// File option opened read-only.
    pub fn file(short: Option<char>, long: Option<&str>, file: &'a mut Option<File>) -> Self {
        let mut options = OpenOptions::new();
        options.read(true);
        Self::file_with(short, long, options, file)
    }

    /// File option opened with caller-chosen flags (and mode, via
    /// `std::os::unix::fs::OpenOptionsExt`).
    pub fn file_with(
        short: Option<char>,
        long: Option<&str>,
        options: OpenOptions,
        file: &'a mut Option<File>,
    ) -> Self {
        Self::new(
            short,
            long,
            Binding::File {
                file: Some(file),
                options,
            },
        )
    }

    /// Adds usage text.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn nargs(&self) -> Nargs {
        self.binding.nargs()
    }

    /// Registry keys for this descriptor: the short name as a one-character
    /// string, then the long name.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.short
            .map(String::from)
            .into_iter()
            .chain(self.long.iter().cloned())
    }

    /// Returns the dashed name used in messages (long form preferred).
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => "<unnamed>".to_string(),
        }
    }

    /// Binds one token to the caller's storage.
    ///
    /// Flags ignore the token text.
    ///
    /// # Errors
    ///
    /// [`NilValue`](ParseError::NilValue) if no storage was supplied,
    /// [`Conversion`](ParseError::Conversion) for malformed integers, and
    /// [`Io`](ParseError::Io) if a file option cannot open its path.
    pub fn set(&mut self, token: &str) -> Result<()> {
        let name = self.display_name();
        self.binding.bind(&name, token)?;
        debug!(option = %name, value = token, "Bound option value");
        Ok(())
    }
}
