//! Declarative parser configuration.
//!
//! A [`ParserConfig`] describes an option set (and one level of subcommands)
//! as data, so a parser can be assembled without writing descriptor code.
//! [`ConfiguredParser`] owns one typed storage cell per configured option,
//! lends those cells to a freshly built [`ArgumentParser`] for each parse
//! call, and reports the bound values afterwards.
//!
//! # Example YAML
//!
//! ```yaml
//! enforce_required: false
//! options:
//!   - { short: v, long: verbose, type: count, usage: "More output" }
//!   - { short: o, long: output, type: file, write: true, create: true }
//! subcommands:
//!   - command: build
//!     options:
//!       - { short: j, long: jobs, type: int, required: true }
//!       - { short: t, long: target, type: strings }
//! ```

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::option::OptionSpec;
use crate::parser::ArgumentParser;
use crate::validate::validate_config;

/// Storage type of a configured option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Int,
    Ints,
    String,
    Strings,
    Bool,
    Count,
    File,
}

/// One configured option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionConfig {
    /// Single-character name, used as `-x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Long name without dashes, used as `--name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// File options: open for writing.
    #[serde(default)]
    pub write: bool,
    /// File options: create the file if missing (implies `write`).
    #[serde(default)]
    pub create: bool,
    /// File options: append instead of truncating (implies `write`).
    #[serde(default)]
    pub append: bool,
}

impl OptionConfig {
    pub fn new(short: Option<char>, long: Option<&str>, kind: OptionType) -> Self {
        Self {
            short,
            long: long.map(String::from),
            usage: String::new(),
            required: false,
            kind,
            write: false,
            create: false,
            append: false,
        }
    }

    /// Returns the key used when reporting values (long name preferred).
    pub fn canonical_name(&self) -> String {
        self.long
            .clone()
            .or_else(|| self.short.map(String::from))
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        if self.append {
            options.append(true).create(self.create);
        } else if self.write || self.create {
            options.write(true).create(self.create).truncate(true);
        } else {
            options.read(true);
        }
        options
    }
}

/// A subcommand and its own option set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcommandConfig {
    pub command: String,
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

/// Top-level parser configuration.
///
/// # Examples
///
/// ```
/// use argument_parser_core::{OptionType, ParserConfig};
///
/// let config = ParserConfig::from_yaml_str(
///     "options:\n  - { short: n, long: count, type: int }\n",
/// )
/// .unwrap();
/// assert_eq!(config.options[0].kind, OptionType::Int);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub options: Vec<OptionConfig>,
    #[serde(default)]
    pub subcommands: Vec<SubcommandConfig>,
    #[serde(default)]
    pub enforce_required: bool,
}

impl ParserConfig {
    /// Loads and validates a configuration file.
    ///
    /// Files ending in `.json` are read as JSON, everything else as YAML.
    ///
    /// # Errors
    ///
    /// [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// [`YamlError`](ConfigError::YamlError) or
    /// [`JsonError`](ConfigError::JsonError) if parsing fails, and
    /// [`Invalid`](ConfigError::Invalid) if validation fails.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the first validation error, if any.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        match validate_config(self).into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

/// Typed storage cell for one configured option.
#[derive(Debug)]
enum ValueCell {
    Int(i64),
    Ints(Vec<i64>),
    String(String),
    Strings(Vec<String>),
    Bool(bool),
    Count(u32),
    File(Option<File>),
}

impl ValueCell {
    fn for_type(kind: OptionType) -> Self {
        match kind {
            OptionType::Int => Self::Int(0),
            OptionType::Ints => Self::Ints(Vec::new()),
            OptionType::String => Self::String(String::new()),
            OptionType::Strings => Self::Strings(Vec::new()),
            OptionType::Bool => Self::Bool(false),
            OptionType::Count => Self::Count(0),
            OptionType::File => Self::File(None),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Int(v) => Value::from(*v),
            Self::Ints(v) => Value::from(v.clone()),
            Self::String(v) => Value::from(v.as_str()),
            Self::Strings(v) => Value::from(v.clone()),
            Self::Bool(v) => Value::from(*v),
            Self::Count(v) => Value::from(*v),
            Self::File(f) => serde_json::json!({ "opened": f.is_some() }),
        }
    }
}

/// Storage for one option set.
#[derive(Debug)]
pub struct ValueStore {
    slots: Vec<(OptionConfig, ValueCell)>,
}

impl ValueStore {
    pub fn new(options: &[OptionConfig]) -> Self {
        let slots = options
            .iter()
            .map(|option| (option.clone(), ValueCell::for_type(option.kind)))
            .collect();
        Self { slots }
    }

    /// Descriptors bound to this store's cells.
    pub fn specs(&mut self) -> Vec<OptionSpec<'_>> {
        self.slots
            .iter_mut()
            .map(|(config, cell)| {
                let (short, long) = (config.short, config.long.as_deref());
                let spec = match cell {
                    ValueCell::Int(v) => OptionSpec::int(short, long, v),
                    ValueCell::Ints(v) => OptionSpec::ints(short, long, v),
                    ValueCell::String(v) => OptionSpec::string(short, long, v),
                    ValueCell::Strings(v) => OptionSpec::strings(short, long, v),
                    ValueCell::Bool(v) => OptionSpec::bool(short, long, v),
                    ValueCell::Count(v) => OptionSpec::count(short, long, v),
                    ValueCell::File(f) => {
                        OptionSpec::file_with(short, long, config.open_options(), f)
                    }
                };
                let spec = spec.with_usage(&config.usage);
                if config.required { spec.required() } else { spec }
            })
            .collect()
    }

    /// Puts every cell back to its type's zero value, closing open files.
    pub fn reset(&mut self) {
        for (config, cell) in &mut self.slots {
            *cell = ValueCell::for_type(config.kind);
        }
    }

    /// Current values keyed by canonical option name.
    pub fn values(&self) -> BTreeMap<String, Value> {
        self.slots
            .iter()
            .map(|(config, cell)| (config.canonical_name(), cell.to_json()))
            .collect()
    }
}

/// Outcome of one [`ConfiguredParser::parse_args`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseReport {
    /// Matched subcommand, if the first token selected one.
    pub subcommand: Option<String>,
    /// Values of the option set that received the tokens.
    pub values: BTreeMap<String, Value>,
}

/// A parser tree assembled from a [`ParserConfig`], with its own storage.
///
/// # Examples
///
/// ```
/// use argument_parser_core::{ConfiguredParser, ParserConfig};
///
/// let config = ParserConfig::from_yaml_str(
///     "subcommands:\n  - command: build\n    options:\n      - { short: j, type: int }\n",
/// )
/// .unwrap();
/// let mut parser = ConfiguredParser::new(&config);
/// let report = parser.parse_args(&["build", "-j", "8"]).unwrap();
/// assert_eq!(report.subcommand.as_deref(), Some("build"));
/// assert_eq!(report.values["j"], 8);
/// ```
#[derive(Debug)]
pub struct ConfiguredParser {
    enforce_required: bool,
    root: ValueStore,
    subcommands: Vec<(String, ValueStore)>,
}

impl ConfiguredParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            enforce_required: config.enforce_required,
            root: ValueStore::new(&config.options),
            subcommands: config
                .subcommands
                .iter()
                .map(|sub| (sub.command.clone(), ValueStore::new(&sub.options)))
                .collect(),
        }
    }

    /// Overrides the configured `enforce_required` setting.
    pub fn with_enforce_required(mut self, enforce: bool) -> Self {
        self.enforce_required = enforce;
        self
    }

    /// Parses tokens into freshly reset storage and reports the values of
    /// the option set that received them.
    pub fn parse_args(&mut self, args: &[&str]) -> Result<ParseReport> {
        self.root.reset();
        for (_, store) in &mut self.subcommands {
            store.reset();
        }

        let matched = args
            .first()
            .and_then(|first| self.subcommands.iter().position(|(command, _)| command == first));

        {
            let mut parser = ArgumentParser::new().enforce_required(self.enforce_required);
            for spec in self.root.specs() {
                parser.add_option(spec);
            }
            for (command, store) in &mut self.subcommands {
                let mut child =
                    ArgumentParser::subcommand(command).enforce_required(self.enforce_required);
                for spec in store.specs() {
                    child.add_option(spec);
                }
                parser.add_subcommand(child);
            }
            parser.parse_args(args)?;
        }

        let report = match matched {
            Some(index) => {
                let (command, store) = &self.subcommands[index];
                ParseReport {
                    subcommand: Some(command.clone()),
                    values: store.values(),
                }
            }
            None => ParseReport {
                subcommand: None,
                values: self.root.values(),
            },
        };
        Ok(report)
    }
}
