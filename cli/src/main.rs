use std::path::PathBuf;

use argument_parser_core::{ConfiguredParser, ParseReport, ParserConfig, validate_config};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argparse-probe")]
#[command(about = "Parse argument tokens against a declarative option set")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse tokens (given after `--`) and print the bound values.
    Parse(ParseArgs),
    /// Validate one or more parser config files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Parser config file (YAML, or JSON with a .json extension).
    #[arg(long)]
    config: PathBuf,
    /// Fail when a required option receives no value.
    #[arg(long)]
    enforce_required: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Tokens to parse.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Parser config files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let config = ParserConfig::load(&args.config)
        .map_err(|err| format!("Failed to load '{}': {err}", args.config.display()))?;
    debug!(
        config = %args.config.display(),
        options = config.options.len(),
        subcommands = config.subcommands.len(),
        "Loaded parser config"
    );

    let mut parser = ConfiguredParser::new(&config);
    if args.enforce_required {
        parser = parser.with_enforce_required(true);
    }

    let tokens: Vec<&str> = args.tokens.iter().map(String::as_str).collect();
    let report = parser.parse_args(&tokens).map_err(|err| err.to_string())?;

    println!("{}", format_report(&report, args.format)?);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failures = 0usize;

    for input in &args.inputs {
        let text = std::fs::read_to_string(input)
            .map_err(|err| format!("Failed to read '{}': {err}", input.display()))?;
        let parsed: Result<ParserConfig, String> =
            if input.extension().is_some_and(|ext| ext == "json") {
                serde_json::from_str(&text).map_err(|e| e.to_string())
            } else {
                serde_yaml::from_str(&text).map_err(|e| e.to_string())
            };

        let errors = match parsed {
            Ok(config) => validate_config(&config)
                .into_iter()
                .map(|e| e.to_string())
                .collect(),
            Err(err) => vec![err],
        };

        if errors.is_empty() {
            println!("ok: {}", input.display());
        } else {
            failures += 1;
            for err in errors {
                println!("invalid: {}: {err}", input.display());
            }
        }
    }

    if failures > 0 {
        return Err(format!("{failures} config file(s) failed validation"));
    }
    Ok(())
}

fn format_report(report: &ParseReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}
