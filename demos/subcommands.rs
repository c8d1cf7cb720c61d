//! Subcommand dispatch example.
//!
//! The first argument selects a child parser; everything after it belongs to
//! that child. Without a matching command, the top-level options apply.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argument-parser-demos --example subcommands -- build -j 8 -t x86 arm
//! cargo run -p argument-parser-demos --example subcommands -- clean --all
//! cargo run -p argument-parser-demos --example subcommands -- --quiet
//! ```

use argument_parser_core::{ArgumentParser, OptionSpec};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut quiet = false;
    let mut jobs = 1;
    let mut targets = Vec::new();
    let mut all = false;

    let mut parser = ArgumentParser::new()
        .with_option(OptionSpec::bool(Some('q'), Some("quiet"), &mut quiet))
        .with_subcommand(
            ArgumentParser::subcommand("build")
                .with_option(OptionSpec::int(Some('j'), Some("jobs"), &mut jobs))
                .with_option(OptionSpec::strings(Some('t'), Some("target"), &mut targets)),
        )
        .with_subcommand(
            ArgumentParser::subcommand("clean")
                .with_option(OptionSpec::bool(Some('a'), Some("all"), &mut all)),
        );

    let commands: Vec<String> = parser
        .subcommand_names()
        .into_iter()
        .map(String::from)
        .collect();
    let selected = std::env::args()
        .nth(1)
        .filter(|first| commands.contains(first));

    if let Err(err) = parser.parse() {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
    drop(parser);

    match selected.as_deref() {
        Some("build") => println!("build: jobs={jobs} targets={targets:?}"),
        Some("clean") => println!("clean: all={all}"),
        _ => println!("no command (quiet={quiet}); try one of {commands:?}"),
    }
}

