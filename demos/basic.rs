//! Basic option binding example.
//!
//! Binds a handful of options to local variables and parses the process
//! arguments.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argument-parser-demos --example basic -- -vv --name demo -n 1 2 3
//! cargo run -p argument-parser-demos --example basic -- -dn 5   # value options cannot be combined
//! ```

use argument_parser_core::{ArgumentParser, OptionSpec};

fn main() {
    let mut name = String::from("anonymous");
    let mut numbers = Vec::new();
    let mut verbosity = 0;
    let mut dry_run = false;

    let result = ArgumentParser::new()
        .with_option(
            OptionSpec::string(None, Some("name"), &mut name).with_usage("Name to greet"),
        )
        .with_option(OptionSpec::ints(Some('n'), Some("numbers"), &mut numbers))
        .with_option(OptionSpec::count(Some('v'), Some("verbose"), &mut verbosity))
        .with_option(OptionSpec::bool(Some('d'), Some("dry-run"), &mut dry_run))
        .parse();

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(2);
    }

    println!("Hello, {name}!");
    println!("  numbers:   {numbers:?} (sum {})", numbers.iter().sum::<i64>());
    println!("  verbosity: {verbosity}");
    println!("  dry run:   {dry_run}");
}
