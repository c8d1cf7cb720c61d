//! Declarative parser example.
//!
//! Builds a parser from an inline YAML option set instead of binding local
//! variables, then prints the report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argument-parser-demos --example from_config -- -vvv --tag a b
//! cargo run -p argument-parser-demos --example from_config -- deploy --env prod
//! ```

use argument_parser_core::{ConfiguredParser, ParserConfig};

const CONFIG: &str = r#"
options:
  - { short: v, long: verbose, type: count, usage: "Increase verbosity" }
  - { short: t, long: tag, type: strings }
subcommands:
  - command: deploy
    options:
      - { short: e, long: env, type: string, required: true }
      - { long: replicas, type: int }
"#;

fn main() {
    let config = match ParserConfig::from_yaml_str(CONFIG) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid config: {err}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = args.iter().map(String::as_str).collect();

    let mut parser = ConfiguredParser::new(&config).with_enforce_required(true);
    match parser.parse_args(&tokens) {
        Ok(report) => {
            match &report.subcommand {
                Some(command) => println!("command: {command}"),
                None => println!("command: <none>"),
            }
            for (name, value) in &report.values {
                println!("  {name} = {value}");
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    }
}
