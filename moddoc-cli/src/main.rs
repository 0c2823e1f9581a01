//! Command-line interface for moddoc
//! This binary renders compiler-emitted module declaration documents into
//! browsable documentation, and can query the aggregate index it produces.
//!
//! Usage:
//!   moddoc generate `<input-dir>` [--out `<dir>`] [--format `<format>`] [--prelude `<names>`]
//!   moddoc search `<index>` `<query>`

use clap::{Arg, Command};

mod generate;
mod search_cmd;

fn main() {
    env_logger::init();

    let matches = Command::new("moddoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders compiler-emitted declaration trees into browsable documentation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Render every module document in a directory")
                .arg(
                    Arg::new("input")
                        .help("Directory of compiler-emitted *.json module documents")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Output directory")
                        .default_value("build"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: html or markdown")
                        .default_value("html"),
                )
                .arg(
                    Arg::new("prelude")
                        .long("prelude")
                        .help("Comma-separated module names listed first and marked as prelude")
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Query an aggregate index artifact")
                .arg(
                    Arg::new("index")
                        .help("Path to full.json or full.json.gz")
                        .required(true)
                        .index(1),
                )
                .arg(Arg::new("query").help("Search query").required(true).index(2)),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("generate", sub)) => {
            let input = sub.get_one::<String>("input").expect("input is required");
            let out = sub.get_one::<String>("out").expect("out has a default");
            let format_name = sub.get_one::<String>("format").expect("format has a default");
            let prelude = sub.get_one::<String>("prelude").expect("prelude has a default");

            let format = generate::OutputFormat::from_name(format_name).unwrap_or_else(|| {
                eprintln!("Unknown output format '{}'", format_name);
                eprintln!("Available formats: html, markdown");
                std::process::exit(1);
            });

            generate::run(
                input.as_ref(),
                out.as_ref(),
                format,
                &parse_prelude(prelude),
            )
        }
        Some(("search", sub)) => {
            let index = sub.get_one::<String>("index").expect("index is required");
            let query = sub.get_one::<String>("query").expect("query is required");
            search_cmd::run(index.as_ref(), query)
        }
        _ => unreachable!("subcommand is required"),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn parse_prelude(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
