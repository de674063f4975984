//! Command-line interface for cooker
//!
//! Usage:
//!   cooker cook `<path>` [--traditional-linebreaks] [--censor `<term>`]...  - Transform a file to HTML
//!   cooker tree `<path>`                                                  - Dump the tagged tree as JSON

use clap::{Arg, ArgAction, Command};

use cooker::dialects;
use cooker::{cook, cook_tree, CookOptions, DialectRegistry, RegistryBuilder};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("cooker")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Transform markup text to HTML with the default dialects")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("cook")
                .about("Transform a file to HTML")
                .arg(
                    Arg::new("path")
                        .help("Path to the text file to transform")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("traditional-linebreaks")
                        .long("traditional-linebreaks")
                        .help("Only blank lines break paragraphs; single newlines stay")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("censor")
                        .long("censor")
                        .help("Term to censor (repeatable)")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("tree")
                .about("Dump the tagged tree as JSON, before rendering")
                .arg(
                    Arg::new("path")
                        .help("Path to the text file to transform")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("cook", cook_matches)) => {
            let path = cook_matches.get_one::<String>("path").unwrap();
            let terms: Vec<String> = cook_matches
                .get_many::<String>("censor")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            let traditional = cook_matches.get_flag("traditional-linebreaks");
            handle_cook_command(path, &terms, traditional);
        }
        Some(("tree", tree_matches)) => {
            let path = tree_matches.get_one::<String>("path").unwrap();
            handle_tree_command(path);
        }
        _ => unreachable!(),
    }
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

fn build_registry(censor_terms: &[String]) -> DialectRegistry {
    let mut builder = RegistryBuilder::new();
    dialects::install_defaults(&mut builder);
    if let Err(e) = dialects::censor::install(&mut builder, censor_terms) {
        eprintln!("Error installing censor terms: {}", e);
        std::process::exit(1);
    }
    builder.build()
}

fn handle_cook_command(path: &str, censor_terms: &[String], traditional_linebreaks: bool) {
    let source = read_source(path);
    let registry = build_registry(censor_terms);
    let options = CookOptions {
        legacy_linebreaks: !traditional_linebreaks,
        ..CookOptions::default()
    };
    println!("{}", cook(&source, &registry, &options));
}

fn handle_tree_command(path: &str) {
    let source = read_source(path);
    let registry = build_registry(&[]);
    let tree = cook_tree(&source, &registry, &CookOptions::default());
    let json = serde_json::to_string_pretty(&tree).unwrap_or_else(|e| {
        eprintln!("Error serializing tree: {}", e);
        std::process::exit(1);
    });
    println!("{}", json);
}
