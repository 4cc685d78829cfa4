//! Command-line interface for textseg
//! Runs field extraction and line wrapping over files (or stdin) using configured delimiter profiles.
//!
//! Usage:
//!   textseg wrap [--width `<n>`] [--break-char `<c>`] [`<path>`]                 - Reflow text into bounded lines
//!   textseg fields [--profile `<name>`] [--keyword `<k>`]... [--json] [`<path>`]  - Extract the fields of every line
//!   textseg profiles                                                         - List configured delimiter profiles

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::io::Read;
use textseg::textseg::config::{Loader, TextsegConfig};
use textseg::textseg::{wrap_at_length, DelimiterSet, ExtractedField};

fn main() {
    let matches = Command::new("textseg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract delimited data fields and wrap text at a line length")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Additional TOML configuration layered over the defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log output (repeat for more)"),
        )
        .subcommand(
            Command::new("wrap")
                .about("Wrap text into lines of bounded length")
                .arg(
                    Arg::new("width")
                        .long("width")
                        .short('w')
                        .value_parser(value_parser!(usize))
                        .help("Maximum line length (default from config)"),
                )
                .arg(
                    Arg::new("break-char")
                        .long("break-char")
                        .help("Character appended after every line (default from config)"),
                )
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("fields")
                .about("Print the data fields found on every line")
                .arg(
                    Arg::new("profile")
                        .long("profile")
                        .short('p')
                        .default_value("whitespace")
                        .help("Delimiter profile to use"),
                )
                .arg(
                    Arg::new("keyword")
                        .long("keyword")
                        .short('k')
                        .action(ArgAction::Append)
                        .help("Keyword anchor, replaces the profile's keywords (repeatable)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit full field profiles as JSON"),
                )
                .arg(path_arg()),
        )
        .subcommand(Command::new("profiles").about("List configured delimiter profiles"))
        .get_matches();

    init_logging(matches.get_count("verbose"));
    let config = load_config(matches.get_one::<String>("config"));

    match matches.subcommand() {
        Some(("wrap", wrap_matches)) => handle_wrap_command(&config, wrap_matches),
        Some(("fields", fields_matches)) => handle_fields_command(&config, fields_matches),
        Some(("profiles", _)) => handle_profiles_command(&config),
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Input file, or '-' for stdin")
        .default_value("-")
        .index(1)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(
        level,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn load_config(path: Option<&String>) -> TextsegConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        log::info!("layering configuration from {}", path);
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| fail("Error loading configuration", e))
}

fn read_input(path: &str) -> String {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .unwrap_or_else(|e| fail("Error reading stdin", e));
        return buffer;
    }
    std::fs::read_to_string(path).unwrap_or_else(|e| fail("Error reading file", e))
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, err);
    std::process::exit(1);
}

/// Handle the wrap command
fn handle_wrap_command(config: &TextsegConfig, matches: &ArgMatches) {
    let width = matches
        .get_one::<usize>("width")
        .copied()
        .unwrap_or(config.wrap.line_length);
    let break_char = match matches.get_one::<String>("break-char") {
        Some(raw) => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => fail("Invalid --break-char", format!("{:?} is not one character", raw)),
            }
        }
        None => config
            .wrap
            .break_char()
            .unwrap_or_else(|e| fail("Invalid configuration", e)),
    };

    let source = read_input(path_of(matches));
    log::debug!("wrapping {} bytes at width {}", source.len(), width);
    let wrapped =
        wrap_at_length(&source, width, break_char).unwrap_or_else(|e| fail("Wrap error", e));
    print!("{}", wrapped);
}

#[derive(Serialize)]
struct LineFields {
    line: usize,
    fields: Vec<ExtractedField>,
}

/// Handle the fields command
fn handle_fields_command(config: &TextsegConfig, matches: &ArgMatches) {
    let profile_name = matches
        .get_one::<String>("profile")
        .map_or("whitespace", String::as_str);
    let mut profile = config
        .profile(profile_name)
        .unwrap_or_else(|e| fail("Invalid profile", e));
    if let Some(keywords) = matches.get_many::<String>("keyword") {
        profile.keywords = DelimiterSet::new(keywords.cloned());
    }

    let source = read_input(path_of(matches));
    let mut lines = Vec::new();
    for (number, line) in source.split_inclusive('\n').enumerate() {
        let fields: Vec<ExtractedField> = profile
            .fields(line)
            .collect::<Result<_, _>>()
            .unwrap_or_else(|e| fail(&format!("Extraction error on line {}", number + 1), e));
        log::debug!("line {}: {} field(s)", number + 1, fields.len());
        lines.push(LineFields {
            line: number + 1,
            fields,
        });
    }

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&lines)
            .unwrap_or_else(|e| fail("Error serializing fields", e));
        println!("{}", json);
        return;
    }
    for entry in &lines {
        for field in &entry.fields {
            println!("{}", field.text);
        }
    }
}

/// Handle the profiles command
fn handle_profiles_command(config: &TextsegConfig) {
    println!("Available delimiter profiles:\n");
    for name in config.profile_names() {
        println!("  {}", name);
    }
}

fn path_of(matches: &ArgMatches) -> &str {
    matches.get_one::<String>("path").map_or("-", String::as_str)
}
