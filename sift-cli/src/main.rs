//! Sift CLI
//!
//! Parse a selector and print its tree, its canonical text, or its tokens.
//!
//! - sift 'div > a:has-text("ok")'         # JSON tree
//! - sift --format text 'a  >  b'          # canonical selector
//! - sift --arguments '"foo", 2, div'      # bare argument list

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use sift_selector::{
    FunctionArgument, SelectorList, parse_function_arguments, parse_selector, serialize_arguments,
    tokenize,
};

/// Sift: selector parser with engine-function extensions
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the parsed tree as JSON
    sift 'div > span:has-text("foo")'

    # Print the canonical serialization
    sift --format text 'a  >  b ,c'

    # Print the token stream
    sift --format tokens ':nth-child(2n+1)'

    # Parse an engine-function argument list
    sift --arguments '"foo", 2, div > span'

    # List the engine functions a selector uses
    sift --names ':has(:visible) :text("x")'
"#)]
struct Cli {
    /// Selector (or argument list, with --arguments) to parse
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Parse the input as a bare engine-function argument list
    #[arg(short, long)]
    arguments: bool,

    /// Print only the engine-function names used, one per line
    #[arg(short, long)]
    names: bool,
}

/// What to print for a successful parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Pretty-printed JSON tree
    Json,
    /// Canonical serialization
    Text,
    /// One token per line: offset, kind, source
    Tokens,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.format == Format::Tokens {
        print_tokens(&cli.selector)?;
        return Ok(());
    }

    if cli.arguments {
        let args = parse_function_arguments(&cli.selector)?;
        if cli.names {
            print_names(&argument_selectors(&args));
        } else if cli.format == Format::Text {
            println!("{}", serialize_arguments(&args));
        } else {
            println!("{}", serde_json::to_string_pretty(&args)?);
        }
        return Ok(());
    }

    let list = parse_selector(&cli.selector)?;
    if cli.names {
        print_names(&list);
    } else if cli.format == Format::Text {
        println!("{list}");
    } else {
        println!("{}", serde_json::to_string_pretty(&list)?);
    }
    Ok(())
}

/// The selector arguments of a bare argument list, as a list.
fn argument_selectors(args: &[FunctionArgument]) -> SelectorList {
    SelectorList {
        selectors: args
            .iter()
            .filter_map(FunctionArgument::as_selector)
            .cloned()
            .collect(),
    }
}

fn print_names(list: &SelectorList) {
    for name in list.function_names() {
        println!("{name}");
    }
}

/// Print the raw token stream. Tokens the parser would reject are
/// highlighted rather than reported as errors.
fn print_tokens(input: &str) -> Result<()> {
    for spanned in tokenize(input)? {
        let line = format!("{:>4} {} {:?}", spanned.offset, spanned.token, spanned.source);
        if spanned.token.is_supported() {
            println!("{line}");
        } else {
            println!("{}", line.yellow());
        }
    }
    Ok(())
}
