mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{parse, ParseArgs};

/// Gloss CLI - literate documentation sections from annotated source
#[derive(Parser, Debug)]
#[command(name = "gloss")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse source files into documentation sections
    Parse(ParseArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => parse(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
