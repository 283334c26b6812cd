mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{compile, CompileArgs};

/// Docsync CLI - compile markup into document edit operations
#[derive(Parser, Debug)]
#[command(name = "docsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a markup file into a batch update
    Compile(CompileArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Compile(args) => compile(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
