use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use docsync_compiler_docs::{compile_batch, plain_text, BatchUpdate, Operation};
use docsync_markup::contains_script;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Markup file to compile, or `-` for stdin
    pub input: PathBuf,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the resulting document text instead of the batch
    #[arg(long)]
    pub text: bool,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,
}

pub fn compile(args: CompileArgs) -> Result<()> {
    let markup = read_input(&args.input)?;

    if contains_script(&markup) {
        eprintln!("{}", "⚠️  Script blocks will be removed".yellow());
    }

    let batch = compile_batch(&markup);
    let output = render(&batch, &args)?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create {}", parent.display()))?;
            }
            fs::write(path, &output).with_context(|| format!("Cannot write {}", path.display()))?;
            eprintln!(
                "  {} {} → {} ({} operations)",
                "✓".green(),
                args.input.display(),
                path.display(),
                batch.len()
            );
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut markup = String::new();
        io::stdin()
            .read_to_string(&mut markup)
            .context("Cannot read markup from stdin")?;
        return Ok(markup);
    }

    fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))
}

fn render(batch: &BatchUpdate, args: &CompileArgs) -> Result<String> {
    if args.text {
        return Ok(preview(&batch.requests));
    }

    let json = if args.compact {
        serde_json::to_string(batch)?
    } else {
        serde_json::to_string_pretty(batch)?
    };
    Ok(json)
}

fn preview(operations: &[Operation]) -> String {
    let text = plain_text(operations);
    text.strip_suffix('\n').unwrap_or(&text).to_string()
}
