use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use compiler::{CompilationPipeline, CompileOptions};

/// Compile an MPPL program to CASL II assembly.
#[derive(Parser, Debug)]
#[command(name = "mpplc", version, about)]
struct Args {
    /// MPPL source file
    input: PathBuf,

    /// Output file (defaults to the input with a `.csl` extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the cross-reference table
    #[arg(long)]
    xref: bool,

    /// Print the symbol table in `key|label|type|param` form
    #[arg(long)]
    symbols: bool,

    /// Print per-token occurrence counts
    #[arg(long)]
    tokens: bool,

    /// Print the program reformatted
    #[arg(long)]
    pretty: bool,

    /// Log each compilation stage to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let options = CompileOptions {
        verbose: args.verbose,
        xref: args.xref,
        symbols: args.symbols,
        tokens: args.tokens,
        pretty: args.pretty,
    };
    let mut pipeline = CompilationPipeline::new(options);
    pipeline.with_source(&args.input.display().to_string(), &source);

    let output = match pipeline.compile() {
        Ok(output) => output,
        Err(error) => {
            eprintln!("{}", pipeline.report(&error));
            process::exit(1);
        }
    };

    for report in [&output.tokens, &output.pretty, &output.xref, &output.symbols]
        .into_iter()
        .flatten()
    {
        print!("{}", report);
    }

    let path = args
        .output
        .unwrap_or_else(|| args.input.with_extension("csl"));
    fs::write(&path, &output.assembly)
        .with_context(|| format!("cannot write {}", path.display()))?;
    if args.verbose {
        eprintln!("{} {}", "Wrote".green().bold(), path.display());
    }

    Ok(())
}
