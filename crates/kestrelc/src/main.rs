//! The Kestrel compiler CLI.
//!
//! - `kestrelc check <file>` - Print the principal type of a program
//! - `kestrelc build <file>` - Type check and compile to JavaScript
//! - `kestrelc tokens <file>` - Dump the token stream
//! - `kestrelc ast <file>` - Dump the syntax tree
//!
//! `<file>` may be `-` to read stdin.
//!
//! Options:
//! - `--json` - Output diagnostics as JSON (one object per line)
//! - `--no-color` - Disable colorized output
//! - `--log-level` - Log verbosity (also `KESTREL_LOG`)

mod logging;
mod pipeline;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use kestrel_typeck::diagnostics::DiagnosticOptions;

#[derive(Parser)]
#[command(name = "kestrelc", version, about = "The Kestrel compiler")]
struct Cli {
    /// Output diagnostics as JSON (one object per line) instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Disable colorized output
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    /// Log verbosity: off, error, warn, info, debug or trace
    #[arg(
        long = "log-level",
        env = "KESTREL_LOG",
        default_value = "warn",
        global = true
    )]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type check a program and print its principal type
    Check {
        /// Source file, or `-` for stdin
        file: PathBuf,
    },
    /// Type check a program and compile it to JavaScript
    Build {
        /// Source file, or `-` for stdin
        file: PathBuf,

        /// Output path for the generated JavaScript
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the token stream of a source file
    Tokens {
        /// Source file, or `-` for stdin
        file: PathBuf,
    },
    /// Print the syntax tree of a source file
    Ast {
        /// Source file, or `-` for stdin
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let diag_opts = DiagnosticOptions {
        color: !cli.no_color && !cli.json,
        json: cli.json,
    };
    if let Err(e) = logging::init(cli.log_level, diag_opts.color) {
        eprintln!("warning: could not initialize logging: {e}");
    }

    let result = match &cli.command {
        Commands::Check { file } => pipeline::check(file, &diag_opts),
        Commands::Build { file, output } => pipeline::build(file, output.as_deref(), &diag_opts),
        Commands::Tokens { file } => pipeline::tokens(file, &diag_opts),
        Commands::Ast { file } => pipeline::ast(file, &diag_opts),
    };

    if let Err(e) = result {
        if cli.json {
            // In JSON mode, emit the final error as JSON too.
            let msg = serde_json::json!({
                "code": "C0001",
                "severity": "error",
                "message": e,
                "file": "",
                "spans": [],
                "help": null
            });
            eprintln!("{msg}");
        } else {
            eprintln!("error: {e}");
        }
        process::exit(1);
    }
}
