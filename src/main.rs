//! CLI tool that tokenizes Lox source files.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lox_scanner::{format_diagnostics, format_tokens, scan};

/// Exit status for usage and I/O failures.
const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "lox", version, about = "Lox source tokenizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream of a source file.
    Tokenize {
        /// Source file to scan.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Error reading file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Error writing output: {0}")]
    Write(#[from] io::Error),
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.print().is_err() {
                eprintln!("{e}");
            }
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(command: Command) -> Result<u8, CliError> {
    match command {
        Command::Tokenize { file } => {
            let content = fs::read(&file).map_err(|source| CliError::Read {
                path: file.clone(),
                source,
            })?;
            tracing::debug!(path = %file.display(), bytes = content.len(), "read source");

            let result = scan(&content);

            let mut stderr = io::stderr().lock();
            stderr.write_all(format_diagnostics(&result.diagnostics).as_bytes())?;

            let mut stdout = io::stdout().lock();
            stdout.write_all(format_tokens(&result.tokens).as_bytes())?;
            stdout.flush()?;

            Ok(result.exit_code())
        }
    }
}

/// Install a stderr log subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
