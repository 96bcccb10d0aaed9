//! Core library for the `spec-checker` and `find_duplicate_functions` CLIs.
//!
//! The checker audits a Python project against its design document: it
//! extracts declared symbols with tree-sitter, parses module sections out of
//! the document, and reports drift in both directions together with missing
//! referenced paths and relative imports.

pub mod adapters;
pub mod checker;
pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod context;
pub mod design_doc;
pub mod duplicates;
pub mod error;
pub mod imports;
pub mod ports;
pub mod python;
pub mod symbols;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run the `spec-checker` CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let Some(cli) = parse_args::<cli::Cli, _, _>(args)? else {
        return Ok(());
    };
    init_tracing(cli.verbose);
    commands::dispatch(&cli)
}

/// Run the `find_duplicate_functions` CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails, the scan fails, or
/// duplicates were found.
pub fn run_duplicates<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let Some(args) = parse_args::<cli::DuplicateArgs, _, _>(args)? else {
        return Ok(());
    };
    init_tracing(args.verbose);
    commands::duplicates::run(&args)
}

/// Parses arguments; `None` means help or version text was printed.
fn parse_args<P, I, T>(args: I) -> Result<Option<P>, String>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match P::try_parse_from(args) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            Ok(None)
        }
        Err(err) => Err(err.to_string()),
    }
}

/// Installs the stderr tracing subscriber.
///
/// `RUST_LOG` wins over `-v`; without either the console stays quiet because
/// findings are already printed and written to the log file.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "off",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second run in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
