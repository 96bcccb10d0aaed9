//! Command dispatch and handlers.

pub mod check;
pub mod duplicates;
pub mod symbols;

use crate::cli::{Cli, Command};

/// Dispatch a parsed command line to its handler.
///
/// # Errors
///
/// Returns an error string if the handler fails or the check records errors.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    match cli.command.clone().unwrap_or(Command::Check { json: false }) {
        Command::Check { json } => check::run(&cli.root, json),
        Command::Symbols { file } => symbols::run(&cli.root, &file),
    }
}
