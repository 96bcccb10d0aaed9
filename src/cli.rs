//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::duplicates::DEFAULT_PATTERN;

/// Top-level CLI parser for `spec-checker`.
#[derive(Debug, Parser)]
#[command(
    name = "spec-checker",
    version,
    about = "Check a Python project against its design document"
)]
pub struct Cli {
    /// Project root to check.
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Raise console log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// The command to execute; `check` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported top-level subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run every compliance check.
    Check {
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the symbols extracted from one Python file.
    Symbols {
        /// File to inspect.
        file: PathBuf,
    },
}

/// Arguments of the `find_duplicate_functions` binary.
#[derive(Debug, Parser)]
#[command(
    name = "find_duplicate_functions",
    version,
    about = "Find functions defined more than once at module level"
)]
pub struct DuplicateArgs {
    /// File or directory to scan.
    #[arg(default_value = "modules")]
    pub target: PathBuf,

    /// Glob matched against paths relative to a directory target.
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Also write the report to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Descend into subdirectories, hidden and ignored ones included.
    #[arg(short, long)]
    pub recursive: bool,

    /// Raise console log verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_default_check() {
        let cli = Cli::parse_from(["spec-checker"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_check_with_json_and_global_flags() {
        let cli = Cli::parse_from(["spec-checker", "check", "--json", "-vv", "-C", "/proj"]);
        assert_eq!(cli.command, Some(Command::Check { json: true }));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, PathBuf::from("/proj"));
    }

    #[test]
    fn symbols_requires_a_file() {
        assert!(Cli::try_parse_from(["spec-checker", "symbols"]).is_err());
        let cli = Cli::parse_from(["spec-checker", "symbols", "modules/a.py"]);
        assert_eq!(cli.command, Some(Command::Symbols { file: PathBuf::from("modules/a.py") }));
    }

    #[test]
    fn duplicate_args_have_defaults() {
        let args = DuplicateArgs::parse_from(["find_duplicate_functions"]);
        assert_eq!(args.target, PathBuf::from("modules"));
        assert_eq!(args.pattern, "*.py");
        assert!(args.output.is_none());
        assert!(!args.recursive);
    }

    #[test]
    fn duplicate_args_short_flags() {
        let args = DuplicateArgs::parse_from([
            "find_duplicate_functions",
            "src",
            "-p",
            "*_test.py",
            "-o",
            "dups.txt",
            "-r",
        ]);
        assert_eq!(args.target, PathBuf::from("src"));
        assert_eq!(args.pattern, "*_test.py");
        assert_eq!(args.output, Some(PathBuf::from("dups.txt")));
        assert!(args.recursive);
    }
}
