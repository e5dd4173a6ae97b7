//! Quell CLI — suppression-marker management for type-checker diagnostics.
//!
//! Provides `quell add` (the default when no subcommand is given) to run the
//! configured checker and annotate every reported error with a suppression
//! marker, and `quell remove` to strip all previously inserted markers from
//! a tree.

#![warn(missing_docs)]

mod add;
mod pipeline;
mod remove;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Quell — insert and remove type-error suppression markers.
#[derive(Parser, Debug)]
#[command(name = "quell", version, about = "Type-error suppression markers")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (per-file) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `quell.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run; `add` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the checker and insert a marker above every reported error.
    Add(AddArgs),
    /// Strip every suppression marker from the target tree.
    Remove(RemoveArgs),
}

/// Arguments for the `quell add` subcommand.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Project directory the checker runs in.
    #[arg(short, long, default_value = ".")]
    pub dir: String,

    /// Read a captured checker report from a file instead of running the
    /// checker.
    #[arg(long)]
    pub log_file: Option<String>,

    /// Output format for the run summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

impl Default for AddArgs {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            log_file: None,
            format: ReportFormat::Text,
        }
    }
}

/// Arguments for the `quell remove` subcommand.
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// File or directory to strip markers from.
    #[arg(default_value = ".")]
    pub path: String,

    /// Output format for the run summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Summary output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

impl Default for ReportFormat {
    fn default() -> Self {
        ReportFormat::Text
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print per-file information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let command = cli.command.unwrap_or(Command::Add(AddArgs::default()));
    let result = match command {
        Command::Add(ref args) => add::run(args, &global),
        Command::Remove(ref args) => remove::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn no_subcommand_means_add() {
        let cli = Cli::parse_from(["quell"]);
        assert!(cli.command.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn parse_add_with_log_file() {
        let cli = Cli::parse_from(["quell", "add", "--log-file", "tsc.log", "--format", "json"]);
        match cli.command {
            Some(Command::Add(args)) => {
                assert_eq!(args.log_file.as_deref(), Some("tsc.log"));
                assert_eq!(args.format, ReportFormat::Json);
                assert_eq!(args.dir, ".");
            }
            _ => panic!("expected Add command"),
        }
    }

    #[test]
    fn parse_remove_with_path() {
        let cli = Cli::parse_from(["quell", "remove", "src"]);
        match cli.command {
            Some(Command::Remove(args)) => {
                assert_eq!(args.path, "src");
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Remove command"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["quell", "remove", "--quiet"]);
        assert!(cli.quiet);
    }
}
