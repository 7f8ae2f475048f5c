//! slnsort CLI
//!
//! Sorts the projects of a Visual Studio solution file in place.

mod cli;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use slnsort_core::{FileOutcome, sort_file};

use cli::Cli;
use error::{CliError, Result};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Run the command, returning the process exit code.
fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose).map_err(|e| CliError::Logging {
        message: e.to_string(),
    })?;
    tracing::debug!(path = %cli.path.display(), "Verbose mode enabled");

    if cli.path.is_dir() {
        return Err(CliError::user(format!(
            "{} is a directory, not a solution file",
            cli.path.display()
        )));
    }

    match sort_file(&cli.path, &cli.options())? {
        FileOutcome::AlreadySorted => {
            eprintln!("Solution is already sorted.");
            Ok(0)
        }
        FileOutcome::WouldSort => {
            eprintln!(
                "{} {} is not sorted",
                "check".yellow().bold(),
                cli.path.display()
            );
            Ok(1)
        }
        FileOutcome::Sorted { backup } => {
            if let Some(backup) = backup {
                tracing::info!(backup = %backup.display(), "Original kept");
            }
            println!("{} {}", "Sorted".green().bold(), cli.path.display());
            Ok(0)
        }
    }
}
