//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use slnsort_core::{BackupPolicy, SortMode, SortOptions};

/// Sort the projects of a Visual Studio solution file
///
/// Projects are ordered by their place in the solution tree: folders first at
/// every level, then names in ordinal order. The nesting and configuration
/// sections follow the same order. The original file is kept beside the
/// result as `<file>.unsorted` unless --no-backup is given.
#[derive(Parser, Debug)]
#[command(name = "slnsort")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Solution file to sort
    pub path: PathBuf,

    /// Delete the original instead of keeping it as a backup
    #[arg(long, env = "SLNSORT_NO_BACKUP")]
    pub no_backup: bool,

    /// Only report whether the file is sorted; exit 1 if it is not
    #[arg(long, env = "SLNSORT_CHECK")]
    pub check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Sort options selected by the flags.
    pub fn options(&self) -> SortOptions {
        SortOptions {
            backup: if self.no_backup {
                BackupPolicy::Discard
            } else {
                BackupPolicy::Keep
            },
            mode: if self.check {
                SortMode::Check
            } else {
                SortMode::Write
            },
        }
    }
}
