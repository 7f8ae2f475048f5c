//! Sorting a solution file in place.

use std::path::{Path, PathBuf};

use slnsort_fs::{BackupPolicy, StagedFile, read_source};

use crate::Result;
use crate::rewrite::sort_text;

/// Whether a run may modify the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Replace the file when it is not sorted
    #[default]
    Write,
    /// Only report whether the file is sorted
    Check,
}

/// Options for [`sort_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOptions {
    pub backup: BackupPolicy,
    pub mode: SortMode,
}

/// What [`sort_file`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Nothing to do; the file was not touched
    AlreadySorted,
    /// The file was replaced by its sorted version
    Sorted { backup: Option<PathBuf> },
    /// Check mode found the file unsorted; the file was not touched
    WouldSort,
}

/// Sort the solution at `path`.
///
/// The whole file is parsed and ordered in memory first, so malformed input
/// fails before any file is created. The sorted text is then staged beside
/// the original and swapped in; the original is never modified in place.
pub fn sort_file(path: &Path, options: &SortOptions) -> Result<FileOutcome> {
    let source = read_source(path)?;
    let outcome = sort_text(&source.text)?;

    if outcome.already_sorted {
        tracing::info!(path = %path.display(), "Solution is already sorted");
        return Ok(FileOutcome::AlreadySorted);
    }
    if options.mode == SortMode::Check {
        tracing::info!(path = %path.display(), "Solution is not sorted");
        return Ok(FileOutcome::WouldSort);
    }

    let mut staged = StagedFile::create_beside(path)?;
    staged.write_source(&source.with_text(outcome.text))?;
    let backup = staged.commit(options.backup)?;

    tracing::info!(path = %path.display(), "Solution sorted");
    Ok(FileOutcome::Sorted { backup })
}
