//! Staged writes and crash-safe file replacement
//!
//! Output is written to a temporary file beside the target. The target is only
//! touched once the temporary file is complete and flushed: it is moved to a
//! backup name (or deleted), then the temporary file is renamed into place.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{Error, Result, SourceText};

/// Suffix appended to the original path when keeping a backup.
pub const BACKUP_SUFFIX: &str = "unsorted";

/// Random characters in a staged file name.
const TEMP_NAME_LEN: usize = 8;

/// What happens to the original file when it is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupPolicy {
    /// Move the original to `<path>.unsorted` (or `<path>.<n>.unsorted`)
    #[default]
    Keep,
    /// Delete the original
    Discard,
}

/// Read and decode a whole file.
pub fn read_source(path: &Path) -> Result<SourceText> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(SourceText::decode(&bytes))
}

/// Backup path for attempt `index`: `<path>.unsorted`, then `<path>.1.unsorted`, ...
pub fn backup_path(path: &Path, index: u32) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    if index > 0 {
        name.push(format!(".{index}"));
    }
    name.push(".");
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Move `path` to the first backup name not already taken.
///
/// Returns the backup location.
pub fn move_to_backup(path: &Path) -> Result<PathBuf> {
    for index in 0..=u32::MAX {
        let candidate = backup_path(path, index);
        if fs::symlink_metadata(&candidate).is_ok() {
            tracing::debug!(candidate = %candidate.display(), "Backup name taken");
            continue;
        }
        match fs::rename(path, &candidate) {
            Ok(()) => return Ok(candidate),
            // Lost a race for the name; try the next one.
            Err(_) if fs::symlink_metadata(&candidate).is_ok() => continue,
            Err(e) => return Err(Error::io(path, e)),
        }
    }
    Err(Error::BackupExhausted {
        path: path.to_path_buf(),
    })
}

/// A temporary output file living next to the file it will replace.
///
/// Dropping a `StagedFile` without committing removes the temporary file, so
/// an error anywhere before [`StagedFile::commit`] leaves only the original.
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Create an empty temporary file in the target's directory.
    ///
    /// The name keeps the target's stem and extension around a random part,
    /// e.g. `App.k3v9x0qa.sln` for `App.sln`.
    pub fn create_beside(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let stem = target
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let suffix = target
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let temp = tempfile::Builder::new()
            .prefix(&format!("{stem}."))
            .suffix(&suffix)
            .rand_bytes(TEMP_NAME_LEN)
            .tempfile_in(dir)
            .map_err(|e| Error::io(dir, e))?;

        tracing::debug!(staged = %temp.path().display(), "Created staged file");

        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    /// Location of the temporary file.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// The file this stage will replace.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Append bytes to the temporary file.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.temp
            .write_all(bytes)
            .map_err(|e| Error::io(self.temp.path(), e))
    }

    /// Encode and write decoded text.
    pub fn write_source(&mut self, source: &SourceText) -> Result<()> {
        let bytes = source.encode()?;
        self.write_all(&bytes)
    }

    /// Remove the temporary file, leaving the target untouched.
    pub fn discard(self) -> Result<()> {
        let path = self.temp.path().to_path_buf();
        self.temp.close().map_err(|e| Error::io(path, e))
    }

    /// Replace the target with the staged content.
    ///
    /// The staged file takes over the target's permissions. Returns the backup
    /// location when `policy` keeps one. If the final rename fails, a kept
    /// backup is moved back to the target path.
    pub fn commit(self, policy: BackupPolicy) -> Result<Option<PathBuf>> {
        let Self { mut temp, target } = self;

        temp.flush().map_err(|e| Error::io(temp.path(), e))?;
        let permissions = fs::metadata(&target)
            .map_err(|e| Error::io(&target, e))?
            .permissions();
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::io(temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io(temp.path(), e))?;

        // Discard persists straight over the target, so a failed rename leaves
        // the original in place.
        let backup = match policy {
            BackupPolicy::Keep => {
                let backup = move_to_backup(&target)?;
                tracing::info!(backup = %backup.display(), "Original moved to backup");
                Some(backup)
            }
            BackupPolicy::Discard => None,
        };

        if let Err(e) = temp.persist(&target) {
            if let Some(backup) = &backup {
                if let Err(restore) = fs::rename(backup, &target) {
                    tracing::warn!(
                        backup = %backup.display(),
                        error = %restore,
                        "Could not restore original from backup"
                    );
                }
            }
            return Err(Error::io(&target, e.error));
        }

        Ok(backup)
    }
}
