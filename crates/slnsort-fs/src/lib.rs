//! Filesystem layer for slnsort
//!
//! Provides byte-exact text decoding and the staged write / backup / replace
//! protocol used to rewrite a file without ever leaving partial output behind.

pub mod codec;
pub mod error;
pub mod io;

pub use codec::SourceText;
pub use error::{Error, Result};
pub use io::{BackupPolicy, StagedFile, backup_path, move_to_backup, read_source};
