//! Hierarchy-aware canonical ordering of solution files.
//!
//! A solution lists project blocks followed by a `Global` block. This crate
//! computes a canonical project order from the folder nesting recorded in the
//! file and reorders three places consistently:
//!
//! - the project blocks themselves
//! - entries of `GlobalSection(NestedProjects)`
//! - entries of `GlobalSection(ProjectConfigurationPlatforms)`, keyed by the
//!   project GUID before the first `.`
//!
//! Every other line is written back byte for byte. Within each level of the
//! tree, folders come before other projects and names compare ordinally.
//!
//! ```text
//! Src/            (folder)
//! Src/Nested      (project in Src)
//! Zeta/           (folder)
//! Alpha           (root project)
//! ```

pub mod block;
pub mod constants;
pub mod error;
pub mod file;
pub mod line;
pub mod order;
pub mod rewrite;
pub mod solution;

pub use error::{Error, Result};
pub use file::{FileOutcome, SortMode, SortOptions, sort_file};
pub use order::{NestingPathSegment, OrderBuilder, ProjectOrder};
pub use rewrite::{SortOutcome, sort_text};
pub use slnsort_fs::BackupPolicy;
pub use solution::Solution;
