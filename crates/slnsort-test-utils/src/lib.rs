//! Shared test utilities for the slnsort workspace.
//!
//! This crate provides solution fixtures to eliminate duplication across
//! crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`solution`]: [`SolutionBuilder`] for well-formed solution text
//! - [`dir`]: [`TestDir`] temporary directory with file helpers

pub mod dir;
pub mod solution;

pub use dir::TestDir;
pub use solution::{CSHARP_PROJECT, FOLDER, SolutionBuilder, guid};
