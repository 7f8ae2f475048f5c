//! Error types for slnsort-core

/// Result type for slnsort-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while sorting a solution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid solution: No header.")]
    MissingHeader,

    #[error("Invalid solution: Invalid project syntax at line {line}.")]
    InvalidProject { line: usize },

    #[error("Invalid solution: Invalid nested project syntax at line {line}.")]
    InvalidNestedProject { line: usize },

    #[error("Invalid solution: Invalid project configuration platform syntax at line {line}.")]
    InvalidConfigurationPlatform { line: usize },

    #[error("Invalid solution: Unexpected end of file, expected {expected}.")]
    UnexpectedEof { expected: String },

    #[error("Invalid solution: Project {project} is nested inside itself.")]
    ParentCycle { project: String },

    /// Filesystem error from slnsort-fs
    #[error(transparent)]
    Fs(#[from] slnsort_fs::Error),
}

impl Error {
    /// Whether this error describes malformed input rather than an I/O failure.
    pub fn is_data_format(&self) -> bool {
        !matches!(self, Self::Fs(_))
    }
}
