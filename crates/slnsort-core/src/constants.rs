//! Fixed tokens of the solution file format.

/// Banner a header line must start with (after trimming).
pub const HEADER_BANNER: &str = "Microsoft Visual Studio Solution File, Format Version ";

/// Number of leading lines searched for the header banner.
pub const HEADER_SCAN_LINES: usize = 2;

/// Prefix of a project declaration line.
pub const PROJECT_PREFIX: &str = "Project(";

/// Type identifier of a solution folder.
pub const FOLDER_TYPE_GUID: &str = "{2150E333-8FDC-42A3-9474-1A3956D46DE8}";

/// Structural keywords, each matched against a whole trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Closes a project block
    EndProject,
    /// Opens the global block
    Global,
    /// Closes the global block
    EndGlobal,
    /// Closes a global subsection
    EndGlobalSection,
}

impl Keyword {
    /// Get the string representation of the keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndProject => "EndProject",
            Self::Global => "Global",
            Self::EndGlobal => "EndGlobal",
            Self::EndGlobalSection => "EndGlobalSection",
        }
    }

    /// Whether `trimmed` is exactly this keyword.
    pub fn matches(&self, trimmed: &str) -> bool {
        trimmed == self.as_str()
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Global subsections whose entries are reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// `GlobalSection(NestedProjects)`: `{child} = {parent}` entries
    NestedProjects,
    /// `GlobalSection(ProjectConfigurationPlatforms)`: `{guid}.<cfg> = <value>` entries
    ProjectConfigurationPlatforms,
}

impl SectionKind {
    /// Property name of the subsection header line.
    pub fn header_name(&self) -> &'static str {
        match self {
            Self::NestedProjects => "GlobalSection(NestedProjects)",
            Self::ProjectConfigurationPlatforms => "GlobalSection(ProjectConfigurationPlatforms)",
        }
    }

    /// Recognize a subsection from its header property name.
    pub fn from_header_name(name: &str) -> Option<Self> {
        [Self::NestedProjects, Self::ProjectConfigurationPlatforms]
            .into_iter()
            .find(|kind| kind.header_name() == name)
    }
}
