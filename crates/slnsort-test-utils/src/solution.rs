//! [`SolutionBuilder`] for generating solution text in tests.

/// Type identifier of a C# project.
pub const CSHARP_PROJECT: &str = "{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}";

/// Type identifier of a solution folder.
pub const FOLDER: &str = "{2150E333-8FDC-42A3-9474-1A3956D46DE8}";

/// Deterministic project GUID for fixture number `n`.
pub fn guid(n: u32) -> String {
    format!("{{00000000-0000-0000-0000-{n:012}}}")
}

#[derive(Debug, Clone)]
struct Entry {
    type_guid: &'static str,
    name: String,
    guid: String,
}

/// Builds solution text the way Visual Studio lays it out.
///
/// Projects, nesting entries and configuration entries are written in the
/// order they were added, so a test controls whether the result is sorted.
///
/// # Example
///
/// ```rust,no_run
/// use slnsort_test_utils::{SolutionBuilder, guid};
///
/// let text = SolutionBuilder::new()
///     .folder("Src", guid(1))
///     .project("App", guid(2))
///     .nest(guid(2), guid(1))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct SolutionBuilder {
    newline: String,
    leading_blank_line: bool,
    entries: Vec<Entry>,
    nesting: Vec<(String, String)>,
}

impl Default for SolutionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolutionBuilder {
    pub fn new() -> Self {
        Self {
            newline: "\r\n".to_string(),
            leading_blank_line: false,
            entries: Vec::new(),
            nesting: Vec::new(),
        }
    }

    /// Line terminator for every line (default `\r\n`).
    pub fn newline(mut self, newline: &str) -> Self {
        self.newline = newline.to_string();
        self
    }

    /// Put an empty line before the header, as files saved with a BOM have.
    pub fn leading_blank_line(mut self) -> Self {
        self.leading_blank_line = true;
        self
    }

    /// Add a solution folder.
    pub fn folder(mut self, name: &str, guid: impl Into<String>) -> Self {
        self.entries.push(Entry {
            type_guid: FOLDER,
            name: name.to_string(),
            guid: guid.into(),
        });
        self
    }

    /// Add a C# project.
    pub fn project(mut self, name: &str, guid: impl Into<String>) -> Self {
        self.entries.push(Entry {
            type_guid: CSHARP_PROJECT,
            name: name.to_string(),
            guid: guid.into(),
        });
        self
    }

    /// Nest `child` inside `parent`.
    pub fn nest(mut self, child: impl Into<String>, parent: impl Into<String>) -> Self {
        self.nesting.push((child.into(), parent.into()));
        self
    }

    /// Render the solution text.
    pub fn build(&self) -> String {
        let nl = self.newline.as_str();
        let mut out = String::new();

        if self.leading_blank_line {
            out.push_str(nl);
        }
        for line in [
            "Microsoft Visual Studio Solution File, Format Version 12.00",
            "# Visual Studio Version 17",
            "VisualStudioVersion = 17.0.31903.59",
            "MinimumVisualStudioVersion = 10.0.40219.1",
        ] {
            out.push_str(line);
            out.push_str(nl);
        }

        for entry in &self.entries {
            let path = if entry.type_guid == FOLDER {
                entry.name.clone()
            } else {
                format!("{0}\\{0}.csproj", entry.name)
            };
            out.push_str(&format!(
                "Project(\"{}\") = \"{}\", \"{}\", \"{}\"{nl}EndProject{nl}",
                entry.type_guid, entry.name, path, entry.guid
            ));
        }

        out.push_str(&format!("Global{nl}"));
        out.push_str(&format!(
            "\tGlobalSection(SolutionConfigurationPlatforms) = preSolution{nl}\
             \t\tDebug|Any CPU = Debug|Any CPU{nl}\
             \t\tRelease|Any CPU = Release|Any CPU{nl}\
             \tEndGlobalSection{nl}"
        ));

        out.push_str(&format!(
            "\tGlobalSection(ProjectConfigurationPlatforms) = postSolution{nl}"
        ));
        for entry in self.entries.iter().filter(|e| e.type_guid != FOLDER) {
            for cfg in ["Debug", "Release"] {
                out.push_str(&format!(
                    "\t\t{0}.{cfg}|Any CPU.ActiveCfg = {cfg}|Any CPU{nl}\
                     \t\t{0}.{cfg}|Any CPU.Build.0 = {cfg}|Any CPU{nl}",
                    entry.guid
                ));
            }
        }
        out.push_str(&format!("\tEndGlobalSection{nl}"));

        out.push_str(&format!(
            "\tGlobalSection(SolutionProperties) = preSolution{nl}\
             \t\tHideSolutionNode = FALSE{nl}\
             \tEndGlobalSection{nl}"
        ));

        if !self.nesting.is_empty() {
            out.push_str(&format!("\tGlobalSection(NestedProjects) = preSolution{nl}"));
            for (child, parent) in &self.nesting {
                out.push_str(&format!("\t\t{child} = {parent}{nl}"));
            }
            out.push_str(&format!("\tEndGlobalSection{nl}"));
        }

        out.push_str(&format!("EndGlobal{nl}"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guid_is_braced_and_padded() {
        assert_eq!(guid(7), "{00000000-0000-0000-0000-000000000007}");
    }

    #[test]
    fn builds_header_first() {
        let text = SolutionBuilder::new().newline("\n").build();
        assert!(text.starts_with("Microsoft Visual Studio Solution File, Format Version 12.00\n"));
        assert!(text.ends_with("EndGlobal\n"));
        assert!(!text.contains("NestedProjects"));
    }

    #[test]
    fn folders_get_no_configuration_entries() {
        let text = SolutionBuilder::new()
            .folder("Src", guid(1))
            .project("App", guid(2))
            .build();
        assert!(!text.contains(&format!("{}.Debug", guid(1))));
        assert_eq!(text.matches(&format!("{}.Debug", guid(2))).count(), 2);
    }
}
