//! Structured, order-preserving view of a solution file
//!
//! Parsing is a single forward pass. Every line of the input ends up in
//! exactly one place of [`Solution`], borrowed verbatim, so rendering never
//! has to rebuild text.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::read_block;
use crate::constants::{HEADER_BANNER, HEADER_SCAN_LINES, Keyword, SectionKind};
use crate::line::{LineCursor, LineKind, classify, content, parse_property, section_header};
use crate::order::{OrderBuilder, ProjectOrder};
use crate::{Error, Result};

/// Matches a project declaration:
/// `Project("{TYPE}") = "Name", "Path\To\Name.csproj", "{GUID}"`
static PROJECT_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^Project\("(?P<type>.*)"\)\s*=\s*"(?P<name>.*)"\s*,\s*"(?P<path>.*)"\s*,\s*"(?P<guid>.*)"$"#,
    )
    .expect("Invalid project line regex")
});

/// Fields of a project declaration line, trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectDecl<'a> {
    pub type_guid: &'a str,
    pub name: &'a str,
    pub path: &'a str,
    pub guid: &'a str,
}

impl<'a> ProjectDecl<'a> {
    /// Parse a project declaration line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = PROJECT_LINE_REGEX.captures(content(line).trim())?;
        let field = |name: &str| caps.name(name).map_or("", |m| m.as_str()).trim();
        Some(Self {
            type_guid: field("type"),
            name: field("name"),
            path: field("path"),
            guid: field("guid"),
        })
    }
}

/// One project block, from its declaration through `EndProject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord<'a> {
    pub decl: ProjectDecl<'a>,
    pub lines: Vec<&'a str>,
}

impl<'a> ProjectRecord<'a> {
    /// Project identifier used as the sort key.
    pub fn id(&self) -> &'a str {
        self.decl.guid
    }
}

/// One entry line of a reordered global subsection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionEntry<'a> {
    /// Project identifier the entry is sorted by
    pub key: &'a str,
    /// Property value: the parent id for nesting entries
    pub value: &'a str,
    pub line: &'a str,
}

/// A reordered global subsection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub header: &'a str,
    pub entries: Vec<SectionEntry<'a>>,
    pub footer: &'a str,
}

impl<'a> Section<'a> {
    /// Build a section from a block read through `EndGlobalSection`.
    ///
    /// `first_line` is the 1-based line number of the header.
    fn from_block(kind: SectionKind, block: &[&'a str], first_line: usize) -> Result<Self> {
        let (header, rest) = block.split_first().ok_or_else(|| Error::UnexpectedEof {
            expected: Keyword::EndGlobalSection.to_string(),
        })?;
        let (footer, inner) = rest.split_last().ok_or_else(|| Error::UnexpectedEof {
            expected: Keyword::EndGlobalSection.to_string(),
        })?;

        let entries = inner
            .iter()
            .enumerate()
            .map(|(offset, line)| Self::parse_entry(kind, line, first_line + 1 + offset))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind,
            header: *header,
            entries,
            footer: *footer,
        })
    }

    fn parse_entry(kind: SectionKind, line: &'a str, line_number: usize) -> Result<SectionEntry<'a>> {
        match kind {
            SectionKind::NestedProjects => {
                let property = parse_property(line)
                    .ok_or(Error::InvalidNestedProject { line: line_number })?;
                Ok(SectionEntry {
                    key: property.name,
                    value: property.value,
                    line,
                })
            }
            SectionKind::ProjectConfigurationPlatforms => {
                let invalid = || Error::InvalidConfigurationPlatform { line: line_number };
                let property = parse_property(line).ok_or_else(invalid)?;
                let (guid, _) = property.name.split_once('.').ok_or_else(invalid)?;
                Ok(SectionEntry {
                    key: guid,
                    value: property.value,
                    line,
                })
            }
        }
    }

    /// Whether the entries already follow `order`.
    pub fn is_sorted(&self, order: &ProjectOrder) -> bool {
        order.is_sorted_by_key(&self.entries, |entry| entry.key)
    }
}

/// A line of the global block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalItem<'a> {
    /// Copied verbatim, including lines of subsections that are not reordered
    Line(&'a str),
    /// A reordered subsection
    Section(Section<'a>),
}

/// A parsed solution file.
///
/// Lines keep their relative order within each field. Pass-through lines are
/// collected in `preamble` wherever they appear, because they are written
/// before any buffered block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution<'a> {
    pub header: Vec<&'a str>,
    pub preamble: Vec<&'a str>,
    pub projects: Vec<ProjectRecord<'a>>,
    pub global: Vec<GlobalItem<'a>>,
}

impl<'a> Solution<'a> {
    /// Parse decoded solution text.
    ///
    /// # Errors
    ///
    /// Returns a data-format error for a missing header, a malformed project
    /// line, a malformed entry of a reordered subsection, or an unterminated
    /// block.
    pub fn parse(text: &'a str) -> Result<Self> {
        let mut cursor = LineCursor::new(text);
        let mut solution = Solution {
            header: Self::parse_header(&mut cursor)?,
            ..Default::default()
        };

        while let Some(line) = cursor.next_line() {
            match classify(line) {
                LineKind::ProjectStart => {
                    let record = Self::parse_project(&mut cursor, line)?;
                    tracing::debug!(
                        name = record.decl.name,
                        guid = record.decl.guid,
                        "Parsed project"
                    );
                    solution.projects.push(record);
                }
                LineKind::GlobalStart => Self::parse_global(&mut cursor, line, &mut solution.global)?,
                LineKind::PassThrough => solution.preamble.push(line),
            }
        }

        Ok(solution)
    }

    fn parse_header(cursor: &mut LineCursor<'a>) -> Result<Vec<&'a str>> {
        let mut header = Vec::with_capacity(HEADER_SCAN_LINES);
        while header.len() < HEADER_SCAN_LINES {
            let Some(line) = cursor.next_line() else {
                break;
            };
            header.push(line);
            if content(line).trim().starts_with(HEADER_BANNER) {
                return Ok(header);
            }
        }
        Err(Error::MissingHeader)
    }

    fn parse_project(cursor: &mut LineCursor<'a>, start: &'a str) -> Result<ProjectRecord<'a>> {
        let decl = ProjectDecl::parse(start).ok_or(Error::InvalidProject {
            line: cursor.line_number(),
        })?;
        let lines = read_block(cursor, start, Keyword::EndProject)?;
        Ok(ProjectRecord { decl, lines })
    }

    fn parse_global(
        cursor: &mut LineCursor<'a>,
        start: &'a str,
        items: &mut Vec<GlobalItem<'a>>,
    ) -> Result<()> {
        items.push(GlobalItem::Line(start));
        loop {
            let line = cursor.next_line().ok_or_else(|| Error::UnexpectedEof {
                expected: Keyword::EndGlobal.to_string(),
            })?;

            if Keyword::EndGlobal.matches(content(line).trim()) {
                items.push(GlobalItem::Line(line));
                return Ok(());
            }

            match section_header(line) {
                Some(kind) => {
                    let first_line = cursor.line_number();
                    let block = read_block(cursor, line, Keyword::EndGlobalSection)?;
                    let section = Section::from_block(kind, &block, first_line)?;
                    tracing::debug!(?kind, entries = section.entries.len(), "Parsed section");
                    items.push(GlobalItem::Section(section));
                }
                None => items.push(GlobalItem::Line(line)),
            }
        }
    }

    /// Reordered subsections of the global block, in file order.
    pub fn sections(&self) -> impl Iterator<Item = &Section<'a>> {
        self.global.iter().filter_map(|item| match item {
            GlobalItem::Section(section) => Some(section),
            GlobalItem::Line(_) => None,
        })
    }

    /// Feed every project and nesting entry to a fresh builder.
    pub fn order_builder(&self) -> OrderBuilder {
        let mut builder = OrderBuilder::new();
        for project in &self.projects {
            builder.set_project_info(project.id(), project.decl.type_guid, project.decl.name);
        }
        for section in self.sections() {
            if section.kind != SectionKind::NestedProjects {
                continue;
            }
            for entry in &section.entries {
                builder.set_project_parent(entry.key, entry.value);
            }
        }
        builder
    }

    /// Compute the canonical order of this solution's projects.
    pub fn project_order(&self) -> Result<ProjectOrder> {
        self.order_builder().build()
    }

    /// Whether projects and reordered subsections already follow `order`.
    pub fn is_sorted(&self, order: &ProjectOrder) -> bool {
        order.is_sorted_by_key(&self.projects, |project| project.id())
            && self.sections().all(|section| section.is_sorted(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "Microsoft Visual Studio Solution File, Format Version 12.00\r\n";

    #[test]
    fn parses_project_declaration() {
        let decl = ProjectDecl::parse(
            "Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"App\", \"src\\App\\App.csproj\", \"{05A5AD00-71B5-4612-AF2F-9EA9121C4111}\"\r\n",
        )
        .unwrap();

        assert_eq!(decl.type_guid, "{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}");
        assert_eq!(decl.name, "App");
        assert_eq!(decl.path, "src\\App\\App.csproj");
        assert_eq!(decl.guid, "{05A5AD00-71B5-4612-AF2F-9EA9121C4111}");
    }

    #[test]
    fn project_declaration_tolerates_spacing() {
        let decl = ProjectDecl::parse("Project(\"{T}\")=\" A \" ,\"p\",  \"{G}\"").unwrap();
        assert_eq!(decl.name, "A");
        assert_eq!(decl.guid, "{G}");
    }

    #[test]
    fn malformed_project_declaration_is_none() {
        assert_eq!(ProjectDecl::parse("Project(\"{T}\") = \"A\", \"p\""), None);
    }

    #[test]
    fn header_on_second_line() {
        let text = format!("\r\n{HEADER}# Visual Studio 17\r\n");
        let solution = Solution::parse(&text).unwrap();
        assert_eq!(solution.header, vec!["\r\n", HEADER]);
        assert_eq!(solution.preamble, vec!["# Visual Studio 17\r\n"]);
    }

    #[test]
    fn header_on_first_line_leaves_second_alone() {
        let text = format!("{HEADER}Global\r\nEndGlobal\r\n");
        let solution = Solution::parse(&text).unwrap();
        assert_eq!(solution.header, vec![HEADER]);
        assert_eq!(solution.global.len(), 2);
    }

    #[test]
    fn header_on_third_line_is_missing() {
        let text = format!("\r\n\r\n{HEADER}");
        assert!(matches!(Solution::parse(&text), Err(Error::MissingHeader)));
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(Solution::parse(""), Err(Error::MissingHeader)));
    }

    #[test]
    fn unterminated_project_is_an_error() {
        let text = format!("{HEADER}Project(\"{{T}}\") = \"A\", \"A\", \"{{1}}\"\r\n");
        assert!(matches!(
            Solution::parse(&text),
            Err(Error::UnexpectedEof { ref expected }) if expected == "EndProject"
        ));
    }

    #[test]
    fn malformed_project_reports_line() {
        let text = format!("{HEADER}\r\nProject(\"{{T}}\") = \"A\"\r\nEndProject\r\n");
        assert!(matches!(
            Solution::parse(&text),
            Err(Error::InvalidProject { line: 3 })
        ));
    }

    #[test]
    fn nested_entry_without_equals_is_an_error() {
        let text = format!(
            "{HEADER}Global\r\n\tGlobalSection(NestedProjects) = preSolution\r\n\t\t{{1}}\r\n\tEndGlobalSection\r\nEndGlobal\r\n"
        );
        assert!(matches!(
            Solution::parse(&text),
            Err(Error::InvalidNestedProject { line: 4 })
        ));
    }

    #[test]
    fn configuration_entry_without_dot_is_an_error() {
        let text = format!(
            "{HEADER}Global\r\n\tGlobalSection(ProjectConfigurationPlatforms) = postSolution\r\n\t\t{{1}} = Debug\r\n\tEndGlobalSection\r\nEndGlobal\r\n"
        );
        assert!(matches!(
            Solution::parse(&text),
            Err(Error::InvalidConfigurationPlatform { line: 4 })
        ));
    }

    #[test]
    fn other_sections_stay_plain_lines() {
        let text = format!(
            "{HEADER}Global\r\n\tGlobalSection(SolutionProperties) = preSolution\r\n\t\tHideSolutionNode = FALSE\r\n\tEndGlobalSection\r\nEndGlobal\r\n"
        );
        let solution = Solution::parse(&text).unwrap();
        assert_eq!(solution.sections().count(), 0);
        assert_eq!(solution.global.len(), 5);
    }

    #[test]
    fn configuration_entries_are_keyed_by_guid() {
        let text = format!(
            "{HEADER}Global\r\n\tGlobalSection(ProjectConfigurationPlatforms) = postSolution\r\n\t\t{{1}}.Debug|Any CPU.ActiveCfg = Debug|Any CPU\r\n\tEndGlobalSection\r\nEndGlobal\r\n"
        );
        let solution = Solution::parse(&text).unwrap();
        let section = solution.sections().next().unwrap();

        assert_eq!(section.kind, SectionKind::ProjectConfigurationPlatforms);
        assert_eq!(section.entries[0].key, "{1}");
        assert_eq!(section.entries[0].value, "Debug|Any CPU");
        assert_eq!(
            section.entries[0].line,
            "\t\t{1}.Debug|Any CPU.ActiveCfg = Debug|Any CPU\r\n"
        );
    }

    #[test]
    fn nesting_feeds_the_builder() {
        let text = format!(
            "{HEADER}Project(\"{{2150E333-8FDC-42A3-9474-1A3956D46DE8}}\") = \"Tests\", \"Tests\", \"{{f}}\"\r\nEndProject\r\n\
             Project(\"{{T}}\") = \"Alpha\", \"Alpha.csproj\", \"{{a}}\"\r\nEndProject\r\n\
             Project(\"{{T}}\") = \"Zulu\", \"Zulu.csproj\", \"{{z}}\"\r\nEndProject\r\n\
             Global\r\n\tGlobalSection(NestedProjects) = preSolution\r\n\t\t{{z}} = {{f}}\r\n\tEndGlobalSection\r\nEndGlobal\r\n"
        );
        let solution = Solution::parse(&text).unwrap();
        let order = solution.project_order().unwrap();

        assert_eq!(order.rank("{f}"), Some(0));
        assert_eq!(order.rank("{z}"), Some(1));
        assert_eq!(order.rank("{a}"), Some(2));
        assert!(!solution.is_sorted(&order));
    }
}
