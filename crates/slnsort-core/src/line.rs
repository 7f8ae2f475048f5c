//! Line classification and key/value parsing.
//!
//! Lines are handled as slices of the decoded input that still carry their
//! terminator, so they can be written back byte for byte. Every structural
//! decision looks at the trimmed content instead.

use crate::constants::{Keyword, PROJECT_PREFIX, SectionKind};

/// Top-level category of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts a project block
    ProjectStart,
    /// Starts the global block
    GlobalStart,
    /// Copied to the output as is
    PassThrough,
}

/// Classify a top-level line.
pub fn classify(line: &str) -> LineKind {
    let trimmed = content(line).trim();
    if trimmed.starts_with(PROJECT_PREFIX) {
        LineKind::ProjectStart
    } else if Keyword::Global.matches(trimmed) {
        LineKind::GlobalStart
    } else {
        LineKind::PassThrough
    }
}

/// The line without its terminator.
pub fn content(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// The terminator of the line, empty for an unterminated last line.
pub fn terminator(line: &str) -> &str {
    &line[content(line).len()..]
}

/// A `name = value` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Split a line at its first `=`, trimming both sides.
///
/// Returns `None` when the line holds no `=`.
pub fn parse_property(line: &str) -> Option<Property<'_>> {
    let (name, value) = content(line).trim().split_once('=')?;
    Some(Property {
        name: name.trim(),
        value: value.trim(),
    })
}

/// Recognize a reordered global subsection from its header line.
pub fn section_header(line: &str) -> Option<SectionKind> {
    parse_property(line).and_then(|property| SectionKind::from_header_name(property.name))
}

/// Cursor over the lines of a text, each returned with its terminator.
///
/// `\r\n`, `\n` and a lone `\r` all end a line.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    rest: &'a str,
    line_number: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            line_number: 0,
        }
    }

    /// 1-based number of the line last returned, 0 before the first.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Advance past the next line.
    pub fn next_line(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let end = match self.rest.find(|c: char| c == '\r' || c == '\n') {
            Some(i) if self.rest[i..].starts_with("\r\n") => i + 2,
            Some(i) => i + 1,
            None => self.rest.len(),
        };
        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        self.line_number += 1;
        Some(line)
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Project(\"{A}\") = \"App\", \"App.csproj\", \"{B}\"\r\n", LineKind::ProjectStart)]
    #[case("  Project(\"{A}\")\n", LineKind::ProjectStart)]
    #[case("Global\r\n", LineKind::GlobalStart)]
    #[case("\tGlobal  ", LineKind::GlobalStart)]
    #[case("GlobalSection(NestedProjects) = preSolution\n", LineKind::PassThrough)]
    #[case("EndProject\n", LineKind::PassThrough)]
    #[case("# Visual Studio Version 17\n", LineKind::PassThrough)]
    #[case("", LineKind::PassThrough)]
    fn classifies_lines(#[case] line: &str, #[case] expected: LineKind) {
        assert_eq!(classify(line), expected);
    }

    #[rstest]
    #[case("a\r\n", "a", "\r\n")]
    #[case("a\n", "a", "\n")]
    #[case("a\r", "a", "\r")]
    #[case("a", "a", "")]
    #[case("\r\n", "", "\r\n")]
    fn splits_terminator(#[case] line: &str, #[case] body: &str, #[case] end: &str) {
        assert_eq!(content(line), body);
        assert_eq!(terminator(line), end);
    }

    #[test]
    fn property_splits_at_first_equals() {
        let property = parse_property("\t\t{A}.Debug|x86.ActiveCfg = Debug|x86 = odd\r\n").unwrap();
        assert_eq!(property.name, "{A}.Debug|x86.ActiveCfg");
        assert_eq!(property.value, "Debug|x86 = odd");
    }

    #[test]
    fn property_without_equals_is_none() {
        assert_eq!(parse_property("EndGlobalSection"), None);
    }

    #[test]
    fn property_allows_empty_sides() {
        let property = parse_property("=").unwrap();
        assert_eq!(property.name, "");
        assert_eq!(property.value, "");
    }

    #[rstest]
    #[case("\tGlobalSection(NestedProjects) = preSolution\r\n", Some(SectionKind::NestedProjects))]
    #[case(
        "GlobalSection(ProjectConfigurationPlatforms)=postSolution",
        Some(SectionKind::ProjectConfigurationPlatforms)
    )]
    #[case("\tGlobalSection(SolutionProperties) = preSolution\r\n", None)]
    #[case("\tGlobalSection(NestedProjects)\r\n", None)]
    fn recognizes_section_headers(#[case] line: &str, #[case] expected: Option<SectionKind>) {
        assert_eq!(section_header(line), expected);
    }

    #[test]
    fn cursor_keeps_every_terminator() {
        let lines: Vec<&str> = LineCursor::new("a\r\nb\nc\rd").collect();
        assert_eq!(lines, vec!["a\r\n", "b\n", "c\r", "d"]);
        assert_eq!(lines.concat(), "a\r\nb\nc\rd");
    }

    #[test]
    fn cursor_counts_lines() {
        let mut cursor = LineCursor::new("a\n\nb\n");
        assert_eq!(cursor.line_number(), 0);
        cursor.next_line();
        cursor.next_line();
        assert_eq!(cursor.next_line(), Some("b\n"));
        assert_eq!(cursor.line_number(), 3);
        assert_eq!(cursor.next_line(), None);
        assert_eq!(cursor.line_number(), 3);
    }
}
