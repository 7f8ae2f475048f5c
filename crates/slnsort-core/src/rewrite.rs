//! Rendering a parsed solution in canonical order.

use crate::Result;
use crate::line::{LineCursor, terminator};
use crate::order::ProjectOrder;
use crate::solution::{GlobalItem, Section, Solution};

/// Terminator used when no line of the input has one.
const DEFAULT_NEWLINE: &str = "\r\n";

/// Result of sorting solution text in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    /// Canonically ordered text
    pub text: String,
    /// Whether the input already was in canonical order
    pub already_sorted: bool,
}

/// Sort the projects of solution text and the subsections that follow them.
///
/// # Errors
///
/// Returns a data-format error if the text is not a well-formed solution.
pub fn sort_text(text: &str) -> Result<SortOutcome> {
    let solution = Solution::parse(text)?;
    let order = solution.project_order()?;
    let already_sorted = solution.is_sorted(&order);

    for section in solution.sections() {
        for entry in &section.entries {
            if order.rank(entry.key).is_none() {
                tracing::warn!(
                    key = entry.key,
                    section = section.kind.header_name(),
                    "Entry refers to an unknown project"
                );
            }
        }
    }

    Ok(SortOutcome {
        text: render(&solution, &order, dominant_newline(text)),
        already_sorted,
    })
}

/// Terminator of the first terminated line.
pub fn dominant_newline(text: &str) -> &str {
    LineCursor::new(text)
        .map(terminator)
        .find(|end| !end.is_empty())
        .unwrap_or(DEFAULT_NEWLINE)
}

/// Write `solution` with projects and reordered subsections in `order`.
///
/// Header and pass-through lines come first, then the project blocks, then the
/// global block.
pub fn render(solution: &Solution<'_>, order: &ProjectOrder, newline: &str) -> String {
    let mut out = Output::new(newline);

    out.extend(&solution.header);
    out.extend(&solution.preamble);

    let mut projects: Vec<_> = solution.projects.iter().collect();
    order.sort_by_key(&mut projects, |project| project.id());
    for project in projects {
        out.extend(&project.lines);
    }

    for item in &solution.global {
        match item {
            GlobalItem::Line(line) => out.push(line),
            GlobalItem::Section(section) => render_section(&mut out, section, order),
        }
    }

    out.finish()
}

fn render_section(out: &mut Output<'_>, section: &Section<'_>, order: &ProjectOrder) {
    let mut entries: Vec<_> = section.entries.iter().collect();
    order.sort_by_key(&mut entries, |entry| entry.key);

    out.push(section.header);
    for entry in entries {
        out.push(entry.line);
    }
    out.push(section.footer);
}

/// Line sink that keeps moved lines from fusing.
///
/// Only the last line of the input can lack a terminator. If such a line is
/// followed by more output, `newline` is inserted after it.
struct Output<'n> {
    text: String,
    newline: &'n str,
    open_line: bool,
}

impl<'n> Output<'n> {
    fn new(newline: &'n str) -> Self {
        Self {
            text: String::new(),
            newline,
            open_line: false,
        }
    }

    fn push(&mut self, line: &str) {
        if self.open_line {
            self.text.push_str(self.newline);
        }
        self.text.push_str(line);
        self.open_line = terminator(line).is_empty();
    }

    fn extend(&mut self, lines: &[&str]) {
        for line in lines {
            self.push(line);
        }
    }

    fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn newline_follows_first_terminated_line() {
        assert_eq!(dominant_newline("a\nb\r\n"), "\n");
        assert_eq!(dominant_newline("a\r\nb\n"), "\r\n");
        assert_eq!(dominant_newline("no newline"), "\r\n");
    }

    #[test]
    fn open_line_gets_terminated_when_followed() {
        let mut out = Output::new("\n");
        out.push("last");
        out.push("next\n");
        out.push("tail");
        assert_eq!(out.finish(), "last\nnext\ntail");
    }
}
