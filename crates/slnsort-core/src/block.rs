//! Block reading: a start line through its terminator keyword.

use crate::constants::Keyword;
use crate::line::{LineCursor, content};
use crate::{Error, Result};

/// Read lines after `start` up to and including the first line that trims to
/// `end`.
///
/// The returned block holds `start` first and the terminator last, all verbatim.
///
/// # Errors
///
/// Returns [`Error::UnexpectedEof`] if the input ends before the terminator.
pub fn read_block<'a>(
    cursor: &mut LineCursor<'a>,
    start: &'a str,
    end: Keyword,
) -> Result<Vec<&'a str>> {
    let mut lines = vec![start];
    loop {
        let line = cursor.next_line().ok_or_else(|| Error::UnexpectedEof {
            expected: end.to_string(),
        })?;
        lines.push(line);
        if end.matches(content(line).trim()) {
            return Ok(lines);
        }
    }
}
