//! The four puzzle domains and the small parsing helpers they share.

pub mod clock;
pub mod hoppers;
pub mod jam;
pub mod water;

use std::str::SplitWhitespace;

use crate::error::PuzzleError;

/// Cell coordinate on a grid puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset by a signed delta, `None` if that leaves the `rows x cols` grid.
    pub fn offset(self, dr: isize, dc: isize, rows: usize, cols: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Position { row, col })
    }
}

/// Line cursor over a puzzle file that remembers line numbers for errors.
pub(crate) struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    line: usize,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            line: 0,
        }
    }

    /// Next non-blank line, split on whitespace.
    pub(crate) fn next_fields(
        &mut self,
        expected: &'static str,
    ) -> Result<(usize, SplitWhitespace<'a>), PuzzleError> {
        for (i, text) in self.inner.by_ref() {
            self.line = i + 1;
            if !text.trim().is_empty() {
                return Ok((self.line, text.split_whitespace()));
            }
        }
        Err(PuzzleError::MissingField {
            line: self.line + 1,
            expected,
        })
    }
}

pub(crate) fn parse_number(
    field: Option<&str>,
    line: usize,
    expected: &'static str,
) -> Result<usize, PuzzleError> {
    let field = field.ok_or(PuzzleError::MissingField { line, expected })?;
    field.parse().map_err(|_| PuzzleError::InvalidNumber {
        line,
        value: field.to_string(),
    })
}

/// Reads the `rows cols` header shared by the grid puzzle files.
pub(crate) fn parse_dimensions(lines: &mut Lines<'_>) -> Result<(usize, usize), PuzzleError> {
    let (line, mut fields) = lines.next_fields("board dimensions")?;
    let rows = parse_number(fields.next(), line, "row count")?;
    let cols = parse_number(fields.next(), line, "column count")?;
    if rows == 0 || cols == 0 {
        return Err(PuzzleError::EmptyBoard);
    }
    Ok((rows, cols))
}

/// Renders a grid one row per line, cells separated by spaces.
pub(crate) fn render_grid(rows: usize, cols: usize, cell: impl Fn(usize, usize) -> char) -> String {
    let mut out = String::with_capacity(rows * (cols * 2 + 1));
    for row in 0..rows {
        for col in 0..cols {
            if col > 0 {
                out.push(' ');
            }
            out.push(cell(row, col));
        }
        out.push('\n');
    }
    out
}
