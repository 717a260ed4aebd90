//! Pipe-delimited line table parsing.
//!
//! Report chunks carry tables in a loose markdown style:
//!
//! ```text
//! | Ore type | Measured Mt | Measured %Cu |
//! |---|---|---|
//! | Sulphide Cu | 1,440 | 1.85 |
//! ```
//!
//! The first non-empty line is the header and the second is a separator
//! that is skipped without inspection. Header labels are split on `"| "`
//! while data rows are split on a bare `|`. Empty cells are dropped in both
//! cases, so a blank cell shifts the cells after it one column left.

use crate::ExtractError;

/// Delimiter between header labels.
pub const HEADER_DELIMITER: &str = "| ";

/// Delimiter between data row cells.
pub const CELL_DELIMITER: char = '|';

/// Header, separator, and at least one data row.
pub const MIN_LINES: usize = 3;

/// A data row of a [`LineTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow<'a> {
    /// 1-based position of the row among the table's non-empty lines.
    pub line: usize,
    /// Trimmed, non-empty cells in column order.
    pub cells: Vec<&'a str>,
}

impl<'a> TableRow<'a> {
    /// Returns the cell at `index`, if the row is wide enough.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&'a str> {
        self.cells.get(index).copied()
    }

    /// Number of cells in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A parsed line table borrowing from the record text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable<'a> {
    headers: Vec<&'a str>,
    rows: Vec<TableRow<'a>>,
}

impl<'a> LineTable<'a> {
    /// Parses `text` into a header and data rows.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MalformedTable`] if `text` has fewer than
    /// [`MIN_LINES`] non-empty lines.
    pub fn parse(text: &'a str) -> Result<Self, ExtractError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() < MIN_LINES {
            return Err(ExtractError::MalformedTable { lines: lines.len() });
        }

        let headers = split_header(lines[0]);

        let rows = lines
            .iter()
            .copied()
            .enumerate()
            .skip(2)
            .map(|(i, line)| TableRow {
                line: i + 1,
                cells: split_cells(line),
            })
            .collect::<Vec<_>>();

        log::trace!(
            "Parsed line table: {} headers, {} data rows",
            headers.len(),
            rows.len()
        );

        Ok(Self { headers, rows })
    }

    /// Header labels in column order.
    #[must_use]
    pub fn headers(&self) -> &[&'a str] {
        &self.headers
    }

    /// Data rows in document order (header and separator excluded).
    #[must_use]
    pub fn rows(&self) -> &[TableRow<'a>] {
        &self.rows
    }
}

fn split_header(line: &str) -> Vec<&str> {
    line.split(HEADER_DELIMITER)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .collect()
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split(CELL_DELIMITER)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}
