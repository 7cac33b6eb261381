//! Table grid assembly.
//!
//! The analysis service reports each table as a flat list of cells carrying
//! row/column indices plus a table-level column count. [`assemble_table`]
//! places those cells into a rectangular grid of strings, filling gaps with
//! empty strings.
//!
//! Cells are pre-partitioned into tables by the caller; one call processes
//! one table.

use crate::layout::LayoutWarning;
use serde::{Deserialize, Serialize};

/// Sanity bound on grid dimensions.
///
/// Indices at or beyond this bound are treated as a data-quality error and
/// rejected instead of growing the grid without limit.
pub const MAX_GRID_DIM: usize = 10_000;

/// One detected table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableCell {
    /// Zero-based row position in the table grid
    pub row_index: usize,
    /// Zero-based column position in the table grid
    pub column_index: usize,
    /// One-based page number the cell was detected on
    pub page: u32,
    /// Cell text content
    pub content: String,
}

impl TableCell {
    /// Create a new table cell
    #[inline]
    #[must_use = "table cell is created but not used"]
    pub const fn new(row_index: usize, column_index: usize, page: u32, content: String) -> Self {
        Self {
            row_index,
            column_index,
            page,
            content,
        }
    }
}

/// A reconstructed rectangular table: rows of cell text, every row
/// `column_count` entries wide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    /// Row-major cell text
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of rows
    #[inline]
    #[must_use = "row count is returned but not used"]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (width of the first row; all rows share it)
    #[inline]
    #[must_use = "column count is returned but not used"]
    pub fn num_cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Whether the table has no rows
    #[inline]
    #[must_use = "emptiness check result is returned but not used"]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text at (row, column), if in range
    #[inline]
    #[must_use = "cell lookup result is returned but not used"]
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Result of [`assemble_table`]: the grid plus any rejected-cell warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOutcome {
    /// The assembled rectangular grid
    pub table: Table,
    /// Cells skipped for data-quality reasons
    pub warnings: Vec<LayoutWarning>,
}

/// Assemble one table's cells into a rectangular grid.
///
/// The grid is `(1 + max accepted row_index)` rows by `column_count`
/// columns, initialized to empty strings. Each cell's content lands at its
/// `(row_index, column_index)` position; later cells at the same position
/// overwrite earlier ones, since the service's cell stream is not
/// guaranteed conflict-free.
///
/// Cells whose column index is at or beyond `column_count`, or whose row
/// index is at or beyond [`MAX_GRID_DIM`], are rejected with a warning and
/// the rest of the table is still assembled. A `column_count` beyond the
/// bound downgrades the whole table to an empty grid.
///
/// No cells with `column_count = 0` yields an empty grid.
#[must_use = "assembled table is computed but not used"]
pub fn assemble_table(cells: &[TableCell], column_count: usize) -> TableOutcome {
    if column_count > MAX_GRID_DIM {
        log::warn!("dropping table declaring {column_count} columns (bound {MAX_GRID_DIM})");
        return TableOutcome {
            table: Table::default(),
            warnings: vec![LayoutWarning::OversizedGrid { column_count }],
        };
    }

    let mut warnings = Vec::new();
    let mut accepted = Vec::with_capacity(cells.len());
    let mut num_rows = 0;

    for cell in cells {
        if cell.column_index >= column_count || cell.row_index >= MAX_GRID_DIM {
            log::warn!(
                "skipping table cell with out-of-range index ({}, {})",
                cell.row_index,
                cell.column_index
            );
            warnings.push(LayoutWarning::InvalidIndex {
                row_index: cell.row_index,
                column_index: cell.column_index,
            });
            continue;
        }

        num_rows = num_rows.max(cell.row_index + 1);
        accepted.push(cell);
    }

    let mut rows = vec![vec![String::new(); column_count]; num_rows];
    for cell in accepted {
        rows[cell.row_index][cell.column_index] = cell.content.clone();
    }

    TableOutcome {
        table: Table { rows },
        warnings,
    }
}
