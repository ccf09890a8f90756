//! FILENAME: cells-engine/src/matrix.rs
//! PURPOSE: The cells matrix (header + rows) and the operations on a built matrix.
//! CONTEXT: A `CellsMatrix` is only produced by `build_cells` and is never
//! modified afterwards. Sorting and re-ordering return new matrices.
//! Re-ordering goes back through the builder so validation and default
//! filling are applied exactly as on first construction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::builder::{build_cells, Defaults, Record};
use crate::error::ValidationError;
use crate::order::ColumnOrder;
use crate::value::CellValue;

/// One resolved column: its title and the value used when a record lacks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub title: String,
    pub default_value: CellValue,
}

/// Header row plus data rows. Every row has exactly `header.len()` values,
/// positionally aligned to the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellsMatrix {
    header: Vec<ColumnHeader>,
    rows: Vec<Vec<CellValue>>,
}

/// Direction for sorting a column by the natural value ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Ascending
    }
}

impl CellsMatrix {
    pub(crate) fn from_parts(header: Vec<ColumnHeader>, rows: Vec<Vec<CellValue>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == header.len()));
        CellsMatrix { header, rows }
    }

    pub fn header(&self) -> &[ColumnHeader] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column with the given title.
    pub fn column_index(&self, title: &str) -> Option<usize> {
        self.header.iter().position(|h| h.title == title)
    }

    /// Title -> default value for every header, rebuilt from the header row.
    pub fn defaults(&self) -> Defaults {
        self.header
            .iter()
            .map(|h| (h.title.clone(), h.default_value.clone()))
            .collect()
    }

    /// Turns each row back into a record keyed by the current header order.
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.header
                    .iter()
                    .zip(row)
                    .map(|(h, value)| (h.title.clone(), value.clone()))
                    .collect()
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Titles of the header row, in matrix order.
pub fn get_column_titles(matrix: &CellsMatrix) -> Vec<String> {
    matrix.header.iter().map(|h| h.title.clone()).collect()
}

/// The data rows, without the header, in their current order.
pub fn get_data(matrix: &CellsMatrix) -> &[Vec<CellValue>] {
    &matrix.rows
}

/// Returns a new matrix whose rows are sorted by the values in `col_index`.
///
/// The sort is stable: rows whose values compare equal keep their relative
/// order. The comparator must be a total order.
///
/// # Errors
/// `ColumnIndexOutOfBounds` if `col_index` is not a valid header column.
pub fn sort_column<F>(
    matrix: &CellsMatrix,
    col_index: usize,
    compare: F,
) -> Result<CellsMatrix, ValidationError>
where
    F: Fn(&CellValue, &CellValue) -> Ordering,
{
    let columns = matrix.column_count();
    if col_index >= columns {
        return Err(ValidationError::ColumnIndexOutOfBounds {
            index: col_index,
            columns,
        });
    }

    let mut rows = matrix.rows.clone();
    rows.sort_by(|lhs, rhs| compare(&lhs[col_index], &rhs[col_index]));

    log::trace!("sorted {} rows by column {}", rows.len(), col_index);
    Ok(CellsMatrix::from_parts(matrix.header.clone(), rows))
}

/// `sort_column` with the natural value ordering (see `CellValue::natural_cmp`).
pub fn sort_column_by_order(
    matrix: &CellsMatrix,
    col_index: usize,
    sort_order: SortOrder,
) -> Result<CellsMatrix, ValidationError> {
    match sort_order {
        SortOrder::Ascending => sort_column(matrix, col_index, |a, b| a.natural_cmp(b)),
        SortOrder::Descending => sort_column(matrix, col_index, |a, b| b.natural_cmp(a)),
    }
}

/// Rebuilds `matrix` with a different column order.
///
/// Defaults come from the header, records from the rows, and both go back
/// through `build_cells` with the new `order`.
pub fn change_column_ordering(
    matrix: &CellsMatrix,
    order: Option<&ColumnOrder>,
) -> Result<CellsMatrix, ValidationError> {
    build_cells(&matrix.to_records(), &matrix.defaults(), order)
}
