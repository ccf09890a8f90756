//! FILENAME: cells-engine/src/lib.rs
//! Cells matrix engine.
//!
//! Normalizes a list of heterogeneous records into a uniform table: a header
//! row plus data rows, where every row has the same ordered columns and
//! missing fields are filled with per-column defaults.
//!
//! Layers:
//! - `value`: the field value type (`CellValue`)
//! - `order`: column order resolution (explicit list or comparator)
//! - `builder`: records + defaults -> `CellsMatrix`
//! - `matrix`: querying, sorting and re-ordering a built matrix
//! - `definition`: serializable table configuration (JSON boundary)

pub mod builder;
pub mod definition;
pub mod error;
pub mod matrix;
pub mod order;
pub mod value;

pub use builder::{build_cells, Defaults, Record};
pub use definition::{records_from_json, TableDefinition};
pub use error::{DefinitionError, ValidationError};
pub use matrix::{
    change_column_ordering, get_column_titles, get_data, sort_column, sort_column_by_order,
    CellsMatrix, ColumnHeader, SortOrder,
};
pub use order::{resolve_column_order, ColumnOrder, TitleComparator};
pub use value::CellValue;
