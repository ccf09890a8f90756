//! FILENAME: cells-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("column order can't be a bare string: {0:?}")]
    BareStringOrder(String),

    #[error("column title {0} is not in defaults")]
    UnknownColumn(String),

    #[error("you have extra keys: {} in your data that are not in your defaults", .0.join(","))]
    ExtraKeys(Vec<String>),

    #[error("column index {index} is out of bounds for a matrix with {columns} columns")]
    ColumnIndexOutOfBounds { index: usize, columns: usize },
}

/// Errors raised while loading a table definition from JSON.
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid definition: {0}")]
    Validation(#[from] ValidationError),
}
