//! FILENAME: cells-engine/src/definition.rs
//! Table Definition - the serializable configuration of a cells matrix.
//!
//! Holds everything needed to DESCRIBE a table: the column defaults (which
//! also fix the column set and default order) and an optional explicit
//! column order. Comparator orders are code, not data, so they are only
//! available through `build_cells` directly.
//!
//! JSON layout:
//! ```json
//! { "defaults": { "name": "", "age": 0 }, "order": ["age"] }
//! ```

use serde::{Deserialize, Serialize};

use crate::builder::{build_cells, Defaults, Record};
use crate::error::{DefinitionError, ValidationError};
use crate::matrix::CellsMatrix;
use crate::order::{titles_from_json, ColumnOrder};
use crate::value::CellValue;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDefinition {
    pub defaults: Defaults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
}

/// Loosely typed shape read from JSON; `order` is validated afterwards so a
/// bare string is reported as a validation error rather than a type error.
#[derive(Deserialize)]
struct RawTableDefinition {
    defaults: Defaults,
    #[serde(default)]
    order: Option<serde_json::Value>,
}

impl TableDefinition {
    pub fn new(defaults: Defaults) -> Self {
        TableDefinition {
            defaults,
            order: None,
        }
    }

    pub fn with_order<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(titles.into_iter().map(Into::into).collect());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let raw: RawTableDefinition = serde_json::from_str(json)?;
        let order = raw.order.as_ref().map(titles_from_json).transpose()?;
        Ok(TableDefinition {
            defaults: raw.defaults,
            order,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn column_order(&self) -> Option<ColumnOrder> {
        self.order.clone().map(ColumnOrder::Explicit)
    }

    /// Builds a matrix from `records` with this definition's defaults and order.
    pub fn build(&self, records: &[Record]) -> Result<CellsMatrix, ValidationError> {
        build_cells(records, &self.defaults, self.column_order().as_ref())
    }
}

/// Parses a JSON array of objects into records, keeping each object's key order.
pub fn records_from_json(json: &str) -> Result<Vec<Record>, DefinitionError> {
    let raw: Vec<indexmap::IndexMap<String, serde_json::Value>> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|object| {
            object
                .into_iter()
                .map(|(key, value)| (key, CellValue::from(value)))
                .collect()
        })
        .collect())
}
