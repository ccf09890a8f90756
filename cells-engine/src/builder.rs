//! FILENAME: cells-engine/src/builder.rs
//! PURPOSE: Builds a cells matrix out of heterogeneous records.
//! CONTEXT: The defaults map is the canonical column set. Every record is
//! copied into a working snapshot, completed with defaults and then laid out
//! in resolved column order, so each row is exactly as wide as the header.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::error::ValidationError;
use crate::matrix::{CellsMatrix, ColumnHeader};
use crate::order::{resolve_column_order, ColumnOrder};
use crate::value::CellValue;

/// One input data item: column title -> value, in the record's own key order.
pub type Record = IndexMap<String, CellValue>;

/// Column title -> default value. Key order is the default column order.
pub type Defaults = IndexMap<String, CellValue>;

/// Builds a cells matrix from `records`.
///
/// # Errors
/// - `UnknownColumn` if an explicit order names a title missing from `defaults`.
/// - `ExtraKeys` if a record has more keys than there are resolved columns;
///   the error lists every record key that is not a column.
pub fn build_cells(
    records: &[Record],
    defaults: &Defaults,
    order: Option<&ColumnOrder>,
) -> Result<CellsMatrix, ValidationError> {
    let default_keys: Vec<String> = defaults.keys().cloned().collect();
    let columns = resolve_column_order(&default_keys, order)?;

    let header: Vec<ColumnHeader> = columns
        .iter()
        .map(|title| ColumnHeader {
            title: title.clone(),
            default_value: default_for(defaults, title),
        })
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        rows.push(build_row(record, defaults, &columns)?);
    }

    log::debug!(
        "built cells matrix: {} columns, {} rows",
        header.len(),
        rows.len()
    );
    Ok(CellsMatrix::from_parts(header, rows))
}

/// Lays one record out in column order, filling gaps from `defaults`.
fn build_row(
    record: &Record,
    defaults: &Defaults,
    columns: &[String],
) -> Result<Vec<CellValue>, ValidationError> {
    if record.len() > columns.len() {
        let known: FxHashSet<&str> = columns.iter().map(String::as_str).collect();
        let extra: Vec<String> = record
            .keys()
            .filter(|key| !known.contains(key.as_str()))
            .cloned()
            .collect();
        return Err(ValidationError::ExtraKeys(extra));
    }

    // Working snapshot; the caller's record is left untouched.
    let mut data = record.clone();
    for title in columns {
        if !data.contains_key(title) {
            data.insert(title.clone(), default_for(defaults, title));
        }
    }

    // Null is only kept where the column default is null too.
    for (key, value) in data.iter_mut() {
        if value.is_null() {
            if let Some(default) = defaults.get(key).filter(|d| !d.is_null()) {
                *value = default.clone();
            }
        }
    }

    Ok(columns
        .iter()
        .map(|title| data.get(title).cloned().unwrap_or_default())
        .collect())
}

fn default_for(defaults: &Defaults, title: &str) -> CellValue {
    defaults.get(title).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{get_column_titles, get_data};

    fn record(fields: &[(&str, CellValue)]) -> Record {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn abc_defaults() -> Defaults {
        record(&[
            ("a", CellValue::from(1.0)),
            ("b", CellValue::from(2.0)),
            ("c", CellValue::from(3.0)),
        ])
    }

    #[test]
    fn test_header_pairs_titles_with_defaults() {
        let matrix = build_cells(&[], &abc_defaults(), None).unwrap();
        let header = matrix.header();
        assert_eq!(header.len(), 3);
        assert_eq!(header[1].title, "b");
        assert_eq!(header[1].default_value, CellValue::Number(2.0));
        assert!(get_data(&matrix).is_empty());
    }

    #[test]
    fn test_column_completeness() {
        let defaults = abc_defaults();
        let order = ColumnOrder::explicit(["c"]);
        let matrix = build_cells(&[], &defaults, Some(&order)).unwrap();

        let mut titles = get_column_titles(&matrix);
        assert_eq!(titles, vec!["c", "a", "b"]);
        titles.sort();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rows_are_aligned_to_header_order() {
        let records = vec![
            record(&[("c", "z".into()), ("a", "x".into())]),
            record(&[("b", "y".into())]),
        ];
        let order = ColumnOrder::explicit(["b", "c", "a"]);
        let matrix = build_cells(&records, &abc_defaults(), Some(&order)).unwrap();

        let rows = get_data(&matrix);
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row.len(), 3);
        }
        assert_eq!(rows[0], vec![CellValue::from(2.0), "z".into(), "x".into()]);
        assert_eq!(rows[1], vec!["y".into(), CellValue::from(3.0), CellValue::from(1.0)]);
    }

    #[test]
    fn test_missing_keys_get_defaults() {
        let records = vec![record(&[("a", CellValue::from(10.0))])];
        let matrix = build_cells(&records, &abc_defaults(), None).unwrap();
        assert_eq!(
            get_data(&matrix)[0],
            vec![CellValue::from(10.0), CellValue::from(2.0), CellValue::from(3.0)]
        );
    }

    #[test]
    fn test_null_coercion() {
        let defaults = record(&[("a", CellValue::from("n/a")), ("b", CellValue::Null)]);
        let records = vec![record(&[("a", CellValue::Null), ("b", CellValue::Null)])];
        let matrix = build_cells(&records, &defaults, None).unwrap();
        assert_eq!(
            get_data(&matrix)[0],
            vec![CellValue::from("n/a"), CellValue::Null]
        );
    }

    #[test]
    fn test_caller_records_untouched() {
        let records = vec![record(&[("a", CellValue::Null)])];
        let before = records.clone();
        build_cells(&records, &abc_defaults(), None).unwrap();
        assert_eq!(records, before);
    }

    #[test]
    fn test_unknown_explicit_column() {
        let defaults = record(&[("a", CellValue::from(1.0)), ("b", CellValue::from(2.0))]);
        let order = ColumnOrder::explicit(["c"]);
        let err = build_cells(&[], &defaults, Some(&order)).unwrap_err();
        assert_eq!(err, ValidationError::UnknownColumn("c".to_string()));
    }

    #[test]
    fn test_longer_order_widens_rows() {
        let defaults = record(&[("a", CellValue::from(0.0)), ("b", CellValue::from("-"))]);
        let records = vec![record(&[("a", CellValue::from(5.0))])];
        let order = ColumnOrder::explicit(["a", "b", "a"]);
        let matrix = build_cells(&records, &defaults, Some(&order)).unwrap();

        assert_eq!(get_column_titles(&matrix), vec!["a", "b", "a"]);
        assert_eq!(
            get_data(&matrix)[0],
            vec![CellValue::from(5.0), CellValue::from("-"), CellValue::from(5.0)]
        );
    }

    #[test]
    fn test_extra_keys_rejected() {
        let defaults = record(&[("a", CellValue::from(0.0)), ("b", CellValue::from(0.0))]);
        let records = vec![record(&[("a", CellValue::from(1.0)), ("b", CellValue::from(2.0)), ("c", CellValue::from(3.0))])];
        let err = build_cells(&records, &defaults, None).unwrap_err();
        assert_eq!(err, ValidationError::ExtraKeys(vec!["c".to_string()]));
        assert!(err.to_string().contains("c"));
    }

    #[test]
    fn test_extra_keys_lists_all_in_record_order() {
        let defaults = record(&[("a", CellValue::from(0.0))]);
        let records = vec![record(&[("y", CellValue::from(1.0)), ("a", CellValue::from(2.0)), ("x", CellValue::from(3.0))])];
        let err = build_cells(&records, &defaults, None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ExtraKeys(vec!["y".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_unknown_key_within_column_count_is_dropped() {
        let defaults = record(&[("a", CellValue::from(0.0)), ("b", CellValue::from(0.0))]);
        let records = vec![record(&[("a", CellValue::from(1.0)), ("zz", CellValue::Null)])];
        let matrix = build_cells(&records, &defaults, None).unwrap();
        assert_eq!(get_data(&matrix)[0], vec![CellValue::from(1.0), CellValue::from(0.0)]);
    }

    #[test]
    fn test_values_are_not_type_checked() {
        let defaults = record(&[("a", CellValue::from(0.0))]);
        let records = vec![record(&[("a", true.into())])];
        let matrix = build_cells(&records, &defaults, None).unwrap();
        assert_eq!(get_data(&matrix)[0], vec![CellValue::Boolean(true)]);
    }
}
