//! FILENAME: cells-engine/src/order.rs
//! PURPOSE: Resolves a column ordering request into the final column order.
//! CONTEXT: Both the table builder and `change_column_ordering` go through
//! `resolve_column_order`, so every matrix is ordered by the same rules.
//!
//! RULES:
//! - No order: default keys in their insertion order.
//! - Comparator: default keys sorted by the comparator.
//! - Explicit titles: every title must be a default key. Titles are taken
//!   verbatim (duplicates included). A list shorter than the key set is
//!   completed with the keys it does not mention, in their original order.
//!   A list at least as long as the key set is used as-is.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::error::{DefinitionError, ValidationError};

/// Comparator over column titles.
pub type TitleComparator = Rc<dyn Fn(&str, &str) -> Ordering>;

/// How the columns of a matrix should be ordered.
#[derive(Clone)]
pub enum ColumnOrder {
    /// Column titles in the wanted order (a full or partial permutation).
    Explicit(Vec<String>),
    /// Sorts the default keys with the given comparator.
    Comparator(TitleComparator),
}

impl ColumnOrder {
    pub fn explicit<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnOrder::Explicit(titles.into_iter().map(Into::into).collect())
    }

    pub fn comparator<F>(compare: F) -> Self
    where
        F: Fn(&str, &str) -> Ordering + 'static,
    {
        ColumnOrder::Comparator(Rc::new(compare))
    }

    /// Validates a loosely typed order coming from JSON.
    ///
    /// An array of strings becomes `Explicit`. A bare string is rejected
    /// before anything else; any other shape is a JSON type error.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DefinitionError> {
        titles_from_json(value).map(ColumnOrder::Explicit)
    }
}

/// Reads an explicit title list, rejecting a bare string first.
pub(crate) fn titles_from_json(value: &serde_json::Value) -> Result<Vec<String>, DefinitionError> {
    if let serde_json::Value::String(s) = value {
        return Err(ValidationError::BareStringOrder(s.clone()).into());
    }
    Ok(serde_json::from_value(value.clone())?)
}

impl fmt::Debug for ColumnOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnOrder::Explicit(titles) => f.debug_tuple("Explicit").field(titles).finish(),
            ColumnOrder::Comparator(_) => f.write_str("Comparator(..)"),
        }
    }
}

/// Resolves `order` against the default column keys.
///
/// # Errors
/// `ValidationError::UnknownColumn` naming the first explicit title that is
/// not one of `default_keys`.
pub fn resolve_column_order(
    default_keys: &[String],
    order: Option<&ColumnOrder>,
) -> Result<Vec<String>, ValidationError> {
    match order {
        None => Ok(default_keys.to_vec()),
        Some(ColumnOrder::Comparator(compare)) => {
            let mut sorted = default_keys.to_vec();
            sorted.sort_by(|a, b| compare(a.as_str(), b.as_str()));
            Ok(sorted)
        }
        Some(ColumnOrder::Explicit(titles)) => resolve_explicit(default_keys, titles),
    }
}

fn resolve_explicit(default_keys: &[String], titles: &[String]) -> Result<Vec<String>, ValidationError> {
    let known: FxHashSet<&str> = default_keys.iter().map(String::as_str).collect();

    let mut resolved = Vec::with_capacity(default_keys.len().max(titles.len()));
    for title in titles {
        if !known.contains(title.as_str()) {
            return Err(ValidationError::UnknownColumn(title.clone()));
        }
        resolved.push(title.clone());
    }

    if resolved.len() < default_keys.len() {
        let mentioned: FxHashSet<&str> = titles.iter().map(String::as_str).collect();
        resolved.extend(
            default_keys
                .iter()
                .filter(|key| !mentioned.contains(key.as_str()))
                .cloned(),
        );
    }

    log::trace!("resolved explicit column order: {:?}", resolved);
    Ok(resolved)
}
