use std::collections::HashMap;
use std::sync::Arc;

use crate::error::SqlCursorError;
use crate::types::Value;

/// A decoded, column-named result row.
///
/// Column names are shared across all rows of one execution; values keep the
/// order of the originating wire row. When two columns share a name, lookup by
/// name resolves to the *last* occurrence; positional access still sees every
/// value.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub values: Vec<Value>,
    // Internal cache for faster column lookups (to avoid repeated string comparisons)
    #[doc(hidden)]
    pub(crate) column_index_cache: Arc<HashMap<String, usize>>,
}

/// Build the shared name-to-index cache for one column list.
///
/// Enumerates in order, so a duplicated name ends up mapped to its last index.
pub(crate) fn column_index_cache(column_names: &[String]) -> Arc<HashMap<String, usize>> {
    Arc::new(
        column_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect::<HashMap<_, _>>(),
    )
}

impl Row {
    /// Create a new row, building its own column lookup cache.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        let cache = column_index_cache(&column_names);
        Self {
            column_names,
            values,
            column_index_cache: cache,
        }
    }

    /// Create a row reusing a cache already built for this column list.
    pub(crate) fn with_cache(
        column_names: Arc<Vec<String>>,
        cache: Arc<HashMap<String, usize>>,
        values: Vec<Value>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index_cache: cache,
        }
    }

    /// Get the index of a column by name, or None if not found.
    ///
    /// Duplicate names resolve to the last occurrence.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        // First check the cache
        if let Some(&idx) = self.column_index_cache.get(column_name) {
            return Some(idx);
        }

        // Fall back to linear search
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Get a value from the row by column name, or None if the column wasn't
    /// found.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        let index_opt = self.get_column_index(column_name);
        if let Some(idx) = index_opt {
            self.values.get(idx)
        } else {
            None
        }
    }

    /// Get a value from the row by column index, or None if out of bounds.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Number of columns in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Zip decoded values with column names into a [`Row`].
///
/// # Errors
///
/// Returns [`SqlCursorError::ProtocolError`] when the value count does not
/// match the column count.
pub fn build_row(
    values: Vec<Value>,
    column_names: Arc<Vec<String>>,
) -> Result<Row, SqlCursorError> {
    if values.len() != column_names.len() {
        return Err(SqlCursorError::ProtocolError(format!(
            "row width {} does not match column count {}",
            values.len(),
            column_names.len()
        )));
    }
    Ok(Row::new(column_names, values))
}
