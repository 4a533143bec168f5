use std::collections::HashMap;
use std::sync::Arc;

use super::row::{Row, column_index_cache};
use crate::types::Value;

/// Fully materialized result of one statement execution.
///
/// `rows_affected` and `last_insert_rowid` carry whatever the server reported;
/// `last_insert_rowid` is `None` whenever the statement did not insert a row.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// The rows returned by the query
    pub rows: Vec<Row>,
    /// The number of rows affected (for DML statements)
    pub rows_affected: u64,
    /// Rowid of the last inserted row, if the statement inserted one
    pub last_insert_rowid: Option<i64>,
    /// Column names shared by all rows (to avoid duplicating in each row)
    column_names: Option<Arc<Vec<String>>>,
    column_index_cache: Option<Arc<HashMap<String, usize>>>,
}

impl ExecutionResult {
    /// Create a new result set with a known capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ExecutionResult {
        ExecutionResult {
            rows: Vec::with_capacity(capacity),
            ..ExecutionResult::default()
        }
    }

    /// Set the column names for this result set (to be shared by all rows).
    ///
    /// Also builds the name lookup cache the rows share.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index_cache = Some(column_index_cache(&column_names));
        self.column_names = Some(column_names);
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row of decoded values, sharing this result's column names.
    ///
    /// Ignored until column names have been set.
    pub fn add_row_values(&mut self, values: Vec<Value>) {
        if let (Some(column_names), Some(cache)) = (&self.column_names, &self.column_index_cache) {
            self.rows
                .push(Row::with_cache(column_names.clone(), cache.clone(), values));
        }
    }

    /// Add an already-built row to the result set.
    ///
    /// If column names haven't been set yet, adopts the ones from this row.
    pub fn add_row(&mut self, row: Row) {
        if self.column_names.is_none() {
            self.column_names = Some(row.column_names.clone());
            self.column_index_cache = Some(row.column_index_cache.clone());
        }
        self.rows.push(row);
    }
}
