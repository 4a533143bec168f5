//! Streaming consumption of a raw cursor: the state machine behind
//! [`Statement::iterate`](crate::statement::Statement::iterate).

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::StreamExt;
use tracing::debug;

use crate::decode::decode_value;
use crate::error::SqlCursorError;
use crate::proto::{CursorEntry, ErrorBody};
use crate::results::Row;
use crate::results::row::column_index_cache;
use crate::session::{EntryStream, RawCursor};

/// Lazily produced row sequence over one execution's entry stream.
///
/// Rows are decoded and yielded one at a time, in stream order, with no
/// buffering beyond the single row being decoded. Dropping the stream before
/// exhaustion drops the underlying entry stream, releasing the resources of
/// that one execution.
pub struct RowStream {
    entries: Option<EntryStream>,
    state: State,
}

enum State {
    /// No `step_begin` with columns seen yet.
    AwaitingColumns,
    /// Columns recorded; `row` entries decode against them.
    Streaming {
        columns: Arc<Vec<String>>,
        cache: Arc<HashMap<String, usize>>,
    },
    /// Exhausted, or an error was raised. No further rows.
    Terminated,
}

impl RowStream {
    /// Wrap a raw cursor for row-at-a-time consumption.
    #[must_use]
    pub fn new(raw: RawCursor) -> Self {
        Self {
            entries: Some(raw.entries),
            state: State::AwaitingColumns,
        }
    }

    /// Produce the next decoded row, or `Ok(None)` once the stream is
    /// exhausted.
    ///
    /// Errors the server ships as stream data are raised here, at the exact
    /// point of consumption where the entry arrives; rows yielded earlier stay
    /// valid. Raising an error terminates the stream and releases it, and
    /// every later call returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`SqlCursorError::ExecutionError`] for a server-reported
    /// `step_error`/`error` entry, [`SqlCursorError::ProtocolError`] when the
    /// stream violates entry ordering or carries a malformed value, and
    /// transport failures unchanged.
    pub async fn next(&mut self) -> Result<Option<Row>, SqlCursorError> {
        loop {
            let Some(entries) = self.entries.as_mut() else {
                return Ok(None);
            };

            let entry = match entries.next().await {
                Some(Ok(entry)) => entry,
                Some(Err(err)) => {
                    self.terminate();
                    return Err(err);
                }
                None => {
                    self.terminate();
                    return Ok(None);
                }
            };

            match entry {
                CursorEntry::StepBegin { cols } => {
                    if cols.is_empty() {
                        // Tolerated no-op; columns stay as they were.
                        continue;
                    }
                    let names: Vec<String> = cols.into_iter().map(|col| col.name).collect();
                    debug!(columns = names.len(), "cursor step begins");
                    let columns = Arc::new(names);
                    let cache = column_index_cache(&columns);
                    self.state = State::Streaming { columns, cache };
                }
                CursorEntry::Row { row } => {
                    let (columns, cache) = match &self.state {
                        State::Streaming { columns, cache } => (columns.clone(), cache.clone()),
                        State::AwaitingColumns | State::Terminated => {
                            self.terminate();
                            return Err(SqlCursorError::ProtocolError(
                                "row entry arrived before any step_begin established columns"
                                    .to_string(),
                            ));
                        }
                    };
                    if row.len() != columns.len() {
                        let (width, count) = (row.len(), columns.len());
                        self.terminate();
                        return Err(SqlCursorError::ProtocolError(format!(
                            "row width {width} does not match column count {count}"
                        )));
                    }
                    let mut values = Vec::with_capacity(row.len());
                    for raw in row {
                        match decode_value(raw) {
                            Ok(value) => values.push(value),
                            Err(err) => {
                                self.terminate();
                                return Err(err);
                            }
                        }
                    }
                    return Ok(Some(Row::with_cache(columns, cache, values)));
                }
                CursorEntry::StepError { error } | CursorEntry::Error { error } => {
                    debug!("cursor reported an execution error");
                    self.terminate();
                    return Err(execution_error(error));
                }
            }
        }
    }

    /// Stop consumption and release the underlying entry stream.
    fn terminate(&mut self) {
        self.state = State::Terminated;
        // Dropping the boxed stream releases the execution's resources.
        self.entries = None;
    }
}

impl std::fmt::Debug for RowStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            State::AwaitingColumns => "AwaitingColumns",
            State::Streaming { .. } => "Streaming",
            State::Terminated => "Terminated",
        };
        f.debug_struct("RowStream").field("state", &state).finish()
    }
}

fn execution_error(error: Option<ErrorBody>) -> SqlCursorError {
    let message = error
        .and_then(|body| body.message)
        .unwrap_or_else(|| "statement execution failed".to_string());
    SqlCursorError::ExecutionError(message)
}
