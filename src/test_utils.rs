//! Scripted session harness for driving the statement layer in tests.
//!
//! [`ScriptedSession`] replays pre-scripted cursor entry sequences instead of
//! talking to a server, and its [`ReleaseProbe`] counts how many entry streams
//! have been dropped — which is how the resource-release guarantees of early
//! stream abandonment get asserted.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures_util::Stream;

use crate::cursor::RowStream;
use crate::error::SqlCursorError;
use crate::params::Params;
use crate::proto::CursorEntry;
use crate::results::ExecutionResult;
use crate::session::{RawCursor, Session};

/// Counts how many scripted entry streams have been released (dropped).
#[derive(Debug, Clone, Default)]
pub struct ReleaseProbe(Arc<AtomicUsize>);

impl ReleaseProbe {
    #[must_use]
    pub fn released(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn guard(&self) -> ReleaseGuard {
        ReleaseGuard(self.0.clone())
    }
}

struct ReleaseGuard(Arc<AtomicUsize>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// One scripted execution: the entries its cursor yields plus the change
/// metadata the materializing path reports.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecution {
    entries: Vec<CursorEntry>,
    rows_affected: u64,
    last_insert_rowid: Option<i64>,
}

impl ScriptedExecution {
    #[must_use]
    pub fn new(entries: Vec<CursorEntry>) -> Self {
        Self {
            entries,
            rows_affected: 0,
            last_insert_rowid: None,
        }
    }

    #[must_use]
    pub fn with_rows_affected(mut self, rows_affected: u64) -> Self {
        self.rows_affected = rows_affected;
        self
    }

    #[must_use]
    pub fn with_last_insert_rowid(mut self, rowid: i64) -> Self {
        self.last_insert_rowid = Some(rowid);
        self
    }
}

/// Session whose executions replay scripted entry sequences, in FIFO order.
///
/// The materializing path runs the scripted entries through the same streaming
/// machinery the lazy path uses, so `all` and a fully consumed `iterate` agree
/// by construction. Calls made to the session are recorded for assertions.
#[derive(Default)]
pub struct ScriptedSession {
    script: VecDeque<ScriptedExecution>,
    probe: ReleaseProbe,
    calls: Vec<(String, Params)>,
}

impl ScriptedSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one scripted execution.
    pub fn push(&mut self, execution: ScriptedExecution) {
        self.script.push_back(execution);
    }

    /// Probe counting released entry streams.
    #[must_use]
    pub fn probe(&self) -> ReleaseProbe {
        self.probe.clone()
    }

    /// The `(sql, params)` pairs this session has been asked to execute.
    #[must_use]
    pub fn calls(&self) -> &[(String, Params)] {
        &self.calls
    }

    fn next_execution(
        &mut self,
        sql: &str,
        params: Params,
    ) -> Result<ScriptedExecution, SqlCursorError> {
        self.calls.push((sql.to_string(), params));
        self.script.pop_front().ok_or_else(|| {
            SqlCursorError::ResourceError(format!("no scripted execution left for {sql:?}"))
        })
    }

    fn raw_cursor(&self, entries: Vec<CursorEntry>) -> RawCursor {
        let stream = ScriptedEntryStream {
            entries: entries.into_iter(),
            _guard: self.probe.guard(),
        };
        RawCursor {
            entries: Box::pin(stream),
        }
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn execute(
        &mut self,
        sql: &str,
        params: Params,
    ) -> Result<ExecutionResult, SqlCursorError> {
        let execution = self.next_execution(sql, params)?;
        let mut stream = RowStream::new(self.raw_cursor(execution.entries));

        let mut result = ExecutionResult::default();
        while let Some(row) = stream.next().await? {
            result.add_row(row);
        }
        result.rows_affected = execution.rows_affected;
        result.last_insert_rowid = execution.last_insert_rowid;
        Ok(result)
    }

    async fn execute_raw(
        &mut self,
        sql: &str,
        params: Params,
    ) -> Result<RawCursor, SqlCursorError> {
        let execution = self.next_execution(sql, params)?;
        Ok(self.raw_cursor(execution.entries))
    }
}

struct ScriptedEntryStream {
    entries: std::vec::IntoIter<CursorEntry>,
    _guard: ReleaseGuard,
}

impl Stream for ScriptedEntryStream {
    type Item = Result<CursorEntry, SqlCursorError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().entries.next().map(Ok))
    }
}
