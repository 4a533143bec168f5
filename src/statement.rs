//! Prepared statements and their four execution shapes.

use tracing::debug;

use crate::cursor::RowStream;
use crate::error::SqlCursorError;
use crate::params::Params;
use crate::results::Row;
use crate::session::Session;

/// Summary of a state-changing execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    /// Number of rows the statement changed.
    pub changes: u64,
    /// Rowid of the last inserted row; `None` whenever not applicable.
    pub last_insert_rowid: Option<i64>,
}

/// Prepared SQL text bound to one exclusively-owned execution session.
///
/// A statement owns its [`Session`] outright; nothing is shared between two
/// statement instances, which is what lets them execute concurrently. Each
/// call to [`run`](Statement::run), [`get`](Statement::get),
/// [`all`](Statement::all) or [`iterate`](Statement::iterate) triggers one
/// fresh execution against the session, with no carry-over state between
/// calls except the reused session handle.
pub struct Statement<S: Session> {
    sql: String,
    session: S,
}

impl<S: Session> Statement<S> {
    pub fn new(session: S, sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            session,
        }
    }

    /// The SQL text this statement was prepared with.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Execute for its side effects and report the change summary.
    ///
    /// No retries happen at this layer; retry policy belongs to the session.
    ///
    /// # Errors
    ///
    /// Returns [`SqlCursorError`] when the session or server fails the
    /// statement.
    pub async fn run(&mut self, params: Params) -> Result<RunResult, SqlCursorError> {
        let result = self.session.execute(&self.sql, params).await?;
        debug!(changes = result.rows_affected, "statement run complete");
        Ok(RunResult {
            changes: result.rows_affected,
            last_insert_rowid: result.last_insert_rowid,
        })
    }

    /// Execute and return the first row, or `None` when the result is empty.
    ///
    /// This goes through the materializing path: the full result is collected
    /// before the first row is returned, even though only one row comes back.
    /// Prefer [`iterate`](Statement::iterate) when the result may be large.
    ///
    /// # Errors
    ///
    /// Returns [`SqlCursorError`] when the session or server fails the
    /// statement.
    pub async fn get(&mut self, params: Params) -> Result<Option<Row>, SqlCursorError> {
        let result = self.session.execute(&self.sql, params).await?;
        Ok(result.rows.into_iter().next())
    }

    /// Execute and return the full ordered row sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SqlCursorError`] when the session or server fails the
    /// statement. The caller never sees a partial result.
    pub async fn all(&mut self, params: Params) -> Result<Vec<Row>, SqlCursorError> {
        let result = self.session.execute(&self.sql, params).await?;
        debug!(rows = result.rows.len(), "statement materialized");
        Ok(result.rows)
    }

    /// Execute without materializing and return a lazily decoded row stream.
    ///
    /// Every call starts a new execution; a stream is not restartable
    /// mid-flight. Dropping the stream before exhaustion releases the
    /// underlying execution.
    ///
    /// # Errors
    ///
    /// Returns a session-level error unchanged if the execution could not be
    /// started; server-side failures arrive through
    /// [`RowStream::next`](crate::cursor::RowStream::next).
    pub async fn iterate(&mut self, params: Params) -> Result<RowStream, SqlCursorError> {
        let raw = self.session.execute_raw(&self.sql, params).await?;
        Ok(RowStream::new(raw))
    }

    /// Consume the statement and recover its session.
    #[must_use]
    pub fn into_session(self) -> S {
        self.session
    }
}
