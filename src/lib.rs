//! Prepared-statement execution over a streamed SQL cursor protocol.
//!
//! A [`Statement`] pairs one piece of SQL text with an exclusively-owned
//! [`Session`] and exposes four result shapes for it: a change summary
//! ([`Statement::run`]), the first row ([`Statement::get`]), the full row set
//! ([`Statement::all`]) and a lazily decoded row stream
//! ([`Statement::iterate`]). The session owns transport and framing; this
//! crate owns the consumption side — the decode pipeline from raw wire values
//! to typed [`Value`]s, the row builder zipping values with column names, and
//! the streaming state machine that turns error entries carried as stream data
//! into raised failures without retracting rows already delivered.
//!
//! Out of scope by design: SQL parsing and validation, query planning,
//! retry/backoff policy and multi-statement transaction coordination. Those
//! live behind the [`Session`] trait or above this crate.

pub mod cursor;
pub mod decode;
pub mod error;
pub mod params;
pub mod prelude;
pub mod proto;
pub mod results;
pub mod session;
pub mod statement;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use cursor::RowStream;
pub use error::SqlCursorError;
pub use params::Params;
pub use results::{ExecutionResult, Row};
pub use session::{RawCursor, Session, SessionConfig};
pub use statement::{RunResult, Statement};
pub use types::Value;
