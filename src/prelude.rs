//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::cursor::RowStream;
pub use crate::decode::decode_value;
pub use crate::error::SqlCursorError;
pub use crate::params::Params;
pub use crate::proto::{Col, CursorEntry, ErrorBody, WireValue};
pub use crate::results::{ExecutionResult, Row, build_row};
pub use crate::session::{EntryStream, RawCursor, Session, SessionConfig, SessionConfigBuilder};
pub use crate::statement::{RunResult, Statement};
pub use crate::types::Value;

#[cfg(feature = "test-utils")]
pub use crate::test_utils::{ReleaseProbe, ScriptedExecution, ScriptedSession};
