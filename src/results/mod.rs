//! Decoded result shapes: rows and materialized result sets.

pub mod result_set;
pub mod row;

pub use result_set::ExecutionResult;
pub use row::{Row, build_row};
