use thiserror::Error;

/// Errors surfaced by the statement execution layer.
///
/// Failures reported by the session itself (`execute`/`execute_raw`) propagate
/// unchanged. Errors the server ships *as data* inside the entry stream are
/// translated into [`ExecutionError`](SqlCursorError::ExecutionError) at the
/// point of consumption.
#[derive(Debug, Error)]
pub enum SqlCursorError {
    /// The server rejected or failed the statement.
    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    /// The entry stream violated the expected ordering or carried a malformed
    /// value encoding.
    #[error("Cursor protocol error: {0}")]
    ProtocolError(String),

    /// Transport or session failure, originating outside this layer.
    #[error("Session resource error: {0}")]
    ResourceError(String),

    /// Invalid session configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The argument set was rejected before transmission.
    #[error("Parameter error: {0}")]
    ParameterError(String),
}
