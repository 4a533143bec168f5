//! The session contract the statement layer consumes.
//!
//! A session owns the wire transport and protocol framing for one logical
//! connection scope. This crate never opens connections itself; it drives a
//! [`Session`] implementation through the two execution paths below.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::SqlCursorError;
use crate::params::Params;
use crate::proto::CursorEntry;
use crate::results::ExecutionResult;

/// Lazy, server-driven sequence of cursor entries.
///
/// Transport failures surface as stream items; errors the server reports as
/// protocol data arrive as ordinary [`CursorEntry`] values instead.
pub type EntryStream = BoxStream<'static, Result<CursorEntry, SqlCursorError>>;

/// Handle on one non-materialized execution.
///
/// The caller drives consumption. Dropping the handle (or the stream taken out
/// of it) releases every resource tied to that one execution; the transport
/// response header is consumed inside the session and not exposed here.
pub struct RawCursor {
    pub entries: EntryStream,
}

/// Options for constructing a session: transport target, credentials and
/// protocol version. Opaque to the statement layer.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub protocol_version: u32,
}

impl SessionConfig {
    #[must_use]
    pub fn builder(url: impl Into<String>) -> SessionConfigBuilder {
        SessionConfigBuilder {
            url: url.into(),
            auth_token: None,
            protocol_version: 1,
        }
    }
}

/// Fluent builder for session options.
#[derive(Debug, Clone)]
pub struct SessionConfigBuilder {
    url: String,
    auth_token: Option<String>,
    protocol_version: u32,
}

impl SessionConfigBuilder {
    #[must_use]
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn protocol_version(mut self, version: u32) -> Self {
        self.protocol_version = version;
        self
    }

    /// Validate and produce the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SqlCursorError::ConfigError`] for an empty target URL or a
    /// zero protocol version.
    pub fn finish(self) -> Result<SessionConfig, SqlCursorError> {
        if self.url.trim().is_empty() {
            return Err(SqlCursorError::ConfigError(
                "session target URL must not be empty".to_string(),
            ));
        }
        if self.protocol_version == 0 {
            return Err(SqlCursorError::ConfigError(
                "protocol version must be at least 1".to_string(),
            ));
        }
        Ok(SessionConfig {
            url: self.url,
            auth_token: self.auth_token,
            protocol_version: self.protocol_version,
        })
    }
}

/// One logical connection scope, owner of transport and framing.
///
/// A session serializes the calls made to it — both methods take `&mut self`,
/// so two statements that need to execute concurrently must own two distinct
/// sessions. Retry, backoff and timeout policy all live behind this trait, not
/// in the statement layer.
#[async_trait]
pub trait Session: Send {
    /// Execute the statement and fully materialize the result.
    ///
    /// # Errors
    ///
    /// Returns [`SqlCursorError::ExecutionError`] if the server rejects or
    /// fails the statement, or a transport-level error unchanged.
    async fn execute(
        &mut self,
        sql: &str,
        params: Params,
    ) -> Result<ExecutionResult, SqlCursorError>;

    /// Execute the statement without materializing; the caller drives the
    /// returned entry stream and releases it by dropping it.
    ///
    /// # Errors
    ///
    /// Returns a transport-level error unchanged if the execution could not be
    /// started. Server-side failures after that point arrive as error entries
    /// inside the stream.
    async fn execute_raw(
        &mut self,
        sql: &str,
        params: Params,
    ) -> Result<RawCursor, SqlCursorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_config() {
        let config = SessionConfig::builder("https://db.example.com")
            .auth_token("secret")
            .protocol_version(3)
            .finish()
            .unwrap();
        assert_eq!(config.url, "https://db.example.com");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.protocol_version, 3);
    }

    #[test]
    fn empty_url_is_config_error() {
        let err = SessionConfig::builder("  ").finish().unwrap_err();
        assert!(matches!(err, SqlCursorError::ConfigError(_)));
    }

    #[test]
    fn zero_protocol_version_is_config_error() {
        let err = SessionConfig::builder("https://db.example.com")
            .protocol_version(0)
            .finish()
            .unwrap_err();
        assert!(matches!(err, SqlCursorError::ConfigError(_)));
    }
}
