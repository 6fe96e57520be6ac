//! Error types for famibank.
//!
//! Internally everything propagates `anyhow::Error` through `Res`. At the public boundary
//! (command handlers and `main`) errors are tagged with an `ErrorType` so that callers can tell a
//! bad configuration apart from an unreachable Core service or a database failure.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The internal result type.
pub(crate) type Res<T> = anyhow::Result<T>;

/// The public result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of what went wrong.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The famibank home directory or its `config.json` is missing or invalid.
    Config,
    /// The Core banking service could not be reached or returned bad data.
    Core,
    /// The local SQLite database failed.
    Database,
    /// The request itself was invalid, e.g. a month of 13.
    Request,
    /// The MCP service failed to start or run.
    Service,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// The public error type.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:#}", self.error_type, self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Converts an internal `Res<T>` into a public `Result<T>` tagged with an `ErrorType`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T> IntoResult<T> for Res<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_pub_result_tags_error() {
        let res: Res<()> = Err(anyhow::anyhow!("disk on fire")).context("Unable to save");
        let err = res.pub_result(ErrorType::Database).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Database);
        assert_eq!(err.to_string(), "database error: Unable to save: disk on fire");
    }

    #[test]
    fn test_pub_result_passes_ok() {
        let res: Res<u8> = Ok(7);
        assert_eq!(res.pub_result(ErrorType::Core).unwrap(), 7);
    }
}
