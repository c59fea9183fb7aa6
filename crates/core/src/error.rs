//! Error types for sift
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Errors are never swallowed by the core: every failure is reported
//! synchronously to the immediate caller.

use crate::types::DocumentId;
use thiserror::Error;

/// Result type alias for sift operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the search engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Caller supplied an argument the engine refuses
    ///
    /// Negative or duplicate document id, illegal term characters,
    /// malformed query syntax, empty query text, invalid stop word or
    /// invalid configuration value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Document id is not live
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an `InvalidArgument` error from any message
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Build a `Config` error from any message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// True for the `InvalidArgument` kind
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// True for the not-found kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::DocumentNotFound(_))
    }
}
