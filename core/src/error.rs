//! Error types for the feed loading pipeline.
//!
//! # Design
//! Two layers, kept deliberately separate. `TransportError` describes why the
//! network exchange itself produced nothing usable; it never leaves the
//! `HttpClient` boundary with any domain meaning attached. `LoaderError` is the
//! flat domain taxonomy handed to `load` callers: every transport failure,
//! whatever its cause, folds into `Connectivity`, and every unacceptable
//! response folds into `InvalidData`.

use thiserror::Error;

/// Domain-level failure delivered to a `FeedLoader` completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoaderError {
    /// The transport failed to produce a response.
    #[error("connectivity error")]
    Connectivity,

    /// A response arrived but its status or payload was unacceptable.
    #[error("invalid data")]
    InvalidData,
}

/// Failure reported by an `HttpClient` or `UrlSession` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not complete (DNS, connection, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The body exceeded the session's configured size limit and was not read.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },

    /// The session reported neither an error nor an HTTP response.
    #[error("unexpected values representation")]
    UnexpectedRepresentation,
}
