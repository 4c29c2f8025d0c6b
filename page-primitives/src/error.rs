//! Shared error definitions for page primitives.

use thiserror::Error;
use uuid::Error as UuidError;

/// Result alias used throughout the page runtime.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating page primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided request identifier could not be parsed.
    #[error("invalid request id: {source}")]
    InvalidRequestId {
        /// Source parsing error from the UUID library.
        #[from]
        source: UuidError,
    },

    /// Route path failed validation.
    #[error("invalid route path `{path}`: {reason}")]
    InvalidRoutePath {
        /// The offending path string.
        path: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Page data key failed validation.
    #[error("invalid page data key: {reason}")]
    InvalidDataKey {
        /// Human-readable reason for rejection.
        reason: String,
    },
}
