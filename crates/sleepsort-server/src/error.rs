//! Server error types.
//!
//! [`RequestError`] covers everything a client can get wrong. It is detected
//! before or by the engine and rendered back in the requested format.
//! [`ServerError`] covers runtime failures of the server itself.

use sleepsort_core::SortError;
use thiserror::Error;

/// Message returned when the `numbers` parameter is absent.
pub const MISSING_INPUT_MESSAGE: &str =
    "Please provide a list of numbers in the 'numbers' variable.";

/// Errors caused by the request rather than the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// No `numbers` parameter was supplied.
    ///
    /// The engine is never invoked on this path.
    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingInput,

    /// More values than the server accepts in one request.
    #[error("too many numbers: {count} supplied, at most {max} accepted")]
    TooManyNumbers {
        /// Number of values supplied
        count: usize,
        /// Configured maximum
        max: usize,
    },

    /// A value would schedule a longer delay than the server accepts.
    #[error("value {value} exceeds the maximum of {max}")]
    ValueTooLarge {
        /// The offending value
        value: i64,
        /// Configured maximum
        max: i64,
    },

    /// The engine refused the input.
    #[error(transparent)]
    Rejected(#[from] SortError),
}

/// Errors that can occur in the server runtime.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error (invalid bind address, address in use, etc.).
    ///
    /// Fatal errors that prevent server startup. Fix configuration and
    /// restart.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport/network error (accept failure, I/O error, etc.).
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}
