//! Error types for the sleep sort engine.

use thiserror::Error;

/// Errors that can occur while planning or running a sort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// A negative value was supplied while [`DelayPolicy::Reject`] is active.
    ///
    /// A negative delay has no meaning for a sleep primitive, so the whole
    /// invocation is rejected before any delay runs. No partial result exists.
    ///
    /// [`DelayPolicy::Reject`]: crate::DelayPolicy::Reject
    #[error("negative value {value} at index {index} cannot be scheduled")]
    NegativeValue {
        /// Position of the offending value in the input
        index: usize,
        /// The offending value
        value: i64,
    },
}
