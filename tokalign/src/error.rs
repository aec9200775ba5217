//! Errors returned by the alignment functions.
//!
//! Every error is permanent for the given input: alignment is a deterministic
//! pure computation, so there is nothing to retry and no partial result.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// A token could not be converted to its byte representation.
    #[error("token {index} cannot be encoded as bytes: {reason}")]
    Encoding { index: usize, reason: String },

    /// A sequence mixes integer tokens with text or byte tokens.
    #[error("token {index} is {found}, but the sequence started with {expected} tokens")]
    InputType {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// The distance matrix for these lengths cannot be indexed or its costs
    /// would not fit in a [`crate::Cost`].
    #[error("sequences of lengths {m} and {n} are too long to align")]
    TooLong { m: usize, n: usize },

    /// A per-token vector does not have one entry per token.
    #[error("{what} has {found} entries but the alignment has {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

pub type Result<T, E = AlignError> = std::result::Result<T, E>;
