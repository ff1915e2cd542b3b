use json2sql_descriptor::{DecodeError, VocabularyError};
use thiserror::Error;

use crate::compiler::constants::INJECTION_SENTINEL;

#[derive(Debug, Error)]
pub enum Error {
    /// The input was not a well-formed query descriptor.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Only raised by [`crate::validate`]. During compilation these are absorbed into an empty
    /// fragment instead.
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),

    #[error("{}", INJECTION_SENTINEL)]
    InjectionRejected,

    #[error("query nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },

    #[error("a union requires at least one query")]
    EmptyUnion,
}
