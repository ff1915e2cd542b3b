use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("query descriptor is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of query descriptors")]
    ExpectedArray,

    #[error("query descriptor contains a reserved control character in \"{0}\"")]
    ReservedCharacter(String),
}

/// A value outside of the closed datatype or operator sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    #[error("invalid SQL datatype `{0}`")]
    InvalidDatatype(String),

    #[error("invalid SQL operator `{0}`")]
    InvalidOperator(String),
}
