mod decode;
mod errors;

pub mod ast;
pub mod vocabulary;

pub use decode::{parse, parse_union, RESERVED_CHARACTERS};
pub use errors::{DecodeError, VocabularyError};
pub use vocabulary::{Datatype, Operator};
