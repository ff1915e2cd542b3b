use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::VocabularyError;

/// Governs how a literal value is written into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    Boolean,
    String,
    Number,
    Raw,
    Function,
    Array,
}

impl Datatype {
    pub const ALL: [Datatype; 6] = [
        Datatype::Boolean,
        Datatype::String,
        Datatype::Number,
        Datatype::Raw,
        Datatype::Function,
        Datatype::Array,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Datatype::Boolean => "BOOLEAN",
            Datatype::String => "STRING",
            Datatype::Number => "NUMBER",
            Datatype::Raw => "RAW",
            Datatype::Function => "FUNCTION",
            Datatype::Array => "ARRAY",
        }
    }
}

impl FromStr for Datatype {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = canonicalize(s);
        Datatype::ALL
            .into_iter()
            .find(|d| d.as_str() == canonical)
            .ok_or_else(|| VocabularyError::InvalidDatatype(s.to_string()))
    }
}

impl Display for Datatype {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    ILike,
    NotLike,
    Between,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl Operator {
    pub const ALL: [Operator; 14] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Lt,
        Operator::Lte,
        Operator::Gt,
        Operator::Gte,
        Operator::Like,
        Operator::ILike,
        Operator::NotLike,
        Operator::Between,
        Operator::In,
        Operator::NotIn,
        Operator::IsNull,
        Operator::IsNotNull,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Neq => "<>",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Like => "LIKE",
            Operator::ILike => "ILIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::Between => "BETWEEN",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// `IS NULL` and `IS NOT NULL` take no right-hand side.
    pub fn is_nullary(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

impl FromStr for Operator {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = canonicalize(s);
        Operator::ALL
            .into_iter()
            .find(|o| o.as_str() == canonical)
            .ok_or_else(|| VocabularyError::InvalidOperator(s.to_string()))
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Uppercase and collapse inner whitespace so that `not  like` matches `NOT LIKE`.
fn canonicalize(s: &str) -> String {
    s.split_whitespace()
        .map(|word| word.to_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}
