//! The placeholder protocol.
//!
//! While a statement is assembled, every literal destined for a bind parameter is wrapped in
//! [`PLACEHOLDER_OPEN`] and [`PLACEHOLDER_CLOSE`]. Once the whole statement (subqueries and union
//! members included) is assembled, a single pass either strips the markers to inline the literals
//! or swaps each tagged literal for a positional placeholder and collects its value.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::compiler::constants::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN, POSITIONAL_PLACEHOLDER};

static TAGGED_LITERAL: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "(?s){}(.*?){}",
        regex::escape(PLACEHOLDER_OPEN),
        regex::escape(PLACEHOLDER_CLOSE)
    );
    Regex::new(&pattern).unwrap()
});

/// A value bound to one positional placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    Boolean(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
}

impl BindValue {
    /// Recover a typed value from the form a literal takes in SQL text. Quoted literals are always
    /// strings; anything else is a boolean, a number, or failing both, a string.
    pub fn from_lexical(lexical: &str) -> BindValue {
        if let Some(inner) = unquote(lexical) {
            return BindValue::String(inner);
        }
        if lexical.eq_ignore_ascii_case("true") {
            return BindValue::Boolean(true);
        }
        if lexical.eq_ignore_ascii_case("false") {
            return BindValue::Boolean(false);
        }
        if let Ok(integer) = lexical.parse::<i64>() {
            return BindValue::Integer(integer);
        }
        if let Ok(unsigned) = lexical.parse::<u64>() {
            return BindValue::Unsigned(unsigned);
        }
        if is_numeric(lexical) {
            if let Ok(float) = lexical.parse::<f64>() {
                return BindValue::Float(float);
            }
        }
        BindValue::String(lexical.to_string())
    }
}

/// SQL text with positional placeholders, plus the values bound to them in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<BindValue>,
}

pub fn tag(lexical: &str) -> String {
    format!("{PLACEHOLDER_OPEN}{lexical}{PLACEHOLDER_CLOSE}")
}

/// Inline every tagged literal.
pub fn strip_tags(sql: &str) -> String {
    sql.replace(PLACEHOLDER_OPEN, "")
        .replace(PLACEHOLDER_CLOSE, "")
}

/// Replace every tagged literal with a positional placeholder, collecting values left to right.
pub fn extract(sql: &str) -> Statement {
    let mut params = Vec::new();
    let sql = TAGGED_LITERAL
        .replace_all(sql, |captures: &Captures| {
            params.push(BindValue::from_lexical(&captures[1]));
            POSITIONAL_PLACEHOLDER
        })
        .into_owned();
    Statement { sql, params }
}

fn unquote(lexical: &str) -> Option<String> {
    let inner = lexical.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("''", "'"))
}

fn is_numeric(lexical: &str) -> bool {
    lexical.chars().any(|c| c.is_ascii_digit())
        && lexical
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
}
