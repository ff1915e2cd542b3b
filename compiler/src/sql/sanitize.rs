use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{errors::msg, Error};

/// Statement terminators, comment openers, escape sequences and a handful of keywords that only
/// show up in injected payloads.
static DENYLIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(;|--|/\*|\*/|\bdrop\s+table\b|@@version|\binsert\s+into\b|\bif\s*\(|\bsleep\s*\(|\\x[0-9a-f]{2}|\\u[0-9a-f]{4}|\\[0bnrtz'"\\]|\x00)"#,
    )
    .unwrap()
});

/// Check fully assembled SQL text, with literals inlined, against the denylist.
pub fn check(sql: &str) -> Result<(), Error> {
    match DENYLIST.find(sql) {
        Some(found) => {
            warn!("{}", msg::injection_detected(found.as_str()));
            Err(Error::InjectionRejected)
        }
        None => Ok(()),
    }
}
