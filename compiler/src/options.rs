use serde::Deserialize;

use crate::compiler::constants::DEFAULT_MAX_DEPTH;

/// Settings applied uniformly to a whole compilation, including every subquery and every member
/// of a union.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// The input is a JSON array of descriptors to be joined with `UNION`.
    pub with_union: bool,
    /// Reject statements matching the injection denylist.
    pub with_sanitized_injection: bool,
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            with_union: false,
            with_sanitized_injection: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
