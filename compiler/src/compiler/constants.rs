/// Wraps a literal destined for a bind parameter. Control characters keep the markers from
/// colliding with legitimate SQL text.
pub const PLACEHOLDER_OPEN: &str = "\u{2}jql:";
pub const PLACEHOLDER_CLOSE: &str = ":jql\u{3}";

pub const POSITIONAL_PLACEHOLDER: &str = "?";

/// Returned by `build` in place of SQL when the injection guard trips.
pub const INJECTION_SENTINEL: &str = "ERROR: query rejected by the SQL injection guard";

pub const UNION_SEPARATOR: &str = " UNION ";

/// Nesting limit for subqueries and composite conditions.
pub const DEFAULT_MAX_DEPTH: usize = 32;
