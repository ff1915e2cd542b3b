use std::fmt::{Display, Formatter};

use itertools::Itertools;

/// A piece of rendered SQL text, not yet assembled into a full statement. Literals inside it may
/// still carry placeholder tags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub content: String,
}

impl Fragment {
    pub fn new(content: impl Into<String>) -> Fragment {
        Fragment {
            content: content.into(),
        }
    }

    pub fn empty() -> Fragment {
        Fragment::default()
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn parenthesized(self) -> Fragment {
        Fragment::new(format!("({})", self.content))
    }

    /// Join the non-empty fragments with `separator`.
    pub fn join(fragments: impl IntoIterator<Item = Fragment>, separator: &str) -> Fragment {
        Fragment::new(
            fragments
                .into_iter()
                .filter(|f| !f.is_empty())
                .map(|f| f.content)
                .join(separator),
        )
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Fragment {
    fn from(content: &str) -> Self {
        Fragment::new(content)
    }
}

impl From<String> for Fragment {
    fn from(content: String) -> Self {
        Fragment::new(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_skips_empty() {
        let joined = Fragment::join(
            [Fragment::new("a"), Fragment::empty(), Fragment::new("  "), Fragment::new("b")],
            " ",
        );
        assert_eq!(joined, Fragment::new("a b"));
        assert!(Fragment::join(Vec::<Fragment>::new(), ", ").is_empty());
    }

    #[test]
    fn test_parenthesized() {
        assert_eq!(Fragment::new("a = 1").parenthesized().to_string(), "(a = 1)");
    }
}
