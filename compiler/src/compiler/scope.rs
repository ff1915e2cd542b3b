use crate::{Error, Options};

/// The context one statement is compiled in. A subquery or composite group gets a nested scope,
/// one level deeper than its parent.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub options: &'a Options,
    depth: usize,
}

impl<'a> Scope<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options, depth: 0 }
    }

    pub fn nested(&self) -> Result<Scope<'a>, Error> {
        let depth = self.depth.saturating_add(1);
        if depth > self.options.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.options.max_depth,
            });
        }
        Ok(Scope {
            options: self.options,
            depth,
        })
    }
}
