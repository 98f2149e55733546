//! Parser configuration.

/// Default ancestor stack capacity, and so the default nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Knobs for [`parse_with`](crate::parse_with).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum number of simultaneously open nodes. Must be non-zero.
    pub max_depth: usize,
    /// Accept several top-level nodes, linked as siblings of the first.
    pub allow_sibling_roots: bool,
}

impl ParseConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_sibling_roots(mut self, allow: bool) -> Self {
        self.allow_sibling_roots = allow;
        self
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_sibling_roots: false,
        }
    }
}
