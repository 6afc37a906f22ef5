//! Parser configuration.

/// Default array nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs for a single parse.
///
/// The matcher recurses once per array level, so the depth limit is what
/// keeps a hostile cell like `[[[[...` from exhausting the thread stack.
/// Inputs nested less deeply than the limit parse identically with any
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of simultaneously open arrays.
    pub max_depth: usize,
}

impl ParserConfig {
    pub const fn new() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }

    /// No nesting limit. Only for trusted input.
    pub const fn unlimited() -> Self {
        Self { max_depth: usize::MAX }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
