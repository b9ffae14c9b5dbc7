use crate::constants::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested tables before decoding fails.
    pub max_depth: usize,
    /// Skip stray zero bytes between top-level entries.
    pub skip_padding: bool,
    /// Report undecodable bytes after merged data instead of dropping them.
    pub strict: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_skip_padding(mut self, skip_padding: bool) -> Self {
        self.skip_padding = skip_padding;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            skip_padding: true,
            strict: false,
        }
    }
}
