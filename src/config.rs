//! Compiler and interpreter settings.

/// Settings for a single run. Passed explicitly to [`crate::run_source`] and
/// [`crate::interpreter::run_with_config`]; nothing here is global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Calls nested deeper than this fail with a stack overflow error
    pub max_call_depth: usize,
    /// Expressions nested deeper than this are rejected by the parser
    pub max_nesting_depth: usize,
    /// Stack size in bytes of the threads compilation and evaluation run on
    pub stack_size: usize,
    /// Name of the function to run
    pub entry: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_call_depth: 10_000,
            max_nesting_depth: 1_000,
            stack_size: 512 * 1024 * 1024,
            entry: "main".to_string(),
        }
    }
}

impl Config {
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = bytes;
        self
    }

    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }
}
