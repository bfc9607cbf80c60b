use serde::{Deserialize, Serialize};

/// Default starting capacity of a writer buffer in bytes
pub const DEFAULT_INITIAL_SIZE: usize = 1024;
/// Default multiplier applied to the capacity when a writer runs out of room
pub const DEFAULT_GROWTH_FACTOR: usize = 8;

/// Buffer configuration for `BerWriter`
///
/// Missing fields fall back to their defaults when deserialized, so the
/// options can be embedded in a larger configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Starting buffer capacity (default 1024)
    pub initial_size: usize,
    /// Multiplicative growth on reallocation (default 8)
    pub growth_factor: usize,
}

impl WriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Initial size, never zero
    pub fn effective_initial_size(&self) -> usize {
        self.initial_size.max(1)
    }

    /// Growth factor, never below 2 so that growing always makes room
    pub fn effective_growth_factor(&self) -> usize {
        self.growth_factor.max(2)
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_SIZE,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}
