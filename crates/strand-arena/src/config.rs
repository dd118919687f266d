//! Pool configuration parameters.

/// Configuration for an [`EntityPool`](crate::EntityPool).
///
/// Only controls how much storage is reserved up front. Pools grow by
/// doubling whenever they run out, so this is a performance knob, not a
/// limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of slots reserved at construction.
    ///
    /// Default: 64. Clamped to at least 1.
    pub initial_capacity: u32,
}

impl PoolConfig {
    /// Default number of slots reserved at construction.
    pub const DEFAULT_INITIAL_CAPACITY: u32 = 64;

    /// Create a config reserving `initial_capacity` slots.
    pub fn new(initial_capacity: u32) -> Self {
        Self {
            initial_capacity: initial_capacity.max(1),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}
