//! Graph construction parameters.

use strand_arena::PoolConfig;

/// Configuration for a [`Graph`](crate::Graph).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphConfig {
    /// Vertex pool sizing.
    pub vertices: PoolConfig,
    /// Edge pool sizing.
    pub edges: PoolConfig,
}

impl GraphConfig {
    /// Reserve room for `vertices` vertices and `edges` edges up front.
    pub fn with_capacity(vertices: u32, edges: u32) -> Self {
        Self {
            vertices: PoolConfig::new(vertices),
            edges: PoolConfig::new(edges),
        }
    }
}
