//! Reusable layouts and graphs.
//!
//! - [`point_layout`]: vertex attributes `x: f64, y: f64, frame: i32`.
//! - [`weighted_layout`]: edge attributes `weight: f64`.
//! - [`bare_graph`]: no attributes at all.
//! - [`chain_graph`]: `n` vertices linked `v0 → v1 → … → v(n-1)`.

use strand_arena::Layout;
use strand_core::{EdgeIndex, VertexIndex};
use strand_graph::Graph;

/// Vertex layout with a 2-D position and a frame number.
pub fn point_layout() -> Layout {
    Layout::builder()
        .f64("x")
        .f64("y")
        .i32("frame")
        .build()
        .expect("point layout is valid")
}

/// Edge layout with a single `f64` weight.
pub fn weighted_layout() -> Layout {
    Layout::builder()
        .f64("weight")
        .build()
        .expect("weighted layout is valid")
}

/// Graph without vertex or edge attributes.
pub fn bare_graph() -> Graph {
    Graph::new(Layout::empty(), Layout::empty()).expect("empty layouts are valid")
}

/// A path of `n` point vertices joined by weighted edges.
///
/// Vertex `i` has `x = i`, `y = -i`, `frame = i`; edge `i` (from vertex
/// `i` to `i + 1`) has `weight = i + 0.5`.
pub fn chain_graph(n: usize) -> (Graph, Vec<VertexIndex>, Vec<EdgeIndex>) {
    let mut g = Graph::new(point_layout(), weighted_layout()).expect("fixture layouts are valid");
    let mut vertices = Vec::with_capacity(n);
    for i in 0..n {
        let mut payload = Vec::with_capacity(20);
        payload.extend_from_slice(&(i as f64).to_le_bytes());
        payload.extend_from_slice(&(-(i as f64)).to_le_bytes());
        payload.extend_from_slice(&(i as i32).to_le_bytes());
        vertices.push(g.add_vertex_with_payload(&payload));
    }
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    for (i, pair) in vertices.windows(2).enumerate() {
        let weight = i as f64 + 0.5;
        edges.push(g.insert_edge_with_payload(pair[0], 0, pair[1], 0, &weight.to_le_bytes()));
    }
    (g, vertices, edges)
}
