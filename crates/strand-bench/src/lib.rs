//! Benchmark profiles for the Strand arena graph.
//!
//! Provides deterministic graphs and edit bursts shared by the benches:
//!
//! - [`grid_graph`]: `width × height` vertices, each linked to its right and lower neighbour
//! - [`scatter_edges`]: pseudo-random extra edges at pseudo-random chain positions
//! - [`edit_burst`]: a mixed run of journaled mutations with undo points

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strand_arena::Layout;
use strand_core::VertexIndex;
use strand_graph::{Graph, GraphConfig};
use strand_undo::UndoableGraph;

/// Vertex layout used by every profile: `x: f64, y: f64`.
pub fn position_layout() -> Layout {
    Layout::builder()
        .f64("x")
        .f64("y")
        .build()
        .expect("two distinct f64 fields form a valid layout")
}

/// Build a `width × height` grid.
///
/// Vertex `(col, row)` sits in slot `row * width + col`. Edges run to the
/// right and downward neighbour, so the graph has
/// `(width - 1) * height + width * (height - 1)` edges.
pub fn grid_graph(width: u32, height: u32) -> Graph {
    let vertices = width * height;
    let edges = 2 * vertices;
    let mut g = Graph::with_config(
        position_layout(),
        Layout::empty(),
        &GraphConfig::with_capacity(vertices, edges),
    )
    .expect("profile layouts are valid");

    let mut payload = [0u8; 16];
    for row in 0..height {
        for col in 0..width {
            payload[..8].copy_from_slice(&f64::from(col).to_le_bytes());
            payload[8..].copy_from_slice(&f64::from(row).to_le_bytes());
            g.add_vertex_with_payload(&payload);
        }
    }
    for row in 0..height {
        for col in 0..width {
            let here = VertexIndex(row * width + col);
            if col + 1 < width {
                g.add_edge(here, VertexIndex(row * width + col + 1));
            }
            if row + 1 < height {
                g.add_edge(here, VertexIndex((row + 1) * width + col));
            }
        }
    }
    g
}

/// Linear congruential step used for deterministic choices.
fn next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state >> 33
}

/// Add `n` edges between pseudo-random live vertices at pseudo-random
/// chain positions. Does nothing on a graph without vertices.
pub fn scatter_edges(g: &mut Graph, n: usize, seed: u64) {
    let live: Vec<VertexIndex> = g.vertices().collect();
    if live.is_empty() {
        return;
    }
    let mut state = seed;
    for _ in 0..n {
        let s = live[next(&mut state) as usize % live.len()];
        let t = live[next(&mut state) as usize % live.len()];
        let sp = next(&mut state) as usize % 4;
        let tp = next(&mut state) as usize % 4;
        g.insert_edge(s, sp, t, tp);
    }
}

/// Apply `n` journaled mutations to `g`, closing a group every eight.
///
/// Mixes edge insertion and removal, attribute writes and the occasional
/// vertex addition or removal. Requires the graph to use
/// [`position_layout`] for vertices.
pub fn edit_burst(g: &mut UndoableGraph, n: usize, seed: u64) {
    let x = g
        .graph()
        .vertex_attribute_id("x")
        .expect("edit bursts run on position-layout graphs");
    let mut state = seed;
    for i in 0..n {
        let live: Vec<VertexIndex> = g.graph().vertices().collect();
        if live.is_empty() {
            g.add_vertex();
            continue;
        }
        let pick = |state: &mut u64| live[next(state) as usize % live.len()];
        match next(&mut state) % 10 {
            0..=3 => {
                let (s, t) = (pick(&mut state), pick(&mut state));
                g.insert_edge(s, 0, t, usize::MAX);
            }
            4 | 5 => {
                let v = pick(&mut state);
                let first = g.graph().outgoing_edges(v).get(0);
                if let Some(e) = first {
                    g.remove_edge(e);
                }
            }
            6 | 7 => {
                let v = pick(&mut state);
                g.set_vertex_attribute(v, x, &(i as f64).to_le_bytes());
            }
            8 => {
                g.add_vertex();
            }
            _ => {
                let v = pick(&mut state);
                g.remove_vertex(v);
            }
        }
        if i % 8 == 7 {
            g.set_undo_point();
        }
    }
    g.set_undo_point();
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_undo::JournalConfig;

    #[test]
    fn grid_has_expected_shape() {
        let g = grid_graph(4, 3);
        assert_eq!(g.vertex_count(), 12);
        assert_eq!(g.edge_count(), 3 * 3 + 4 * 2);
        assert_eq!(g.outgoing_edges(VertexIndex(0)).len(), 2);
        assert_eq!(g.incoming_edges(VertexIndex(11)).len(), 2);
    }

    #[test]
    fn scatter_is_deterministic() {
        let mut a = grid_graph(5, 5);
        let mut b = grid_graph(5, 5);
        scatter_edges(&mut a, 50, 7);
        scatter_edges(&mut b, 50, 7);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.edge_count(), 40 + 50);
    }

    #[test]
    fn edit_burst_undoes_completely() {
        let g = grid_graph(6, 6);
        let before = g.fingerprint();
        let mut g = UndoableGraph::from_graph(g, &JournalConfig::default());
        edit_burst(&mut g, 200, 42);
        while g.undo().unwrap() > 0 {}
        assert_eq!(g.graph().fingerprint(), before);
    }
}
