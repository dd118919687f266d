//! Structural capture of a graph for equality assertions.
//!
//! [`Graph::fingerprint`] answers "same or not"; a [`GraphSnapshot`] also
//! says what differs when an `assert_eq!` fails.

use strand_core::{EdgeIndex, PropertyId, VertexIndex};
use strand_graph::Graph;

/// Observable state of one vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexState {
    pub index: VertexIndex,
    pub payload: Vec<u8>,
    pub outgoing: Vec<EdgeIndex>,
    pub incoming: Vec<EdgeIndex>,
    pub properties: Vec<(PropertyId, Vec<u8>)>,
}

/// Observable state of one edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeState {
    pub index: EdgeIndex,
    pub source: VertexIndex,
    pub target: VertexIndex,
    pub payload: Vec<u8>,
    pub properties: Vec<(PropertyId, Vec<u8>)>,
}

/// Everything a collaborator can observe about a graph, in slot order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphSnapshot {
    pub vertices: Vec<VertexState>,
    pub edges: Vec<EdgeState>,
}

impl GraphSnapshot {
    /// Capture `graph`.
    pub fn capture(graph: &Graph) -> Self {
        let vertices = graph
            .vertices()
            .map(|v| VertexState {
                index: v,
                payload: graph.vertex_payload(v).to_vec(),
                outgoing: graph.outgoing_edges(v).iter().collect(),
                incoming: graph.incoming_edges(v).iter().collect(),
                properties: graph
                    .vertex_properties_of(v)
                    .map(|(p, b)| (p, b.to_vec()))
                    .collect(),
            })
            .collect();
        let edges = graph
            .all_edges()
            .map(|e| EdgeState {
                index: e,
                source: graph.source(e),
                target: graph.target(e),
                payload: graph.edge_payload(e).to_vec(),
                properties: graph
                    .edge_properties_of(e)
                    .map(|(p, b)| (p, b.to_vec()))
                    .collect(),
            })
            .collect();
        Self { vertices, edges }
    }

    /// Number of captured vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of captured edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
