//! Arena-backed directed multigraph for Strand.
//!
//! Vertices and edges are fixed-layout records in two
//! [`EntityPool`](strand_arena::EntityPool)s. Adjacency is intrusive: each
//! vertex record holds the head of its incoming and outgoing edge chains,
//! and each edge record holds the next link of both chains it belongs to.
//!
//! ```text
//! vertex v ──first_out──▶ e2 ──next_source_edge──▶ e0 ──▶ NO_INDEX
//!          ──first_in───▶ e5 ──next_target_edge──▶ NO_INDEX
//! ```
//!
//! Insertion at the head is O(1); insertion at a position, removal and
//! position queries are O(degree). Vertex removal cascades to every
//! incident edge.
//!
//! Beyond the fixed attribute bytes in each record, entities can carry
//! variable-length properties in side tables, and every mutation is
//! reported to registered [`GraphListener`](strand_core::GraphListener)s.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adjacency;
pub mod config;
mod fingerprint;
pub mod graph;
mod header;
mod listeners;
pub mod property;

pub use adjacency::{Adjacency, AdjacencyIter, Direction, EdgeCursor, EdgesBetween};
pub use config::GraphConfig;
pub use graph::{Graph, IncidentEdges};
pub use property::PropertyMap;
