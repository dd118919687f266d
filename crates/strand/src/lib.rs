//! Strand: an arena-backed directed multigraph with exact undo/redo.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Strand sub-crates. For most users, adding `strand` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strand::prelude::*;
//!
//! let vertex = Layout::builder().f64("x").f64("y").build().unwrap();
//! let mut g = UndoableGraph::new(vertex, Layout::empty()).unwrap();
//!
//! let a = g.add_vertex();
//! let b = g.add_vertex();
//! let c = g.add_vertex();
//! g.add_edge(a, b);
//! g.insert_edge(a, 1, c, 0);
//! g.set_undo_point();
//!
//! let x = g.graph().vertex_attribute_id("x").unwrap();
//! g.set_vertex_attribute(a, x, &1.5f64.to_le_bytes());
//! g.set_undo_point();
//!
//! assert_eq!(g.graph().outgoing_edges(a).len(), 2);
//! g.undo().unwrap();
//! assert_eq!(g.graph().vertex_attribute(a, x), &0f64.to_le_bytes());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strand-core` | Indices, stable ids, errors, listener trait |
//! | [`arena`] | `strand-arena` | Record layouts, slot storage, entity pools, handles |
//! | [`graph`] | `strand-graph` | The graph, adjacency chains, cursors, properties |
//! | [`undo`] | `strand-undo` | Edit records, history, stable-id maps |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core identifiers, errors and traits (`strand-core`).
///
/// Contains the slot indices, [`types::StableId`], the error enums and the
/// [`types::GraphListener`] notification trait.
pub use strand_core as types;

/// Fixed-layout record storage (`strand-arena`).
///
/// [`arena::Layout`] describes a record, [`arena::EntityPool`] allocates
/// records of one layout with slot reuse.
pub use strand_arena as arena;

/// The directed multigraph (`strand-graph`).
///
/// [`graph::Graph`] with ordered incoming and outgoing chains per vertex,
/// [`graph::EdgeCursor`] for removal during traversal.
pub use strand_graph as graph;

/// Undo/redo journal (`strand-undo`).
///
/// [`undo::UndoableGraph`] wraps a graph and records every mutation.
pub use strand_undo as undo;

/// Common imports for typical Strand usage.
///
/// ```rust
/// use strand::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use strand_core::{
        AttributeId, EdgeIndex, Entity, GraphListener, PropertyId, StableId, VertexIndex,
    };

    // Errors
    pub use strand_core::{JournalError, LayoutError};

    // Arena
    pub use strand_arena::{Handle, Layout, PoolConfig};

    // Graph
    pub use strand_graph::{Direction, EdgeCursor, Graph, GraphConfig};

    // Undo
    pub use strand_undo::{JournalConfig, UndoableGraph};
}
