//! Core types and traits for the Strand arena graph.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! identifiers shared by the arena, graph and undo crates, the error types
//! of each subsystem, and the [`GraphListener`] notification trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod traits;

pub use error::{JournalError, LayoutError};
pub use id::{
    AttributeId, EdgeIndex, EditIndex, Entity, EntityKind, PoolIndex, PropertyId, StableId,
    VertexIndex, NO_INDEX,
};
pub use traits::GraphListener;
