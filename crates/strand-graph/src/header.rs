//! Adjacency headers prefixed to every vertex and edge record.
//!
//! ```text
//! vertex: | first_in i32 | first_out i32 | user attributes ...
//! edge:   | source i32 | target i32 | next_source_edge i32 | next_target_edge i32 | user attributes ...
//! ```
//!
//! Header fields are index fields, so a freshly allocated record starts
//! with every link set to `NO_INDEX`.

use strand_arena::{Layout, LayoutError};

/// Offset of the first edge of a vertex's incoming chain.
pub(crate) const FIRST_IN: usize = 0;
/// Offset of the first edge of a vertex's outgoing chain.
pub(crate) const FIRST_OUT: usize = 4;
/// Size of the vertex header.
pub(crate) const VERTEX_HEADER_SIZE: usize = 8;

/// Offset of an edge's source vertex.
pub(crate) const SOURCE: usize = 0;
/// Offset of an edge's target vertex.
pub(crate) const TARGET: usize = 4;
/// Offset of the next edge in the source's outgoing chain.
pub(crate) const NEXT_SOURCE_EDGE: usize = 8;
/// Offset of the next edge in the target's incoming chain.
pub(crate) const NEXT_TARGET_EDGE: usize = 12;
/// Size of the edge header.
pub(crate) const EDGE_HEADER_SIZE: usize = 16;

fn vertex_header() -> Result<Layout, LayoutError> {
    Layout::builder()
        .index("strand.first_in")
        .index("strand.first_out")
        .build()
}

fn edge_header() -> Result<Layout, LayoutError> {
    Layout::builder()
        .index("strand.source")
        .index("strand.target")
        .index("strand.next_source_edge")
        .index("strand.next_target_edge")
        .build()
}

/// Full vertex record layout: header followed by `attributes`.
pub(crate) fn vertex_record(attributes: &Layout) -> Result<Layout, LayoutError> {
    vertex_header()?.concat(attributes)
}

/// Full edge record layout: header followed by `attributes`.
pub(crate) fn edge_record(attributes: &Layout) -> Result<Layout, LayoutError> {
    edge_header()?.concat(attributes)
}
