//! Change-notification trait for graph observers.

use crate::id::{AttributeId, EdgeIndex, Entity, PropertyId, VertexIndex};

/// Observer of structural and attribute changes made to a graph.
///
/// Registered listeners are called synchronously from inside the mutating
/// graph operation, in registration order. Every method has an empty
/// default so implementors only override what they watch.
///
/// "Before" hooks run while the entity is still intact, so a listener can
/// still read the old state through its index. "After" hooks for removals
/// receive an index whose slot is already back on the free list and must
/// not be dereferenced.
pub trait GraphListener {
    /// A vertex was allocated and initialised.
    fn vertex_added(&mut self, _vertex: VertexIndex) {}

    /// A vertex is about to be removed. Its incident edges are already gone.
    fn before_vertex_removed(&mut self, _vertex: VertexIndex) {}

    /// A vertex slot was released.
    fn vertex_removed(&mut self, _vertex: VertexIndex) {}

    /// An edge was allocated and linked into both adjacency chains.
    fn edge_added(&mut self, _edge: EdgeIndex, _source: VertexIndex, _target: VertexIndex) {}

    /// An edge is about to be unlinked and released.
    fn before_edge_removed(&mut self, _edge: EdgeIndex) {}

    /// An edge slot was released.
    fn edge_removed(&mut self, _edge: EdgeIndex) {}

    /// An in-slot attribute is about to be overwritten.
    fn before_attribute_change(&mut self, _entity: Entity, _attribute: AttributeId) {}

    /// An in-slot attribute was overwritten.
    fn attribute_changed(&mut self, _entity: Entity, _attribute: AttributeId) {}

    /// An out-of-slot property is about to be set or cleared.
    fn before_property_change(&mut self, _entity: Entity, _property: PropertyId) {}

    /// An out-of-slot property was set or cleared.
    fn property_changed(&mut self, _entity: Entity, _property: PropertyId) {}
}
