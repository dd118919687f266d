//! Listener that records every notification it receives.

use std::cell::RefCell;
use std::rc::Rc;

use strand_core::{AttributeId, EdgeIndex, Entity, GraphListener, PropertyId, VertexIndex};

/// One change notification, as seen by a listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphEvent {
    VertexAdded(VertexIndex),
    BeforeVertexRemoved(VertexIndex),
    VertexRemoved(VertexIndex),
    EdgeAdded(EdgeIndex, VertexIndex, VertexIndex),
    BeforeEdgeRemoved(EdgeIndex),
    EdgeRemoved(EdgeIndex),
    BeforeAttributeChange(Entity, AttributeId),
    AttributeChanged(Entity, AttributeId),
    BeforePropertyChange(Entity, PropertyId),
    PropertyChanged(Entity, PropertyId),
}

/// [`GraphListener`] that appends every event to a shared log.
///
/// The graph takes ownership of the listener, so the log lives behind an
/// `Rc<RefCell<_>>`; keep the handle returned by [`new`](Self::new) to
/// inspect it.
#[derive(Clone, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<GraphEvent>>>,
}

impl RecordingListener {
    /// Create a listener and a handle onto its event log.
    pub fn new() -> (Self, Rc<RefCell<Vec<GraphEvent>>>) {
        let listener = Self::default();
        let log = Rc::clone(&listener.events);
        (listener, log)
    }
}

impl GraphListener for RecordingListener {
    fn vertex_added(&mut self, vertex: VertexIndex) {
        self.events.borrow_mut().push(GraphEvent::VertexAdded(vertex));
    }

    fn before_vertex_removed(&mut self, vertex: VertexIndex) {
        self.events
            .borrow_mut()
            .push(GraphEvent::BeforeVertexRemoved(vertex));
    }

    fn vertex_removed(&mut self, vertex: VertexIndex) {
        self.events.borrow_mut().push(GraphEvent::VertexRemoved(vertex));
    }

    fn edge_added(&mut self, edge: EdgeIndex, source: VertexIndex, target: VertexIndex) {
        self.events
            .borrow_mut()
            .push(GraphEvent::EdgeAdded(edge, source, target));
    }

    fn before_edge_removed(&mut self, edge: EdgeIndex) {
        self.events
            .borrow_mut()
            .push(GraphEvent::BeforeEdgeRemoved(edge));
    }

    fn edge_removed(&mut self, edge: EdgeIndex) {
        self.events.borrow_mut().push(GraphEvent::EdgeRemoved(edge));
    }

    fn before_attribute_change(&mut self, entity: Entity, attribute: AttributeId) {
        self.events
            .borrow_mut()
            .push(GraphEvent::BeforeAttributeChange(entity, attribute));
    }

    fn attribute_changed(&mut self, entity: Entity, attribute: AttributeId) {
        self.events
            .borrow_mut()
            .push(GraphEvent::AttributeChanged(entity, attribute));
    }

    fn before_property_change(&mut self, entity: Entity, property: PropertyId) {
        self.events
            .borrow_mut()
            .push(GraphEvent::BeforePropertyChange(entity, property));
    }

    fn property_changed(&mut self, entity: Entity, property: PropertyId) {
        self.events
            .borrow_mut()
            .push(GraphEvent::PropertyChanged(entity, property));
    }
}
