//! Change notifications emitted by graph mutations.

use strand_core::{AttributeId, Entity, PropertyId, VertexIndex};
use strand_graph::Graph;
use strand_test_utils::{point_layout, weighted_layout, GraphEvent, RecordingListener};

fn graph_with_log() -> (Graph, std::rc::Rc<std::cell::RefCell<Vec<GraphEvent>>>) {
    let mut g = Graph::new(point_layout(), weighted_layout()).unwrap();
    let (listener, log) = RecordingListener::new();
    g.add_listener(Box::new(listener));
    (g, log)
}

#[test]
fn structural_events_in_order() {
    let (mut g, log) = graph_with_log();
    let a = g.add_vertex();
    let b = g.add_vertex();
    let e = g.add_edge(a, b);
    g.remove_edge(e);
    assert_eq!(
        *log.borrow(),
        vec![
            GraphEvent::VertexAdded(a),
            GraphEvent::VertexAdded(b),
            GraphEvent::EdgeAdded(e, a, b),
            GraphEvent::BeforeEdgeRemoved(e),
            GraphEvent::EdgeRemoved(e),
        ]
    );
}

#[test]
fn vertex_removal_reports_edges_first() {
    let (mut g, log) = graph_with_log();
    let a = g.add_vertex();
    let b = g.add_vertex();
    let out = g.add_edge(a, b);
    let inc = g.add_edge(b, a);
    log.borrow_mut().clear();

    g.remove_vertex(a);
    assert_eq!(
        *log.borrow(),
        vec![
            GraphEvent::BeforeEdgeRemoved(out),
            GraphEvent::EdgeRemoved(out),
            GraphEvent::BeforeEdgeRemoved(inc),
            GraphEvent::EdgeRemoved(inc),
            GraphEvent::BeforeVertexRemoved(a),
            GraphEvent::VertexRemoved(a),
        ]
    );
}

#[test]
fn attribute_and_property_changes_are_bracketed() {
    let (mut g, log) = graph_with_log();
    let v = g.add_vertex();
    let e = g.add_edge(v, v);
    let frame = g.vertex_attribute_id("frame").unwrap();
    let tag = g.register_edge_property("tag");
    log.borrow_mut().clear();

    g.set_vertex_attribute(v, frame, &3i32.to_le_bytes());
    g.set_edge_property(e, tag, b"t");
    assert_eq!(
        *log.borrow(),
        vec![
            GraphEvent::BeforeAttributeChange(Entity::Vertex(v), AttributeId(2)),
            GraphEvent::AttributeChanged(Entity::Vertex(v), AttributeId(2)),
            GraphEvent::BeforePropertyChange(Entity::Edge(e), PropertyId(0)),
            GraphEvent::PropertyChanged(Entity::Edge(e), PropertyId(0)),
        ]
    );
}

#[test]
fn every_listener_is_notified() {
    let mut g = Graph::new(point_layout(), weighted_layout()).unwrap();
    let (first, first_log) = RecordingListener::new();
    let (second, second_log) = RecordingListener::new();
    g.add_listener(Box::new(first));
    g.add_listener(Box::new(second));
    assert_eq!(g.listener_count(), 2);

    g.add_vertex();
    assert_eq!(first_log.borrow().len(), 1);
    assert_eq!(*first_log.borrow(), *second_log.borrow());
    assert_eq!(first_log.borrow()[0], GraphEvent::VertexAdded(VertexIndex(0)));
}
