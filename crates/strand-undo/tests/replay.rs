//! Undoing a whole random history restores the starting graph exactly,
//! and redoing it restores the final graph exactly.

use proptest::prelude::*;
use strand_core::{EdgeIndex, PropertyId, VertexIndex};
use strand_test_utils::{chain_graph, GraphSnapshot};
use strand_undo::{JournalConfig, UndoableGraph};

#[derive(Clone, Debug)]
enum Op {
    AddVertex(i32),
    InsertEdge(usize, usize, usize, usize),
    RemoveEdge(usize),
    RemoveVertex(usize),
    SetX(usize, u8),
    SetWeight(usize, u8),
    SetLabel(usize, Vec<u8>),
    ClearLabel(usize),
    SetTag(usize, Vec<u8>),
    Mark,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::AddVertex),
        4 => (any::<usize>(), 0usize..4, any::<usize>(), 0usize..4)
            .prop_map(|(s, sp, t, tp)| Op::InsertEdge(s, sp, t, tp)),
        2 => any::<usize>().prop_map(Op::RemoveEdge),
        1 => any::<usize>().prop_map(Op::RemoveVertex),
        1 => (any::<usize>(), any::<u8>()).prop_map(|(i, x)| Op::SetX(i, x)),
        1 => (any::<usize>(), any::<u8>()).prop_map(|(i, w)| Op::SetWeight(i, w)),
        1 => (any::<usize>(), proptest::collection::vec(any::<u8>(), 0..6))
            .prop_map(|(i, b)| Op::SetLabel(i, b)),
        1 => any::<usize>().prop_map(Op::ClearLabel),
        1 => (any::<usize>(), proptest::collection::vec(any::<u8>(), 1..4))
            .prop_map(|(i, b)| Op::SetTag(i, b)),
        1 => Just(Op::Mark),
    ]
}

struct Fixture {
    g: UndoableGraph,
    label: PropertyId,
    tag: PropertyId,
}

fn fixture() -> Fixture {
    let (graph, _, _) = chain_graph(3);
    let mut g = UndoableGraph::from_graph(graph, &JournalConfig::default());
    let label = g.register_vertex_property("label");
    let tag = g.register_edge_property("tag");
    Fixture { g, label, tag }
}

fn pick_vertex(g: &UndoableGraph, i: usize) -> Option<VertexIndex> {
    let live: Vec<_> = g.graph().vertices().collect();
    (!live.is_empty()).then(|| live[i % live.len()])
}

fn pick_edge(g: &UndoableGraph, i: usize) -> Option<EdgeIndex> {
    let live: Vec<_> = g.graph().all_edges().collect();
    (!live.is_empty()).then(|| live[i % live.len()])
}

fn run(f: &mut Fixture, op: &Op) {
    let g = &mut f.g;
    match *op {
        Op::AddVertex(frame) => {
            let mut payload = vec![0u8; 16];
            payload.extend_from_slice(&frame.to_le_bytes());
            g.add_vertex_with_payload(&payload);
        }
        Op::InsertEdge(s, sp, t, tp) => {
            if let (Some(s), Some(t)) = (pick_vertex(g, s), pick_vertex(g, t)) {
                g.insert_edge(s, sp, t, tp);
            }
        }
        Op::RemoveEdge(i) => {
            if let Some(e) = pick_edge(g, i) {
                g.remove_edge(e);
            }
        }
        Op::RemoveVertex(i) => {
            if let Some(v) = pick_vertex(g, i) {
                g.remove_vertex(v);
            }
        }
        Op::SetX(i, x) => {
            if let Some(v) = pick_vertex(g, i) {
                let attr = g.graph().vertex_attribute_id("x").unwrap();
                g.set_vertex_attribute(v, attr, &f64::from(x).to_le_bytes());
            }
        }
        Op::SetWeight(i, w) => {
            if let Some(e) = pick_edge(g, i) {
                let attr = g.graph().edge_attribute_id("weight").unwrap();
                g.set_edge_attribute(e, attr, &f64::from(w).to_le_bytes());
            }
        }
        Op::SetLabel(i, ref bytes) => {
            if let Some(v) = pick_vertex(g, i) {
                g.set_vertex_property(v, f.label, bytes);
            }
        }
        Op::ClearLabel(i) => {
            if let Some(v) = pick_vertex(g, i) {
                g.remove_vertex_property(v, f.label);
            }
        }
        Op::SetTag(i, ref bytes) => {
            if let Some(e) = pick_edge(g, i) {
                g.set_edge_property(e, f.tag, bytes);
            }
        }
        Op::Mark => g.set_undo_point(),
    }
}

proptest! {
    #[test]
    fn undo_all_then_redo_all_is_exact(ops in proptest::collection::vec(op(), 1..48)) {
        let mut f = fixture();
        let initial = GraphSnapshot::capture(f.g.graph());
        let initial_print = f.g.graph().fingerprint();

        for op in &ops {
            run(&mut f, op);
        }
        let last = GraphSnapshot::capture(f.g.graph());
        let last_print = f.g.graph().fingerprint();

        while f.g.undo().unwrap() > 0 {}
        prop_assert_eq!(&GraphSnapshot::capture(f.g.graph()), &initial);
        prop_assert_eq!(f.g.graph().fingerprint(), initial_print);

        while f.g.redo().unwrap() > 0 {}
        prop_assert_eq!(&GraphSnapshot::capture(f.g.graph()), &last);
        prop_assert_eq!(f.g.graph().fingerprint(), last_print);
    }

    #[test]
    fn each_group_undoes_to_its_starting_state(ops in proptest::collection::vec(op(), 1..32)) {
        let mut f = fixture();
        let mut states = vec![GraphSnapshot::capture(f.g.graph())];
        for op in &ops {
            run(&mut f, op);
            if matches!(op, Op::Mark) {
                states.push(GraphSnapshot::capture(f.g.graph()));
            }
        }
        f.g.set_undo_point();
        states.push(GraphSnapshot::capture(f.g.graph()));
        states.dedup();

        // Walk back group by group; every stop must be a recorded state.
        loop {
            let here = GraphSnapshot::capture(f.g.graph());
            prop_assert!(states.contains(&here));
            if f.g.undo().unwrap() == 0 {
                break;
            }
        }
        prop_assert_eq!(&GraphSnapshot::capture(f.g.graph()), &states[0]);
    }
}
