//! A graph that journals its own mutations.
//!
//! [`UndoableGraph`] owns a [`Graph`] and mirrors its mutation API. Each
//! mutation is applied to the graph first and then, while recording is
//! on, captured as an edit record: the entity's stable id, its chain
//! positions where they matter, and whatever bytes undo needs to restore.
//! Undo and redo decode those records and replay them straight against
//! the graph, so replay itself is never journaled.

use strand_arena::{Handle, Layout, LayoutError};
use strand_core::{
    AttributeId, EdgeIndex, Entity, GraphListener, JournalError, PropertyId, VertexIndex,
};
use strand_graph::{EdgeCursor, Graph, GraphConfig};
use tracing::{debug, trace};

use crate::config::JournalConfig;
use crate::edit::{
    capture_edge, capture_vertex, owner_id, AttributeRecord, Edit, EditKind, PropertyRecord,
    Replay,
};
use crate::ids::StableIdMap;
use crate::list::EditList;
use crate::log::UndoLog;

/// A [`Graph`] with linear undo/redo history.
///
/// ```
/// use strand_arena::Layout;
/// use strand_undo::UndoableGraph;
///
/// let mut g = UndoableGraph::new(Layout::empty(), Layout::empty()).unwrap();
/// let a = g.add_vertex();
/// let b = g.add_vertex();
/// g.set_undo_point();
/// g.add_edge(a, b);
/// g.set_undo_point();
///
/// assert_eq!(g.undo().unwrap(), 1);
/// assert_eq!(g.graph().edge_count(), 0);
/// assert_eq!(g.redo().unwrap(), 1);
/// assert_eq!(g.graph().edge_count(), 1);
/// ```
pub struct UndoableGraph {
    graph: Graph,
    edits: EditList,
    log: UndoLog,
    vertex_ids: StableIdMap<VertexIndex>,
    edge_ids: StableIdMap<EdgeIndex>,
    recording: bool,
    /// Reused encode buffer.
    scratch: Vec<u8>,
}

impl UndoableGraph {
    /// Empty journaled graph with default sizing.
    pub fn new(vertex_attributes: Layout, edge_attributes: Layout) -> Result<Self, LayoutError> {
        Self::with_config(
            vertex_attributes,
            edge_attributes,
            &GraphConfig::default(),
            &JournalConfig::default(),
        )
    }

    /// Empty journaled graph with explicit sizing.
    pub fn with_config(
        vertex_attributes: Layout,
        edge_attributes: Layout,
        graph_config: &GraphConfig,
        journal_config: &JournalConfig,
    ) -> Result<Self, LayoutError> {
        let graph = Graph::with_config(vertex_attributes, edge_attributes, graph_config)?;
        Ok(Self::from_graph(graph, journal_config))
    }

    /// Start journaling an existing graph. Its current state becomes the
    /// bottom of the history.
    pub fn from_graph(graph: Graph, config: &JournalConfig) -> Self {
        Self {
            graph,
            edits: EditList::new(&config.edits),
            log: UndoLog::new(config.initial_log_bytes),
            vertex_ids: StableIdMap::new(),
            edge_ids: StableIdMap::new(),
            recording: true,
            scratch: Vec::new(),
        }
    }

    /// Read access to the graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    // ── Recording control ──────────────────────────────────────

    /// Whether mutations are currently journaled.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Stop journaling mutations.
    ///
    /// Changes made while paused are invisible to the history. Undoing
    /// past them is only sound if they were reverted before resuming.
    pub fn pause_recording(&mut self) {
        self.recording = false;
    }

    /// Resume journaling mutations.
    pub fn resume_recording(&mut self) {
        self.recording = true;
    }

    // ── History ────────────────────────────────────────────────

    /// Close the current group of edits.
    pub fn set_undo_point(&mut self) {
        self.edits.set_undo_point();
    }

    /// Revert the most recent group of edits.
    ///
    /// Returns the number of edits reverted; `Ok(0)` with no history.
    pub fn undo(&mut self) -> Result<usize, JournalError> {
        let Self {
            graph,
            edits,
            log,
            vertex_ids,
            edge_ids,
            ..
        } = self;
        let vertex_payload = graph.vertex_attributes().size();
        let edge_payload = graph.edge_attributes().size();
        let applied = edits.undo(|entry| {
            let kind = EditKind::from_type_index(entry.type_tag)?;
            let mark = log.position();
            let record = log.undo(entry.record_len as usize)?;
            trace!(edit = %kind, index = %entry.index, "undo");
            let result = Edit::decode(kind, record, vertex_payload, edge_payload)
                .and_then(|edit| edit.apply(Replay::Backward, graph, vertex_ids, edge_ids));
            // The list keeps its cursor on failure; the log must match it.
            if result.is_err() {
                log.seek(mark);
            }
            result
        })?;
        if applied > 0 {
            debug!(applied, cursor = edits.cursor(), "undo group");
        }
        Ok(applied)
    }

    /// Reapply the next group of undone edits.
    ///
    /// Returns the number of edits reapplied; `Ok(0)` with nothing to redo.
    pub fn redo(&mut self) -> Result<usize, JournalError> {
        let Self {
            graph,
            edits,
            log,
            vertex_ids,
            edge_ids,
            ..
        } = self;
        let vertex_payload = graph.vertex_attributes().size();
        let edge_payload = graph.edge_attributes().size();
        let applied = edits.redo(|entry| {
            let kind = EditKind::from_type_index(entry.type_tag)?;
            let mark = log.position();
            let record = log.redo(entry.record_len as usize)?;
            trace!(edit = %kind, index = %entry.index, "redo");
            let result = Edit::decode(kind, record, vertex_payload, edge_payload)
                .and_then(|edit| edit.apply(Replay::Forward, graph, vertex_ids, edge_ids));
            if result.is_err() {
                log.seek(mark);
            }
            result
        })?;
        if applied > 0 {
            debug!(applied, cursor = edits.cursor(), "redo group");
        }
        Ok(applied)
    }

    /// Whether [`undo`](Self::undo) would do anything.
    pub fn can_undo(&self) -> bool {
        self.edits.can_undo()
    }

    /// Whether [`redo`](Self::redo) would do anything.
    pub fn can_redo(&self) -> bool {
        self.edits.can_redo()
    }

    /// The edit list.
    pub fn edits(&self) -> &EditList {
        &self.edits
    }

    /// The record log.
    pub fn log(&self) -> &UndoLog {
        &self.log
    }

    /// Stable-id bindings of vertices.
    pub fn vertex_ids(&self) -> &StableIdMap<VertexIndex> {
        &self.vertex_ids
    }

    /// Stable-id bindings of edges.
    pub fn edge_ids(&self) -> &StableIdMap<EdgeIndex> {
        &self.edge_ids
    }

    /// Encode `edit` into the log and append its entry.
    fn commit(
        edits: &mut EditList,
        log: &mut UndoLog,
        scratch: &mut Vec<u8>,
        edit: &Edit<'_>,
    ) {
        scratch.clear();
        edit.encode(scratch);
        log.record(scratch.len()).copy_from_slice(scratch);
        edits.record(edit.kind().type_index(), scratch.len() as u32);
    }

    // ── Structure ──────────────────────────────────────────────

    /// Add a vertex with zeroed attributes.
    pub fn add_vertex(&mut self) -> VertexIndex {
        let v = self.graph.add_vertex();
        self.record_vertex(EditKind::AddVertex, v);
        v
    }

    /// Add a vertex with the given attribute bytes.
    pub fn add_vertex_with_payload(&mut self, payload: &[u8]) -> VertexIndex {
        let v = self.graph.add_vertex_with_payload(payload);
        self.record_vertex(EditKind::AddVertex, v);
        v
    }

    /// Add an edge at the head of both chains.
    pub fn add_edge(&mut self, source: VertexIndex, target: VertexIndex) -> EdgeIndex {
        let e = self.graph.add_edge(source, target);
        self.record_edge(EditKind::AddEdge, e);
        e
    }

    /// Add an edge at explicit chain positions.
    pub fn insert_edge(
        &mut self,
        source: VertexIndex,
        source_out_index: usize,
        target: VertexIndex,
        target_in_index: usize,
    ) -> EdgeIndex {
        let e = self
            .graph
            .insert_edge(source, source_out_index, target, target_in_index);
        self.record_edge(EditKind::AddEdge, e);
        e
    }

    /// Add an edge at explicit chain positions with attribute bytes.
    pub fn insert_edge_with_payload(
        &mut self,
        source: VertexIndex,
        source_out_index: usize,
        target: VertexIndex,
        target_in_index: usize,
        payload: &[u8],
    ) -> EdgeIndex {
        let e = self.graph.insert_edge_with_payload(
            source,
            source_out_index,
            target,
            target_in_index,
            payload,
        );
        self.record_edge(EditKind::AddEdge, e);
        e
    }

    /// Remove an edge.
    pub fn remove_edge(&mut self, e: EdgeIndex) {
        self.record_edge(EditKind::RemoveEdge, e);
        self.graph.remove_edge(e);
        self.edge_ids.unbind_index(e);
    }

    /// Remove a vertex and its edges.
    ///
    /// Each incident edge is journaled as its own removal, with the chain
    /// positions it had at that moment, ahead of the vertex removal.
    pub fn remove_vertex(&mut self, v: VertexIndex) {
        for e in self.graph.incident_edges(v) {
            self.remove_edge(e);
        }
        self.record_vertex(EditKind::RemoveVertex, v);
        self.graph.remove_vertex(v);
        self.vertex_ids.unbind_index(v);
    }

    /// Advance `cursor` over the graph.
    pub fn next_edge(&self, cursor: &mut EdgeCursor) -> Option<EdgeIndex> {
        cursor.next(&self.graph)
    }

    /// Remove the cursor's current edge through the journal.
    pub fn remove_current(&mut self, cursor: &mut EdgeCursor) -> bool {
        match cursor.take_current() {
            Some(e) => {
                self.remove_edge(e);
                true
            }
            None => false,
        }
    }

    fn record_vertex(&mut self, kind: EditKind, v: VertexIndex) {
        if !self.recording {
            return;
        }
        let record = capture_vertex(&self.graph, &mut self.vertex_ids, v);
        let edit = match kind {
            EditKind::RemoveVertex => Edit::RemoveVertex(record),
            _ => Edit::AddVertex(record),
        };
        Self::commit(&mut self.edits, &mut self.log, &mut self.scratch, &edit);
    }

    fn record_edge(&mut self, kind: EditKind, e: EdgeIndex) {
        if !self.recording {
            return;
        }
        let record = capture_edge(&self.graph, &mut self.vertex_ids, &mut self.edge_ids, e);
        let edit = match kind {
            EditKind::RemoveEdge => Edit::RemoveEdge(record),
            _ => Edit::AddEdge(record),
        };
        Self::commit(&mut self.edits, &mut self.log, &mut self.scratch, &edit);
    }

    // ── Attributes and properties ──────────────────────────────

    /// Overwrite a vertex attribute.
    pub fn set_vertex_attribute(&mut self, v: VertexIndex, attribute: AttributeId, value: &[u8]) {
        let old = self.graph.vertex_attribute(v, attribute).to_vec();
        self.graph.set_vertex_attribute(v, attribute, value);
        self.record_attribute(Entity::Vertex(v), attribute, &old, value);
    }

    /// Overwrite an edge attribute.
    pub fn set_edge_attribute(&mut self, e: EdgeIndex, attribute: AttributeId, value: &[u8]) {
        let old = self.graph.edge_attribute(e, attribute).to_vec();
        self.graph.set_edge_attribute(e, attribute, value);
        self.record_attribute(Entity::Edge(e), attribute, &old, value);
    }

    /// Declare a vertex property. Registration is not journaled.
    pub fn register_vertex_property(&mut self, name: &str) -> PropertyId {
        self.graph.register_vertex_property(name)
    }

    /// Declare an edge property. Registration is not journaled.
    pub fn register_edge_property(&mut self, name: &str) -> PropertyId {
        self.graph.register_edge_property(name)
    }

    /// Set a vertex property, returning the previous value.
    pub fn set_vertex_property(
        &mut self,
        v: VertexIndex,
        property: PropertyId,
        value: &[u8],
    ) -> Option<Vec<u8>> {
        let old = self.graph.set_vertex_property(v, property, value);
        self.record_property(Entity::Vertex(v), property, old.as_deref(), Some(value));
        old
    }

    /// Set an edge property, returning the previous value.
    pub fn set_edge_property(
        &mut self,
        e: EdgeIndex,
        property: PropertyId,
        value: &[u8],
    ) -> Option<Vec<u8>> {
        let old = self.graph.set_edge_property(e, property, value);
        self.record_property(Entity::Edge(e), property, old.as_deref(), Some(value));
        old
    }

    /// Clear a vertex property. Nothing is journaled if it was unset.
    pub fn remove_vertex_property(
        &mut self,
        v: VertexIndex,
        property: PropertyId,
    ) -> Option<Vec<u8>> {
        let old = self.graph.remove_vertex_property(v, property)?;
        self.record_property(Entity::Vertex(v), property, Some(&old), None);
        Some(old)
    }

    /// Clear an edge property. Nothing is journaled if it was unset.
    pub fn remove_edge_property(&mut self, e: EdgeIndex, property: PropertyId) -> Option<Vec<u8>> {
        let old = self.graph.remove_edge_property(e, property)?;
        self.record_property(Entity::Edge(e), property, Some(&old), None);
        Some(old)
    }

    fn record_attribute(&mut self, entity: Entity, attribute: AttributeId, old: &[u8], new: &[u8]) {
        if !self.recording {
            return;
        }
        let record = AttributeRecord {
            id: owner_id(entity, &mut self.vertex_ids, &mut self.edge_ids),
            attribute,
            old,
            new,
        };
        let edit = match entity {
            Entity::Vertex(_) => Edit::SetVertexAttribute(record),
            Entity::Edge(_) => Edit::SetEdgeAttribute(record),
        };
        Self::commit(&mut self.edits, &mut self.log, &mut self.scratch, &edit);
    }

    fn record_property(
        &mut self,
        entity: Entity,
        property: PropertyId,
        old: Option<&[u8]>,
        new: Option<&[u8]>,
    ) {
        if !self.recording {
            return;
        }
        let record = PropertyRecord {
            id: owner_id(entity, &mut self.vertex_ids, &mut self.edge_ids),
            property,
            old,
            new,
        };
        let edit = match entity {
            Entity::Vertex(_) => Edit::SetVertexProperty(record),
            Entity::Edge(_) => Edit::SetEdgeProperty(record),
        };
        Self::commit(&mut self.edits, &mut self.log, &mut self.scratch, &edit);
    }

    // ── Pass-through ───────────────────────────────────────────

    /// Acquire an unbound vertex handle.
    pub fn vertex_handle(&mut self) -> Handle<VertexIndex> {
        self.graph.vertex_handle()
    }

    /// Acquire an unbound edge handle.
    pub fn edge_handle(&mut self) -> Handle<EdgeIndex> {
        self.graph.edge_handle()
    }

    /// Return a vertex handle.
    pub fn release_vertex_handle(&mut self, handle: Handle<VertexIndex>) {
        self.graph.release_vertex_handle(handle);
    }

    /// Return an edge handle.
    pub fn release_edge_handle(&mut self, handle: Handle<EdgeIndex>) {
        self.graph.release_edge_handle(handle);
    }

    /// Register a change listener on the underlying graph.
    ///
    /// Listeners also hear every change made by undo and redo.
    pub fn add_listener(&mut self, listener: Box<dyn GraphListener>) {
        self.graph.add_listener(listener);
    }
}

impl std::fmt::Debug for UndoableGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoableGraph")
            .field("graph", &self.graph)
            .field("edits", &self.edits)
            .field("log_bytes", &self.log.len())
            .field("recording", &self.recording)
            .finish()
    }
}
