//! The arena-backed graph.

use smallvec::SmallVec;
use strand_arena::{EntityPool, Handle, Layout, LayoutError, SlotView};
use strand_core::{
    AttributeId, EdgeIndex, Entity, GraphListener, PoolIndex, PropertyId, VertexIndex,
};
use tracing::trace;

use crate::adjacency::{Adjacency, Chain, Direction, EdgesBetween};
use crate::config::GraphConfig;
use crate::header::{
    EDGE_HEADER_SIZE, FIRST_IN, FIRST_OUT, NEXT_SOURCE_EDGE, NEXT_TARGET_EDGE, SOURCE, TARGET,
    VERTEX_HEADER_SIZE,
};
use crate::listeners::Listeners;
use crate::property::PropertyTables;

/// Incident edges collected ahead of a cascading vertex removal.
pub type IncidentEdges = SmallVec<[EdgeIndex; 8]>;

/// Directed multigraph whose vertices and edges are fixed-layout records
/// in two [`EntityPool`]s.
///
/// Each vertex roots two singly linked chains of edges (incoming and
/// outgoing) threaded through the edge records themselves. Parallel edges
/// and self-loops are allowed; every edge is a distinct slot.
///
/// Indices handed out by the graph stay valid until the entity is
/// removed. After that the slot may be reused by the next allocation of
/// the same kind, and the old index silently names the new entity.
pub struct Graph {
    vertices: EntityPool<VertexIndex>,
    edges: EntityPool<EdgeIndex>,
    vertex_attributes: Layout,
    edge_attributes: Layout,
    vertex_properties: PropertyTables<VertexIndex>,
    edge_properties: PropertyTables<EdgeIndex>,
    listeners: Listeners,
}

impl Graph {
    /// Empty graph whose records carry the given user attribute layouts.
    ///
    /// Fails if an attribute name collides with a header field.
    pub fn new(vertex_attributes: Layout, edge_attributes: Layout) -> Result<Self, LayoutError> {
        Self::with_config(vertex_attributes, edge_attributes, &GraphConfig::default())
    }

    /// Like [`new`](Graph::new) with explicit pool sizing.
    pub fn with_config(
        vertex_attributes: Layout,
        edge_attributes: Layout,
        config: &GraphConfig,
    ) -> Result<Self, LayoutError> {
        let vertex_record = crate::header::vertex_record(&vertex_attributes)?;
        let edge_record = crate::header::edge_record(&edge_attributes)?;
        Ok(Self {
            vertices: EntityPool::new(vertex_record, &config.vertices),
            edges: EntityPool::new(edge_record, &config.edges),
            vertex_attributes,
            edge_attributes,
            vertex_properties: PropertyTables::new(),
            edge_properties: PropertyTables::new(),
            listeners: Listeners::default(),
        })
    }

    // ── Handles ────────────────────────────────────────────────

    /// Acquire an unbound vertex handle.
    pub fn vertex_handle(&mut self) -> Handle<VertexIndex> {
        self.vertices.create_handle()
    }

    /// Acquire an unbound edge handle.
    pub fn edge_handle(&mut self) -> Handle<EdgeIndex> {
        self.edges.create_handle()
    }

    /// Return a vertex handle to the graph.
    pub fn release_vertex_handle(&mut self, handle: Handle<VertexIndex>) {
        self.vertices.release_handle(handle);
    }

    /// Return an edge handle to the graph.
    pub fn release_edge_handle(&mut self, handle: Handle<EdgeIndex>) {
        self.edges.release_handle(handle);
    }

    /// Rebind `handle` to vertex `v`.
    pub fn fetch_vertex<'h>(
        &self,
        v: VertexIndex,
        handle: &'h mut Handle<VertexIndex>,
    ) -> &'h mut Handle<VertexIndex> {
        self.vertices.fetch(v, handle)
    }

    /// Rebind `handle` to edge `e`.
    pub fn fetch_edge<'h>(
        &self,
        e: EdgeIndex,
        handle: &'h mut Handle<EdgeIndex>,
    ) -> &'h mut Handle<EdgeIndex> {
        self.edges.fetch(e, handle)
    }

    /// Handles acquired and not yet released, vertices and edges combined.
    pub fn outstanding_handles(&self) -> usize {
        self.vertices.outstanding_handles() + self.edges.outstanding_handles()
    }

    // ── Structure ──────────────────────────────────────────────

    /// Add a vertex with zeroed attributes and no edges.
    pub fn add_vertex(&mut self) -> VertexIndex {
        let v = self.vertices.alloc();
        self.listeners.emit(|l| l.vertex_added(v));
        v
    }

    /// Add a vertex whose attribute bytes are `payload`.
    ///
    /// # Panics
    ///
    /// Panics if `payload` is not exactly the vertex attribute size.
    pub fn add_vertex_with_payload(&mut self, payload: &[u8]) -> VertexIndex {
        assert_eq!(
            payload.len(),
            self.vertex_attributes.size(),
            "vertex payload size mismatch"
        );
        let v = self.vertices.alloc();
        self.vertices.view_mut(v).put_bytes(VERTEX_HEADER_SIZE, payload);
        self.listeners.emit(|l| l.vertex_added(v));
        v
    }

    /// Add an edge at the head of `source`'s outgoing chain and
    /// `target`'s incoming chain.
    pub fn add_edge(&mut self, source: VertexIndex, target: VertexIndex) -> EdgeIndex {
        self.link_new_edge(source, 0, target, 0, None)
    }

    /// Add an edge at position `source_out_index` of `source`'s outgoing
    /// chain and `target_in_index` of `target`'s incoming chain.
    ///
    /// Position 0 is the head. A position past the end of a chain
    /// appends.
    pub fn insert_edge(
        &mut self,
        source: VertexIndex,
        source_out_index: usize,
        target: VertexIndex,
        target_in_index: usize,
    ) -> EdgeIndex {
        self.link_new_edge(source, source_out_index, target, target_in_index, None)
    }

    /// [`insert_edge`](Graph::insert_edge) with explicit attribute bytes.
    ///
    /// # Panics
    ///
    /// Panics if `payload` is not exactly the edge attribute size.
    pub fn insert_edge_with_payload(
        &mut self,
        source: VertexIndex,
        source_out_index: usize,
        target: VertexIndex,
        target_in_index: usize,
        payload: &[u8],
    ) -> EdgeIndex {
        assert_eq!(
            payload.len(),
            self.edge_attributes.size(),
            "edge payload size mismatch"
        );
        self.link_new_edge(
            source,
            source_out_index,
            target,
            target_in_index,
            Some(payload),
        )
    }

    fn link_new_edge(
        &mut self,
        source: VertexIndex,
        source_out_index: usize,
        target: VertexIndex,
        target_in_index: usize,
        payload: Option<&[u8]>,
    ) -> EdgeIndex {
        let e = self.edges.alloc();
        {
            let mut view = self.edges.view_mut(e);
            view.put_typed(SOURCE, Some(source));
            view.put_typed(TARGET, Some(target));
            if let Some(payload) = payload {
                view.put_bytes(EDGE_HEADER_SIZE, payload);
            }
        }
        self.splice(Chain::Outgoing, source, source_out_index, e);
        self.splice(Chain::Incoming, target, target_in_index, e);
        self.listeners.emit(|l| l.edge_added(e, source, target));
        e
    }

    /// Remove an edge, unlinking it from both adjacency chains.
    pub fn remove_edge(&mut self, e: EdgeIndex) {
        self.listeners.emit(|l| l.before_edge_removed(e));
        let source = self.source(e);
        let target = self.target(e);
        self.unlink(Chain::Outgoing, source, e);
        self.unlink(Chain::Incoming, target, e);
        self.edge_properties.clear(e);
        self.edges.delete(e);
        self.listeners.emit(|l| l.edge_removed(e));
    }

    /// Remove a vertex and every edge touching it.
    ///
    /// Edges go first, in [`incident_edges`](Graph::incident_edges)
    /// order, each with its own removal notifications.
    pub fn remove_vertex(&mut self, v: VertexIndex) {
        let incident = self.incident_edges(v);
        trace!(vertex = %v, edges = incident.len(), "removing vertex");
        for e in incident {
            self.remove_edge(e);
        }
        self.listeners.emit(|l| l.before_vertex_removed(v));
        self.vertex_properties.clear(v);
        self.vertices.delete(v);
        self.listeners.emit(|l| l.vertex_removed(v));
    }

    /// Every edge touching `v`: the outgoing chain, then incoming edges
    /// that are not self-loops. Each edge appears once.
    pub fn incident_edges(&self, v: VertexIndex) -> IncidentEdges {
        let mut out = IncidentEdges::new();
        out.extend(self.chain(Chain::Outgoing, v));
        out.extend(self.chain(Chain::Incoming, v).filter(|&e| self.source(e) != v));
        out
    }

    // ── Queries ────────────────────────────────────────────────

    /// Source vertex of `e`.
    #[inline]
    pub fn source(&self, e: EdgeIndex) -> VertexIndex {
        VertexIndex::from_raw(self.edges.view(e).get_u32(SOURCE))
    }

    /// Target vertex of `e`.
    #[inline]
    pub fn target(&self, e: EdgeIndex) -> VertexIndex {
        VertexIndex::from_raw(self.edges.view(e).get_u32(TARGET))
    }

    /// Some edge from `source` to `target`, if one exists.
    pub fn get_edge(&self, source: VertexIndex, target: VertexIndex) -> Option<EdgeIndex> {
        self.edges_between(source, target).next()
    }

    /// Every edge from `source` to `target`.
    ///
    /// Scans whichever of `source`'s outgoing chain and `target`'s
    /// incoming chain is shorter, so parallel edges come out in that
    /// chain's order.
    pub fn edges_between(&self, source: VertexIndex, target: VertexIndex) -> EdgesBetween<'_> {
        EdgesBetween::new(self, source, target)
    }

    /// Position of `e` in its source's outgoing chain.
    pub fn source_out_index(&self, e: EdgeIndex) -> usize {
        self.position(Chain::Outgoing, self.source(e), e)
    }

    /// Position of `e` in its target's incoming chain.
    pub fn target_in_index(&self, e: EdgeIndex) -> usize {
        self.position(Chain::Incoming, self.target(e), e)
    }

    /// Edges entering `v`.
    pub fn incoming_edges(&self, v: VertexIndex) -> Adjacency<'_> {
        Adjacency::new(self, v, Direction::Incoming)
    }

    /// Edges leaving `v`.
    pub fn outgoing_edges(&self, v: VertexIndex) -> Adjacency<'_> {
        Adjacency::new(self, v, Direction::Outgoing)
    }

    /// Incoming then outgoing edges of `v`. A self-loop appears in both
    /// halves.
    pub fn edges(&self, v: VertexIndex) -> Adjacency<'_> {
        Adjacency::new(self, v, Direction::Both)
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Live vertices in slot order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.vertices.iter()
    }

    /// Live edges in slot order.
    pub fn all_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges.iter()
    }

    /// Whether `v` is a live vertex slot.
    pub fn contains_vertex(&self, v: VertexIndex) -> bool {
        self.vertices.contains(v)
    }

    /// Whether `e` is a live edge slot.
    pub fn contains_edge(&self, e: EdgeIndex) -> bool {
        self.edges.contains(e)
    }

    /// Bytes held by both pools.
    pub fn memory_bytes(&self) -> usize {
        self.vertices.memory_bytes() + self.edges.memory_bytes()
    }

    // ── Attributes ─────────────────────────────────────────────

    /// User attribute layout of vertices.
    pub fn vertex_attributes(&self) -> &Layout {
        &self.vertex_attributes
    }

    /// User attribute layout of edges.
    pub fn edge_attributes(&self) -> &Layout {
        &self.edge_attributes
    }

    /// Id of the vertex attribute called `name`.
    pub fn vertex_attribute_id(&self, name: &str) -> Option<AttributeId> {
        self.vertex_attributes
            .position(name)
            .map(|i| AttributeId(i as u16))
    }

    /// Id of the edge attribute called `name`.
    pub fn edge_attribute_id(&self, name: &str) -> Option<AttributeId> {
        self.edge_attributes
            .position(name)
            .map(|i| AttributeId(i as u16))
    }

    /// Read-only view of `v`'s attributes, addressed by user layout offsets.
    pub fn vertex_view(&self, v: VertexIndex) -> SlotView<'_> {
        SlotView::new(self.vertex_payload(v))
    }

    /// Read-only view of `e`'s attributes, addressed by user layout offsets.
    pub fn edge_view(&self, e: EdgeIndex) -> SlotView<'_> {
        SlotView::new(self.edge_payload(e))
    }

    /// All attribute bytes of `v`.
    pub fn vertex_payload(&self, v: VertexIndex) -> &[u8] {
        &self.vertices.view(v).as_bytes()[VERTEX_HEADER_SIZE..]
    }

    /// All attribute bytes of `e`.
    pub fn edge_payload(&self, e: EdgeIndex) -> &[u8] {
        &self.edges.view(e).as_bytes()[EDGE_HEADER_SIZE..]
    }

    /// Bytes of one vertex attribute.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` is not declared in the vertex layout.
    pub fn vertex_attribute(&self, v: VertexIndex, attribute: AttributeId) -> &[u8] {
        let field = &self.vertex_attributes.fields()[attribute.0 as usize];
        self.vertices
            .view(v)
            .bytes(VERTEX_HEADER_SIZE + field.offset(), field.size())
    }

    /// Bytes of one edge attribute.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` is not declared in the edge layout.
    pub fn edge_attribute(&self, e: EdgeIndex, attribute: AttributeId) -> &[u8] {
        let field = &self.edge_attributes.fields()[attribute.0 as usize];
        self.edges
            .view(e)
            .bytes(EDGE_HEADER_SIZE + field.offset(), field.size())
    }

    /// Overwrite one vertex attribute, notifying listeners.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` is undeclared or `value` has the wrong size.
    pub fn set_vertex_attribute(&mut self, v: VertexIndex, attribute: AttributeId, value: &[u8]) {
        let field = &self.vertex_attributes.fields()[attribute.0 as usize];
        assert_eq!(value.len(), field.size(), "attribute size mismatch");
        let offset = VERTEX_HEADER_SIZE + field.offset();
        let entity = Entity::Vertex(v);
        self.listeners
            .emit(|l| l.before_attribute_change(entity, attribute));
        self.vertices.view_mut(v).put_bytes(offset, value);
        self.listeners.emit(|l| l.attribute_changed(entity, attribute));
    }

    /// Overwrite one edge attribute, notifying listeners.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` is undeclared or `value` has the wrong size.
    pub fn set_edge_attribute(&mut self, e: EdgeIndex, attribute: AttributeId, value: &[u8]) {
        let field = &self.edge_attributes.fields()[attribute.0 as usize];
        assert_eq!(value.len(), field.size(), "attribute size mismatch");
        let offset = EDGE_HEADER_SIZE + field.offset();
        let entity = Entity::Edge(e);
        self.listeners
            .emit(|l| l.before_attribute_change(entity, attribute));
        self.edges.view_mut(e).put_bytes(offset, value);
        self.listeners.emit(|l| l.attribute_changed(entity, attribute));
    }

    // ── Properties ─────────────────────────────────────────────

    /// Declare a vertex property. Registering a known name returns its id.
    pub fn register_vertex_property(&mut self, name: &str) -> PropertyId {
        self.vertex_properties.register(name)
    }

    /// Declare an edge property. Registering a known name returns its id.
    pub fn register_edge_property(&mut self, name: &str) -> PropertyId {
        self.edge_properties.register(name)
    }

    /// Number of registered vertex properties.
    pub fn vertex_property_count(&self) -> usize {
        self.vertex_properties.len()
    }

    /// Number of registered edge properties.
    pub fn edge_property_count(&self) -> usize {
        self.edge_properties.len()
    }

    /// Name of a registered vertex property.
    pub fn vertex_property_name(&self, property: PropertyId) -> &str {
        self.vertex_properties.get(property).name()
    }

    /// Name of a registered edge property.
    pub fn edge_property_name(&self, property: PropertyId) -> &str {
        self.edge_properties.get(property).name()
    }

    /// Value of `property` on `v`.
    pub fn vertex_property(&self, v: VertexIndex, property: PropertyId) -> Option<&[u8]> {
        self.vertex_properties.get(property).get(v)
    }

    /// Value of `property` on `e`.
    pub fn edge_property(&self, e: EdgeIndex, property: PropertyId) -> Option<&[u8]> {
        self.edge_properties.get(property).get(e)
    }

    /// Set `property` on `v`, returning the previous value.
    pub fn set_vertex_property(
        &mut self,
        v: VertexIndex,
        property: PropertyId,
        value: &[u8],
    ) -> Option<Vec<u8>> {
        let entity = Entity::Vertex(v);
        self.listeners
            .emit(|l| l.before_property_change(entity, property));
        let previous = self.vertex_properties.get_mut(property).set(v, value);
        self.listeners.emit(|l| l.property_changed(entity, property));
        previous
    }

    /// Set `property` on `e`, returning the previous value.
    pub fn set_edge_property(
        &mut self,
        e: EdgeIndex,
        property: PropertyId,
        value: &[u8],
    ) -> Option<Vec<u8>> {
        let entity = Entity::Edge(e);
        self.listeners
            .emit(|l| l.before_property_change(entity, property));
        let previous = self.edge_properties.get_mut(property).set(e, value);
        self.listeners.emit(|l| l.property_changed(entity, property));
        previous
    }

    /// Clear `property` on `v`. Listeners hear about it only if a value
    /// was present.
    pub fn remove_vertex_property(
        &mut self,
        v: VertexIndex,
        property: PropertyId,
    ) -> Option<Vec<u8>> {
        if !self.vertex_properties.get(property).contains(v) {
            return None;
        }
        let entity = Entity::Vertex(v);
        self.listeners
            .emit(|l| l.before_property_change(entity, property));
        let previous = self.vertex_properties.get_mut(property).remove(v);
        self.listeners.emit(|l| l.property_changed(entity, property));
        previous
    }

    /// Clear `property` on `e`. Listeners hear about it only if a value
    /// was present.
    pub fn remove_edge_property(&mut self, e: EdgeIndex, property: PropertyId) -> Option<Vec<u8>> {
        if !self.edge_properties.get(property).contains(e) {
            return None;
        }
        let entity = Entity::Edge(e);
        self.listeners
            .emit(|l| l.before_property_change(entity, property));
        let previous = self.edge_properties.get_mut(property).remove(e);
        self.listeners.emit(|l| l.property_changed(entity, property));
        previous
    }

    /// Every property set on `v`, in registration order.
    pub fn vertex_properties_of(
        &self,
        v: VertexIndex,
    ) -> impl Iterator<Item = (PropertyId, &[u8])> + '_ {
        self.vertex_properties.values_of(v)
    }

    /// Every property set on `e`, in registration order.
    pub fn edge_properties_of(&self, e: EdgeIndex) -> impl Iterator<Item = (PropertyId, &[u8])> + '_ {
        self.edge_properties.values_of(e)
    }

    // ── Listeners ──────────────────────────────────────────────

    /// Register a change listener. Listeners are never removed.
    pub fn add_listener(&mut self, listener: Box<dyn GraphListener>) {
        self.listeners.add(listener);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── Chain plumbing ─────────────────────────────────────────

    /// First edge of `v`'s chain.
    #[inline]
    pub(crate) fn head(&self, chain: Chain, v: VertexIndex) -> Option<EdgeIndex> {
        let offset = match chain {
            Chain::Incoming => FIRST_IN,
            Chain::Outgoing => FIRST_OUT,
        };
        self.vertices.view(v).get_typed(offset)
    }

    fn set_head(&mut self, chain: Chain, v: VertexIndex, e: Option<EdgeIndex>) {
        let offset = match chain {
            Chain::Incoming => FIRST_IN,
            Chain::Outgoing => FIRST_OUT,
        };
        self.vertices.view_mut(v).put_typed(offset, e);
    }

    /// Successor of `e` in `chain`.
    #[inline]
    pub(crate) fn next_in_chain(&self, chain: Chain, e: EdgeIndex) -> Option<EdgeIndex> {
        let offset = match chain {
            Chain::Incoming => NEXT_TARGET_EDGE,
            Chain::Outgoing => NEXT_SOURCE_EDGE,
        };
        self.edges.view(e).get_typed(offset)
    }

    fn set_next_in_chain(&mut self, chain: Chain, e: EdgeIndex, next: Option<EdgeIndex>) {
        let offset = match chain {
            Chain::Incoming => NEXT_TARGET_EDGE,
            Chain::Outgoing => NEXT_SOURCE_EDGE,
        };
        self.edges.view_mut(e).put_typed(offset, next);
    }

    /// Walk `v`'s chain from the head.
    pub(crate) fn chain(&self, chain: Chain, v: VertexIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        std::iter::successors(self.head(chain, v), move |&e| self.next_in_chain(chain, e))
    }

    /// Link `e` into `v`'s chain so that it ends up at `position`.
    fn splice(&mut self, chain: Chain, v: VertexIndex, position: usize, e: EdgeIndex) {
        let mut prev = None;
        let mut cur = self.head(chain, v);
        for _ in 0..position {
            match cur {
                Some(c) => {
                    prev = Some(c);
                    cur = self.next_in_chain(chain, c);
                }
                None => break,
            }
        }
        self.set_next_in_chain(chain, e, cur);
        match prev {
            None => self.set_head(chain, v, Some(e)),
            Some(p) => self.set_next_in_chain(chain, p, Some(e)),
        }
    }

    /// Unlink `e` from `v`'s chain.
    fn unlink(&mut self, chain: Chain, v: VertexIndex, e: EdgeIndex) {
        let next = self.next_in_chain(chain, e);
        let mut prev = None;
        let mut cur = self.head(chain, v);
        while let Some(c) = cur {
            if c == e {
                break;
            }
            prev = Some(c);
            cur = self.next_in_chain(chain, c);
        }
        debug_assert_eq!(cur, Some(e), "edge {e} missing from its chain");
        if cur.is_none() {
            return;
        }
        match prev {
            None => self.set_head(chain, v, next),
            Some(p) => self.set_next_in_chain(chain, p, next),
        }
    }

    /// Number of edges ahead of `e` in `v`'s chain.
    fn position(&self, chain: Chain, v: VertexIndex, e: EdgeIndex) -> usize {
        self.chain(chain, v).take_while(|&c| c != e).count()
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertices.len())
            .field("edges", &self.edges.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare() -> Graph {
        Graph::new(Layout::empty(), Layout::empty()).unwrap()
    }

    fn weighted() -> Graph {
        let v = Layout::builder().i32("label").build().unwrap();
        let e = Layout::builder().f64("weight").build().unwrap();
        Graph::new(v, e).unwrap()
    }

    fn out_list(g: &Graph, v: VertexIndex) -> Vec<EdgeIndex> {
        g.outgoing_edges(v).iter().collect()
    }

    fn in_list(g: &Graph, v: VertexIndex) -> Vec<EdgeIndex> {
        g.incoming_edges(v).iter().collect()
    }

    #[test]
    fn add_edge_pushes_at_head() {
        let mut g = bare();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let e0 = g.add_edge(a, b);
        let e1 = g.add_edge(a, b);
        assert_eq!(out_list(&g, a), vec![e1, e0]);
        assert_eq!(in_list(&g, b), vec![e1, e0]);
        assert_eq!(g.source(e0), a);
        assert_eq!(g.target(e0), b);
    }

    #[test]
    fn insert_edge_splices_at_position() {
        let mut g = bare();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let e0 = g.add_edge(a, b);
        let e1 = g.add_edge(a, b);
        let mid = g.insert_edge(a, 1, b, 2);
        assert_eq!(out_list(&g, a), vec![e1, mid, e0]);
        assert_eq!(in_list(&g, b), vec![e1, e0, mid]);
        assert_eq!(g.source_out_index(mid), 1);
        assert_eq!(g.target_in_index(mid), 2);
    }

    #[test]
    fn insert_past_end_appends() {
        let mut g = bare();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let e0 = g.add_edge(a, b);
        let tail = g.insert_edge(a, 99, b, 99);
        assert_eq!(out_list(&g, a), vec![e0, tail]);
        assert_eq!(g.target_in_index(tail), 1);
    }

    #[test]
    fn remove_edge_unlinks_middle_of_chain() {
        let mut g = bare();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let e0 = g.add_edge(a, b);
        let e1 = g.add_edge(a, b);
        let e2 = g.add_edge(a, b);
        g.remove_edge(e1);
        assert_eq!(out_list(&g, a), vec![e2, e0]);
        assert_eq!(in_list(&g, b), vec![e2, e0]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn remove_vertex_cascades_to_incident_edges() {
        let mut g = bare();
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();
        let v2 = g.add_vertex();
        g.add_edge(v0, v1);
        g.add_edge(v1, v2);
        let keep = g.add_edge(v0, v2);
        g.remove_vertex(v1);
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(out_list(&g, v0), vec![keep]);
        assert_eq!(in_list(&g, v2), vec![keep]);
    }

    #[test]
    fn self_loop_is_incident_once() {
        let mut g = bare();
        let v = g.add_vertex();
        let w = g.add_vertex();
        let lp = g.add_edge(v, v);
        let out = g.add_edge(v, w);
        assert_eq!(g.incident_edges(v).to_vec(), vec![out, lp]);
        assert_eq!(g.edges(v).len(), 3);
        g.remove_vertex(v);
        assert_eq!(g.edge_count(), 0);
        assert!(g.incoming_edges(w).is_empty());
    }

    #[test]
    fn parallel_edges_are_distinct() {
        let mut g = bare();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let c = g.add_vertex();
        let e0 = g.add_edge(a, b);
        let e1 = g.add_edge(a, b);
        g.add_edge(a, c);
        g.add_edge(c, b);
        let mut between: Vec<_> = g.edges_between(a, b).collect();
        between.sort();
        assert_eq!(between, vec![e0, e1]);
        assert!(g.get_edge(b, a).is_none());
        assert!(g.get_edge(a, b).is_some());
    }

    #[test]
    fn attributes_read_back_and_notify() {
        let mut g = weighted();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let e = g.add_edge(a, b);
        let label = g.vertex_attribute_id("label").unwrap();
        let weight = g.edge_attribute_id("weight").unwrap();
        g.set_vertex_attribute(a, label, &7i32.to_le_bytes());
        g.set_edge_attribute(e, weight, &1.5f64.to_le_bytes());
        assert_eq!(g.vertex_view(a).get_i32(0), 7);
        assert_eq!(g.edge_view(e).get_f64(0), 1.5);
        assert_eq!(g.vertex_attribute(b, label), &[0, 0, 0, 0]);
    }

    #[test]
    fn payload_constructors_copy_bytes() {
        let mut g = weighted();
        let a = g.add_vertex_with_payload(&42i32.to_le_bytes());
        let e = g.insert_edge_with_payload(a, 0, a, 0, &2.0f64.to_le_bytes());
        assert_eq!(g.vertex_payload(a), &42i32.to_le_bytes());
        assert_eq!(g.edge_view(e).get_f64(0), 2.0);
        assert_eq!(g.source(e), a);
    }

    #[test]
    fn properties_cleared_on_removal() {
        let mut g = bare();
        let name = g.register_vertex_property("name");
        let a = g.add_vertex();
        g.set_vertex_property(a, name, b"alpha");
        assert_eq!(g.vertex_property(a, name), Some(&b"alpha"[..]));
        g.remove_vertex(a);
        let b = g.add_vertex();
        assert_eq!(a, b);
        assert_eq!(g.vertex_property(b, name), None);
    }

    #[test]
    fn remove_absent_property_is_silent() {
        let mut g = bare();
        let p = g.register_edge_property("tag");
        let a = g.add_vertex();
        let e = g.add_edge(a, a);
        assert_eq!(g.remove_edge_property(e, p), None);
        g.set_edge_property(e, p, b"x");
        assert_eq!(g.remove_edge_property(e, p), Some(b"x".to_vec()));
        assert_eq!(g.edge_properties_of(e).count(), 0);
    }

    #[test]
    fn handles_are_accounted_across_pools() {
        let mut g = bare();
        let v = g.add_vertex();
        let e = g.add_edge(v, v);
        let mut vh = g.vertex_handle();
        let mut eh = g.edge_handle();
        assert_eq!(g.fetch_vertex(v, &mut vh).index(), Some(v));
        assert_eq!(g.fetch_edge(e, &mut eh).index(), Some(e));
        assert_eq!(g.outstanding_handles(), 2);
        g.release_vertex_handle(vh);
        g.release_edge_handle(eh);
        assert_eq!(g.outstanding_handles(), 0);
    }

    #[test]
    fn header_name_collision_is_rejected() {
        let v = Layout::builder().index("strand.first_in").build().unwrap();
        assert!(Graph::new(v, Layout::empty()).is_err());
    }
}
