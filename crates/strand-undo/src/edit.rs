//! Edit kinds, their record formats and their replay.
//!
//! Every recorded change is one [`EditKind`] plus a byte record in the
//! [`UndoLog`](crate::UndoLog). Records reference entities by
//! [`StableId`] only and are never rewritten once appended. All integers
//! are little-endian.
//!
//! ```text
//! vertex add/remove   stable_id u32 | payload | properties
//! edge add/remove     edge_id u32 | source_id u32 | target_id u32
//!                     | source_out_index u32 | target_in_index u32
//!                     | payload | properties
//! set attribute       stable_id u32 | attribute u16 | old[n] | new[n]
//! set property        stable_id u32 | property u16 | old value | new value
//!
//! properties          count u16 | (property u16 | len u32 | bytes)*
//! value               present u8 | len u32 | bytes
//! ```
//!
//! Add and remove records of the same entity kind share one format and
//! differ only in which direction creates and which destroys.

use std::hash::Hash;

use strand_core::{
    AttributeId, EdgeIndex, Entity, EntityKind, JournalError, PoolIndex, PropertyId, StableId,
    VertexIndex,
};
use strand_graph::Graph;

use crate::codec::{
    expect_end, read_bytes, read_length_prefixed_bytes, read_u16_le, read_u32_le, read_u8,
    write_bytes, write_length_prefixed_bytes, write_u16_le, write_u32_le, write_u8,
};
use crate::ids::StableIdMap;

/// The closed set of recordable edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// A vertex was added.
    AddVertex,
    /// A vertex was removed (after its edges).
    RemoveVertex,
    /// An edge was added or inserted.
    AddEdge,
    /// An edge was removed.
    RemoveEdge,
    /// A vertex attribute was overwritten.
    SetVertexAttribute,
    /// An edge attribute was overwritten.
    SetEdgeAttribute,
    /// A vertex property was set or cleared.
    SetVertexProperty,
    /// An edge property was set or cleared.
    SetEdgeProperty,
}

impl EditKind {
    /// Every kind, in type-index order.
    pub const ALL: [EditKind; 8] = [
        Self::AddVertex,
        Self::RemoveVertex,
        Self::AddEdge,
        Self::RemoveEdge,
        Self::SetVertexAttribute,
        Self::SetEdgeAttribute,
        Self::SetVertexProperty,
        Self::SetEdgeProperty,
    ];

    /// Tag stored in the edit list.
    pub fn type_index(self) -> u8 {
        match self {
            Self::AddVertex => 0,
            Self::RemoveVertex => 1,
            Self::AddEdge => 2,
            Self::RemoveEdge => 3,
            Self::SetVertexAttribute => 4,
            Self::SetEdgeAttribute => 5,
            Self::SetVertexProperty => 6,
            Self::SetEdgeProperty => 7,
        }
    }

    /// Kind for a stored tag.
    pub fn from_type_index(tag: u8) -> Result<Self, JournalError> {
        Self::ALL
            .get(tag as usize)
            .copied()
            .ok_or(JournalError::UnknownEditType { tag })
    }

    /// Short name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::AddVertex => "add-vertex",
            Self::RemoveVertex => "remove-vertex",
            Self::AddEdge => "add-edge",
            Self::RemoveEdge => "remove-edge",
            Self::SetVertexAttribute => "set-vertex-attribute",
            Self::SetEdgeAttribute => "set-edge-attribute",
            Self::SetVertexProperty => "set-vertex-property",
            Self::SetEdgeProperty => "set-edge-property",
        }
    }
}

impl std::fmt::Display for EditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which way a record is being replayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Replay {
    /// Re-apply the change (redo).
    Forward,
    /// Revert the change (undo).
    Backward,
}

/// Properties attached to an entity at record time.
pub type PropertySection<'a> = Vec<(PropertyId, &'a [u8])>;

/// Everything needed to recreate a vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexRecord<'a> {
    /// Identity of the vertex.
    pub id: StableId,
    /// Attribute bytes.
    pub payload: &'a [u8],
    /// Property values.
    pub properties: PropertySection<'a>,
}

/// Everything needed to recreate an edge at its chain positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeRecord<'a> {
    /// Identity of the edge.
    pub id: StableId,
    /// Identity of the source vertex.
    pub source: StableId,
    /// Identity of the target vertex.
    pub target: StableId,
    /// Position in the source's outgoing chain.
    pub source_out_index: u32,
    /// Position in the target's incoming chain.
    pub target_in_index: u32,
    /// Attribute bytes.
    pub payload: &'a [u8],
    /// Property values.
    pub properties: PropertySection<'a>,
}

/// An attribute overwrite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRecord<'a> {
    /// Identity of the entity.
    pub id: StableId,
    /// Attribute written.
    pub attribute: AttributeId,
    /// Bytes before the write.
    pub old: &'a [u8],
    /// Bytes after the write.
    pub new: &'a [u8],
}

/// A property set or clear. `None` means absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyRecord<'a> {
    /// Identity of the entity.
    pub id: StableId,
    /// Property changed.
    pub property: PropertyId,
    /// Value before the change.
    pub old: Option<&'a [u8]>,
    /// Value after the change.
    pub new: Option<&'a [u8]>,
}

/// A decoded edit, borrowing its variable-length parts from the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit<'a> {
    /// See [`EditKind::AddVertex`].
    AddVertex(VertexRecord<'a>),
    /// See [`EditKind::RemoveVertex`].
    RemoveVertex(VertexRecord<'a>),
    /// See [`EditKind::AddEdge`].
    AddEdge(EdgeRecord<'a>),
    /// See [`EditKind::RemoveEdge`].
    RemoveEdge(EdgeRecord<'a>),
    /// See [`EditKind::SetVertexAttribute`].
    SetVertexAttribute(AttributeRecord<'a>),
    /// See [`EditKind::SetEdgeAttribute`].
    SetEdgeAttribute(AttributeRecord<'a>),
    /// See [`EditKind::SetVertexProperty`].
    SetVertexProperty(PropertyRecord<'a>),
    /// See [`EditKind::SetEdgeProperty`].
    SetEdgeProperty(PropertyRecord<'a>),
}

impl<'a> Edit<'a> {
    /// Kind of this edit.
    pub fn kind(&self) -> EditKind {
        match self {
            Self::AddVertex(_) => EditKind::AddVertex,
            Self::RemoveVertex(_) => EditKind::RemoveVertex,
            Self::AddEdge(_) => EditKind::AddEdge,
            Self::RemoveEdge(_) => EditKind::RemoveEdge,
            Self::SetVertexAttribute(_) => EditKind::SetVertexAttribute,
            Self::SetEdgeAttribute(_) => EditKind::SetEdgeAttribute,
            Self::SetVertexProperty(_) => EditKind::SetVertexProperty,
            Self::SetEdgeProperty(_) => EditKind::SetEdgeProperty,
        }
    }

    // ── Encoding ───────────────────────────────────────────────

    /// Append the record bytes of this edit to `w`.
    pub fn encode(&self, w: &mut Vec<u8>) {
        match self {
            Self::AddVertex(r) | Self::RemoveVertex(r) => {
                write_u32_le(w, r.id.0);
                write_bytes(w, r.payload);
                encode_properties(w, &r.properties);
            }
            Self::AddEdge(r) | Self::RemoveEdge(r) => {
                write_u32_le(w, r.id.0);
                write_u32_le(w, r.source.0);
                write_u32_le(w, r.target.0);
                write_u32_le(w, r.source_out_index);
                write_u32_le(w, r.target_in_index);
                write_bytes(w, r.payload);
                encode_properties(w, &r.properties);
            }
            Self::SetVertexAttribute(r) | Self::SetEdgeAttribute(r) => {
                write_u32_le(w, r.id.0);
                write_u16_le(w, r.attribute.0);
                write_bytes(w, r.old);
                write_bytes(w, r.new);
            }
            Self::SetVertexProperty(r) | Self::SetEdgeProperty(r) => {
                write_u32_le(w, r.id.0);
                write_u16_le(w, r.property.0);
                encode_value(w, r.old);
                encode_value(w, r.new);
            }
        }
    }

    /// Decode a record of `kind`.
    ///
    /// Payload sizes are not stored in the record; they come from the
    /// graph's attribute layouts.
    pub fn decode(
        kind: EditKind,
        mut r: &'a [u8],
        vertex_payload: usize,
        edge_payload: usize,
    ) -> Result<Self, JournalError> {
        let edit = match kind {
            EditKind::AddVertex => Self::AddVertex(decode_vertex(&mut r, vertex_payload)?),
            EditKind::RemoveVertex => Self::RemoveVertex(decode_vertex(&mut r, vertex_payload)?),
            EditKind::AddEdge => Self::AddEdge(decode_edge(&mut r, edge_payload)?),
            EditKind::RemoveEdge => Self::RemoveEdge(decode_edge(&mut r, edge_payload)?),
            EditKind::SetVertexAttribute => Self::SetVertexAttribute(decode_attribute(&mut r)?),
            EditKind::SetEdgeAttribute => Self::SetEdgeAttribute(decode_attribute(&mut r)?),
            EditKind::SetVertexProperty => Self::SetVertexProperty(decode_property(&mut r)?),
            EditKind::SetEdgeProperty => Self::SetEdgeProperty(decode_property(&mut r)?),
        };
        expect_end(r)?;
        Ok(edit)
    }

    // ── Replay ─────────────────────────────────────────────────

    /// Apply this edit to `graph` in `direction`, keeping the id maps in
    /// step with every slot created or destroyed.
    pub fn apply(
        &self,
        direction: Replay,
        graph: &mut Graph,
        vertex_ids: &mut StableIdMap<VertexIndex>,
        edge_ids: &mut StableIdMap<EdgeIndex>,
    ) -> Result<(), JournalError> {
        use Replay::{Backward, Forward};
        match (self, direction) {
            (Self::AddVertex(r), Forward) | (Self::RemoveVertex(r), Backward) => {
                create_vertex(r, graph, vertex_ids);
            }
            (Self::AddVertex(r), Backward) | (Self::RemoveVertex(r), Forward) => {
                let v = resolve(vertex_ids, EntityKind::Vertex, r.id)?;
                graph.remove_vertex(v);
                vertex_ids.unbind_index(v);
            }
            (Self::AddEdge(r), Forward) | (Self::RemoveEdge(r), Backward) => {
                create_edge(r, graph, vertex_ids, edge_ids)?;
            }
            (Self::AddEdge(r), Backward) | (Self::RemoveEdge(r), Forward) => {
                let e = resolve(edge_ids, EntityKind::Edge, r.id)?;
                graph.remove_edge(e);
                edge_ids.unbind_index(e);
            }
            (Self::SetVertexAttribute(r), _) => {
                let v = resolve(vertex_ids, EntityKind::Vertex, r.id)?;
                graph.set_vertex_attribute(v, r.attribute, pick(direction, r.old, r.new));
            }
            (Self::SetEdgeAttribute(r), _) => {
                let e = resolve(edge_ids, EntityKind::Edge, r.id)?;
                graph.set_edge_attribute(e, r.attribute, pick(direction, r.old, r.new));
            }
            (Self::SetVertexProperty(r), _) => {
                let v = resolve(vertex_ids, EntityKind::Vertex, r.id)?;
                match pick(direction, r.old, r.new) {
                    Some(value) => {
                        graph.set_vertex_property(v, r.property, value);
                    }
                    None => {
                        graph.remove_vertex_property(v, r.property);
                    }
                }
            }
            (Self::SetEdgeProperty(r), _) => {
                let e = resolve(edge_ids, EntityKind::Edge, r.id)?;
                match pick(direction, r.old, r.new) {
                    Some(value) => {
                        graph.set_edge_property(e, r.property, value);
                    }
                    None => {
                        graph.remove_edge_property(e, r.property);
                    }
                }
            }
        }
        Ok(())
    }
}

fn pick<T>(direction: Replay, old: T, new: T) -> T {
    match direction {
        Replay::Forward => new,
        Replay::Backward => old,
    }
}

fn resolve<I: PoolIndex + Hash>(
    ids: &StableIdMap<I>,
    kind: EntityKind,
    id: StableId,
) -> Result<I, JournalError> {
    ids.index_of(id)
        .ok_or(JournalError::UnresolvedStableId { kind, id })
}

fn create_vertex(r: &VertexRecord<'_>, graph: &mut Graph, ids: &mut StableIdMap<VertexIndex>) {
    let v = graph.add_vertex_with_payload(r.payload);
    for &(property, value) in &r.properties {
        graph.set_vertex_property(v, property, value);
    }
    ids.bind(v, r.id);
}

fn create_edge(
    r: &EdgeRecord<'_>,
    graph: &mut Graph,
    vertex_ids: &StableIdMap<VertexIndex>,
    edge_ids: &mut StableIdMap<EdgeIndex>,
) -> Result<(), JournalError> {
    let source = resolve(vertex_ids, EntityKind::Vertex, r.source)?;
    let target = resolve(vertex_ids, EntityKind::Vertex, r.target)?;
    let e = graph.insert_edge_with_payload(
        source,
        r.source_out_index as usize,
        target,
        r.target_in_index as usize,
        r.payload,
    );
    for &(property, value) in &r.properties {
        graph.set_edge_property(e, property, value);
    }
    edge_ids.bind(e, r.id);
    Ok(())
}

// ── Capture ────────────────────────────────────────────────────

/// Snapshot vertex `v` into a record, assigning it a stable id if needed.
pub fn capture_vertex<'g>(
    graph: &'g Graph,
    vertex_ids: &mut StableIdMap<VertexIndex>,
    v: VertexIndex,
) -> VertexRecord<'g> {
    VertexRecord {
        id: vertex_ids.id_of(v),
        payload: graph.vertex_payload(v),
        properties: graph.vertex_properties_of(v).collect(),
    }
}

/// Snapshot edge `e` with its current chain positions.
pub fn capture_edge<'g>(
    graph: &'g Graph,
    vertex_ids: &mut StableIdMap<VertexIndex>,
    edge_ids: &mut StableIdMap<EdgeIndex>,
    e: EdgeIndex,
) -> EdgeRecord<'g> {
    EdgeRecord {
        id: edge_ids.id_of(e),
        source: vertex_ids.id_of(graph.source(e)),
        target: vertex_ids.id_of(graph.target(e)),
        source_out_index: graph.source_out_index(e) as u32,
        target_in_index: graph.target_in_index(e) as u32,
        payload: graph.edge_payload(e),
        properties: graph.edge_properties_of(e).collect(),
    }
}

/// Stable id of an attribute or property owner.
pub(crate) fn owner_id(
    entity: Entity,
    vertex_ids: &mut StableIdMap<VertexIndex>,
    edge_ids: &mut StableIdMap<EdgeIndex>,
) -> StableId {
    match entity {
        Entity::Vertex(v) => vertex_ids.id_of(v),
        Entity::Edge(e) => edge_ids.id_of(e),
    }
}

// ── Section codecs ─────────────────────────────────────────────

fn encode_properties(w: &mut Vec<u8>, properties: &[(PropertyId, &[u8])]) {
    write_u16_le(w, properties.len() as u16);
    for &(property, value) in properties {
        write_u16_le(w, property.0);
        write_length_prefixed_bytes(w, value);
    }
}

fn decode_properties<'a>(r: &mut &'a [u8]) -> Result<PropertySection<'a>, JournalError> {
    let count = read_u16_le(r)? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let property = PropertyId(read_u16_le(r)?);
        out.push((property, read_length_prefixed_bytes(r)?));
    }
    Ok(out)
}

fn encode_value(w: &mut Vec<u8>, value: Option<&[u8]>) {
    match value {
        Some(bytes) => {
            write_u8(w, 1);
            write_length_prefixed_bytes(w, bytes);
        }
        None => {
            write_u8(w, 0);
            write_u32_le(w, 0);
        }
    }
}

fn decode_value<'a>(r: &mut &'a [u8]) -> Result<Option<&'a [u8]>, JournalError> {
    let present = read_u8(r)?;
    let bytes = read_length_prefixed_bytes(r)?;
    match present {
        0 => Ok(None),
        1 => Ok(Some(bytes)),
        other => Err(JournalError::MalformedRecord {
            detail: format!("property presence flag {other}"),
        }),
    }
}

fn decode_vertex<'a>(r: &mut &'a [u8], payload: usize) -> Result<VertexRecord<'a>, JournalError> {
    Ok(VertexRecord {
        id: StableId(read_u32_le(r)?),
        payload: read_bytes(r, payload)?,
        properties: decode_properties(r)?,
    })
}

fn decode_edge<'a>(r: &mut &'a [u8], payload: usize) -> Result<EdgeRecord<'a>, JournalError> {
    Ok(EdgeRecord {
        id: StableId(read_u32_le(r)?),
        source: StableId(read_u32_le(r)?),
        target: StableId(read_u32_le(r)?),
        source_out_index: read_u32_le(r)?,
        target_in_index: read_u32_le(r)?,
        payload: read_bytes(r, payload)?,
        properties: decode_properties(r)?,
    })
}

fn decode_attribute<'a>(r: &mut &'a [u8]) -> Result<AttributeRecord<'a>, JournalError> {
    let id = StableId(read_u32_le(r)?);
    let attribute = AttributeId(read_u16_le(r)?);
    if r.len() % 2 != 0 {
        return Err(JournalError::MalformedRecord {
            detail: format!("attribute values span an odd {} bytes", r.len()),
        });
    }
    let n = r.len() / 2;
    Ok(AttributeRecord {
        id,
        attribute,
        old: read_bytes(r, n)?,
        new: read_bytes(r, n)?,
    })
}

fn decode_property<'a>(r: &mut &'a [u8]) -> Result<PropertyRecord<'a>, JournalError> {
    Ok(PropertyRecord {
        id: StableId(read_u32_le(r)?),
        property: PropertyId(read_u16_le(r)?),
        old: decode_value(r)?,
        new: decode_value(r)?,
    })
}
