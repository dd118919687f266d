//! Strongly-typed identifiers and the [`NO_INDEX`] storage sentinel.
//!
//! Slot indices are recycled by the arena: a [`VertexIndex`] names one
//! logical vertex only between its allocation and its deletion. Anything
//! that must survive a deletion (the undo journal, mostly) goes through a
//! [`StableId`] instead.

use std::fmt;

/// Sentinel written into index fields of a record to mean "no slot".
///
/// Adjacency chains terminate on this value and freshly allocated
/// records carry it in every index field.
pub const NO_INDEX: i32 = -1;

/// Common behaviour of the slot index newtypes.
///
/// Every pool in the arena is parameterised over one index type so that
/// a vertex index can never be handed to an edge pool by accident.
pub trait PoolIndex: Copy + Eq + fmt::Debug {
    /// Wrap a raw slot number.
    fn from_raw(raw: u32) -> Self;

    /// The raw slot number.
    fn raw(self) -> u32;

    /// Decode an index field, mapping [`NO_INDEX`] (or any negative value)
    /// to `None`.
    #[inline]
    fn from_stored(stored: i32) -> Option<Self> {
        if stored < 0 {
            None
        } else {
            Some(Self::from_raw(stored as u32))
        }
    }

    /// Encode an optional index for storage in an index field.
    #[inline]
    fn to_stored(index: Option<Self>) -> i32 {
        match index {
            Some(i) => i.raw() as i32,
            None => NO_INDEX,
        }
    }
}

macro_rules! slot_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl PoolIndex for $name {
            #[inline]
            fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(v: u32) -> Self {
                Self(v)
            }
        }
    };
}

slot_index!(
    /// Slot index of a vertex record in the vertex pool.
    ///
    /// Valid only until the vertex is removed; the slot may then be handed
    /// to a different vertex.
    VertexIndex
);

slot_index!(
    /// Slot index of an edge record in the edge pool.
    ///
    /// Valid only until the edge is removed; the slot may then be handed
    /// to a different edge.
    EdgeIndex
);

slot_index!(
    /// Slot index of an entry in the edit list.
    EditIndex
);

/// Permanent identity of a logical vertex or edge in the undo journal.
///
/// Assigned the first time an entity is referenced by a log record and
/// never handed to a different entity afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StableId(pub u32);

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for StableId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a named field of a vertex or edge attribute layout.
///
/// `AttributeId(n)` is the n-th field declared in the layout the graph was
/// built with. Header fields used for adjacency are not addressable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(pub u16);

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for AttributeId {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

/// Identifies a registered out-of-slot property table.
///
/// Vertex and edge properties are numbered independently, in
/// registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub u16);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for PropertyId {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

/// A vertex or an edge, as carried by change notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A vertex slot.
    Vertex(VertexIndex),
    /// An edge slot.
    Edge(EdgeIndex),
}

impl Entity {
    /// Which kind of entity this is.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Vertex(_) => EntityKind::Vertex,
            Self::Edge(_) => EntityKind::Edge,
        }
    }
}

/// Discriminates vertices from edges where only the kind matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Vertex pool.
    Vertex,
    /// Edge pool.
    Edge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Edge => write!(f, "edge"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_sentinel_decodes_to_none() {
        assert_eq!(VertexIndex::from_stored(NO_INDEX), None);
        assert_eq!(EdgeIndex::from_stored(-7), None);
        assert_eq!(EdgeIndex::from_stored(3), Some(EdgeIndex(3)));
    }

    #[test]
    fn to_stored_uses_sentinel_for_none() {
        assert_eq!(VertexIndex::to_stored(None), NO_INDEX);
        assert_eq!(VertexIndex::to_stored(Some(VertexIndex(12))), 12);
    }

    #[test]
    fn entity_kind_matches_variant() {
        assert_eq!(Entity::Vertex(VertexIndex(0)).kind(), EntityKind::Vertex);
        assert_eq!(Entity::Edge(EdgeIndex(0)).kind(), EntityKind::Edge);
        assert_eq!(EntityKind::Edge.to_string(), "edge");
    }

    #[test]
    fn stable_id_display_is_prefixed() {
        assert_eq!(StableId(4).to_string(), "#4");
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn stored_form_round_trips(raw in 0u32..=i32::MAX as u32) {
                let stored = EdgeIndex::to_stored(Some(EdgeIndex(raw)));
                prop_assert!(stored >= 0);
                prop_assert_eq!(EdgeIndex::from_stored(stored), Some(EdgeIndex(raw)));
            }

            #[test]
            fn negative_stored_values_are_absent(stored in i32::MIN..0) {
                prop_assert_eq!(VertexIndex::from_stored(stored), None);
            }
        }
    }
}
