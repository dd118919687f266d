//! Slot index ↔ stable id mapping.
//!
//! Slot indices are recycled, so the journal never stores them. Each
//! logical entity gets a [`StableId`] the first time a record mentions it;
//! the map then tracks which slot currently holds that entity. Removing
//! an entity unbinds its slot, and recreating it during replay binds the
//! old id to whatever slot the allocation returned.

use std::hash::Hash;

use indexmap::IndexMap;
use strand_core::{PoolIndex, StableId};

/// Bidirectional map between live slots and stable ids for one pool.
#[derive(Clone, Debug)]
pub struct StableIdMap<I: PoolIndex + Hash> {
    by_index: IndexMap<I, StableId>,
    by_id: IndexMap<StableId, I>,
    next_id: u32,
}

impl<I: PoolIndex + Hash> StableIdMap<I> {
    /// Empty map. Ids are handed out from zero.
    pub fn new() -> Self {
        Self {
            by_index: IndexMap::new(),
            by_id: IndexMap::new(),
            next_id: 0,
        }
    }

    /// Stable id of the entity at `index`, assigning a fresh one if the
    /// slot has none yet.
    pub fn id_of(&mut self, index: I) -> StableId {
        if let Some(&id) = self.by_index.get(&index) {
            return id;
        }
        let id = StableId(self.next_id);
        self.next_id += 1;
        self.by_index.insert(index, id);
        self.by_id.insert(id, index);
        id
    }

    /// Slot currently holding the entity `id`, if it is alive.
    pub fn index_of(&self, id: StableId) -> Option<I> {
        self.by_id.get(&id).copied()
    }

    /// Bind `id` to `index`, replacing any previous binding of either.
    pub fn bind(&mut self, index: I, id: StableId) {
        if let Some(old) = self.by_index.swap_remove(&index) {
            self.by_id.swap_remove(&old);
        }
        if let Some(old) = self.by_id.swap_remove(&id) {
            self.by_index.swap_remove(&old);
        }
        self.by_index.insert(index, id);
        self.by_id.insert(id, index);
    }

    /// Forget the entity at `index`, returning its id.
    pub fn unbind_index(&mut self, index: I) -> Option<StableId> {
        let id = self.by_index.swap_remove(&index)?;
        self.by_id.swap_remove(&id);
        Some(id)
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// Whether no slot is bound.
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    /// Number of ids ever assigned.
    pub fn assigned(&self) -> u32 {
        self.next_id
    }
}

impl<I: PoolIndex + Hash> Default for StableIdMap<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::VertexIndex;

    #[test]
    fn id_assigned_once_per_slot() {
        let mut ids = StableIdMap::new();
        let a = ids.id_of(VertexIndex(5));
        assert_eq!(ids.id_of(VertexIndex(5)), a);
        assert_ne!(ids.id_of(VertexIndex(6)), a);
        assert_eq!(ids.index_of(a), Some(VertexIndex(5)));
    }

    #[test]
    fn recycled_slot_gets_fresh_id() {
        let mut ids = StableIdMap::new();
        let old = ids.id_of(VertexIndex(0));
        assert_eq!(ids.unbind_index(VertexIndex(0)), Some(old));
        assert_eq!(ids.index_of(old), None);
        let new = ids.id_of(VertexIndex(0));
        assert_ne!(new, old);
        assert_eq!(ids.assigned(), 2);
    }

    #[test]
    fn bind_moves_id_to_new_slot() {
        let mut ids = StableIdMap::new();
        let id = ids.id_of(VertexIndex(3));
        ids.unbind_index(VertexIndex(3));
        ids.bind(VertexIndex(7), id);
        assert_eq!(ids.index_of(id), Some(VertexIndex(7)));
        assert_eq!(ids.id_of(VertexIndex(7)), id);
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn bind_replaces_stale_bindings() {
        let mut ids = StableIdMap::new();
        let a = ids.id_of(VertexIndex(0));
        let b = ids.id_of(VertexIndex(1));
        ids.bind(VertexIndex(0), b);
        assert_eq!(ids.index_of(a), None);
        assert_eq!(ids.index_of(b), Some(VertexIndex(0)));
        assert_eq!(ids.len(), 1);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn both_directions_stay_consistent(
                slots in proptest::collection::vec((0u32..16, any::<bool>()), 1..64),
            ) {
                let mut ids = StableIdMap::new();
                for (slot, unbind) in slots {
                    let v = VertexIndex(slot);
                    if unbind {
                        ids.unbind_index(v);
                    } else {
                        let id = ids.id_of(v);
                        prop_assert_eq!(ids.index_of(id), Some(v));
                    }
                }
                prop_assert_eq!(ids.by_index.len(), ids.by_id.len());
                for (&index, &id) in &ids.by_index {
                    prop_assert_eq!(ids.by_id.get(&id), Some(&index));
                }
            }
        }
    }
}
