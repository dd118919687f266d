//! Free-list arena allocator over a [`SlotStore`].
//!
//! [`EntityPool`] hands out slot indices for records of one [`Layout`].
//! Deleted slots go onto a free list and are reused before the store
//! grows. Reuse order is last-in first-out: the most recently deleted slot
//! is always the next one allocated. The undo journal relies on this to
//! reproduce slot indices when it replays a removal followed by a re-add.
//!
//! The pool does not validate indices. Reading a deleted slot returns
//! stale bytes, and reading past the reservation panics on the slice
//! bounds check.

use std::marker::PhantomData;

use strand_core::PoolIndex;
use tracing::debug;

use crate::access::{SlotView, SlotViewMut};
use crate::config::PoolConfig;
use crate::handle::Handle;
use crate::layout::Layout;
use crate::store::SlotStore;

/// Arena allocator for fixed-layout records addressed by `I`.
pub struct EntityPool<I: PoolIndex> {
    store: SlotStore,
    layout: Layout,
    /// Indices of deleted slots available for reuse, most recent last.
    free_list: Vec<u32>,
    /// Occupancy per slot, used only for iteration.
    occupied: Vec<bool>,
    live: usize,
    outstanding_handles: usize,
    _index: PhantomData<I>,
}

impl<I: PoolIndex> EntityPool<I> {
    /// Create an empty pool for records of `layout`.
    pub fn new(layout: Layout, config: &PoolConfig) -> Self {
        let capacity = config.initial_capacity.max(1) as usize;
        Self {
            store: SlotStore::new(layout.size(), capacity),
            layout,
            free_list: Vec::new(),
            occupied: Vec::with_capacity(capacity),
            live: 0,
            outstanding_handles: 0,
            _index: PhantomData,
        }
    }

    /// The record layout this pool was built with.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    // ── Handles ────────────────────────────────────────────────

    /// Create an unbound handle.
    pub fn create_handle(&mut self) -> Handle<I> {
        self.outstanding_handles += 1;
        Handle::unbound()
    }

    /// Give a handle back to the pool.
    pub fn release_handle(&mut self, handle: Handle<I>) {
        drop(handle);
        self.outstanding_handles = self.outstanding_handles.saturating_sub(1);
    }

    /// Number of handles created and not yet released.
    pub fn outstanding_handles(&self) -> usize {
        self.outstanding_handles
    }

    /// Bind `handle` to `index` and return it.
    ///
    /// No allocation and no liveness check.
    #[inline]
    pub fn fetch<'h>(&self, index: I, handle: &'h mut Handle<I>) -> &'h mut Handle<I> {
        handle.bind(index);
        handle
    }

    /// Allocate a record, bind `handle` to it and return the handle.
    pub fn allocate<'h>(&mut self, handle: &'h mut Handle<I>) -> &'h mut Handle<I> {
        let index = self.alloc();
        handle.bind(index);
        handle
    }

    // ── Allocation ─────────────────────────────────────────────

    /// Allocate a record and return its index.
    ///
    /// Takes the most recently freed slot if there is one, otherwise
    /// appends to the store. The slot is reset to the layout's template
    /// (index fields absent, everything else zero).
    pub fn alloc(&mut self) -> I {
        let raw = match self.free_list.pop() {
            Some(raw) => raw,
            None => {
                let before = self.store.capacity();
                let raw = self.store.push_slot();
                if self.store.capacity() != before {
                    debug!(
                        slot_size = self.store.slot_size(),
                        from = before,
                        to = self.store.capacity(),
                        "pool storage grown"
                    );
                }
                self.occupied.push(false);
                raw
            }
        };
        self.store.slot_mut(raw).copy_from_slice(self.layout.template());
        self.occupied[raw as usize] = true;
        self.live += 1;
        I::from_raw(raw)
    }

    /// Release the record at `index` for reuse.
    ///
    /// Deleting a slot that is not live corrupts the free list; the pool
    /// does not detect it.
    pub fn delete(&mut self, index: I) {
        let raw = index.raw();
        self.occupied[raw as usize] = false;
        self.free_list.push(raw);
        self.live -= 1;
    }

    /// Drop every record and reset the free list. Memory is kept.
    pub fn clear(&mut self) {
        self.store.reset();
        self.free_list.clear();
        self.occupied.clear();
        self.live = 0;
    }

    // ── Access ─────────────────────────────────────────────────

    /// Read-only view of the record at `index`.
    #[inline]
    pub fn view(&self, index: I) -> SlotView<'_> {
        SlotView::new(self.store.slot(index.raw()))
    }

    /// Mutable view of the record at `index`.
    #[inline]
    pub fn view_mut(&mut self, index: I) -> SlotViewMut<'_> {
        SlotViewMut::new(self.store.slot_mut(index.raw()))
    }

    /// View of the record a handle is bound to, `None` if unbound.
    pub fn handle_view(&self, handle: &Handle<I>) -> Option<SlotView<'_>> {
        handle.index().map(|i| self.view(i))
    }

    /// Mutable view of the record a handle is bound to, `None` if unbound.
    pub fn handle_view_mut(&mut self, handle: &Handle<I>) -> Option<SlotViewMut<'_>> {
        handle.index().map(move |i| self.view_mut(i))
    }

    // ── Introspection ──────────────────────────────────────────

    /// Whether `index` is currently allocated.
    pub fn contains(&self, index: I) -> bool {
        self.occupied
            .get(index.raw() as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the pool holds no live records.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots the backing store can hold without growing.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Number of deleted slots waiting for reuse.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Bytes held by the backing store.
    pub fn memory_bytes(&self) -> usize {
        self.store.memory_bytes()
    }

    /// Live indices in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = I> + '_ {
        self.occupied
            .iter()
            .enumerate()
            .filter(|(_, &live)| live)
            .map(|(i, _)| I::from_raw(i as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::{VertexIndex, NO_INDEX};

    fn make_pool() -> EntityPool<VertexIndex> {
        let layout = Layout::builder().index("link").i32("value").build().unwrap();
        EntityPool::new(layout, &PoolConfig::new(2))
    }

    #[test]
    fn alloc_initialises_to_template() {
        let mut pool = make_pool();
        let v = pool.alloc();
        let view = pool.view(v);
        assert_eq!(view.get_index(0), NO_INDEX);
        assert_eq!(view.get_i32(4), 0);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn deleted_slot_is_reused_last_in_first_out() {
        let mut pool = make_pool();
        let a = pool.alloc();
        let b = pool.alloc();
        let c = pool.alloc();
        pool.delete(a);
        pool.delete(c);
        assert_eq!(pool.alloc(), c);
        assert_eq!(pool.alloc(), a);
        assert_eq!(pool.alloc(), VertexIndex(3));
        assert!(pool.contains(b));
    }

    #[test]
    fn reused_slot_is_reset() {
        let mut pool = make_pool();
        let a = pool.alloc();
        pool.view_mut(a).put_i32(4, 99);
        pool.view_mut(a).put_index(0, 5);
        pool.delete(a);
        let b = pool.alloc();
        assert_eq!(a, b);
        assert_eq!(pool.view(b).get_i32(4), 0);
        assert_eq!(pool.view(b).get_index(0), NO_INDEX);
    }

    #[test]
    fn store_grows_past_initial_capacity() {
        let mut pool = make_pool();
        for _ in 0..9 {
            pool.alloc();
        }
        assert_eq!(pool.len(), 9);
        assert!(pool.capacity() >= 9);
        assert_eq!(pool.capacity(), 16);
    }

    #[test]
    fn handle_lifecycle_is_accounted() {
        let mut pool = make_pool();
        let mut h = pool.create_handle();
        assert_eq!(pool.outstanding_handles(), 1);
        let idx = pool.allocate(&mut h).index();
        assert_eq!(idx, Some(VertexIndex(0)));
        pool.handle_view_mut(&h).unwrap().put_i32(4, 42);
        let other = pool.alloc();
        pool.fetch(other, &mut h);
        assert_eq!(pool.handle_view(&h).unwrap().get_i32(4), 0);
        pool.fetch(VertexIndex(0), &mut h);
        assert_eq!(pool.handle_view(&h).unwrap().get_i32(4), 42);
        pool.release_handle(h);
        assert_eq!(pool.outstanding_handles(), 0);
    }

    #[test]
    fn unbound_handle_has_no_view() {
        let mut pool = make_pool();
        let h = pool.create_handle();
        assert!(pool.handle_view(&h).is_none());
        pool.release_handle(h);
    }

    #[test]
    fn iter_yields_live_indices_in_order() {
        let mut pool = make_pool();
        let ids: Vec<_> = (0..5).map(|_| pool.alloc()).collect();
        pool.delete(ids[1]);
        pool.delete(ids[3]);
        let live: Vec<_> = pool.iter().collect();
        assert_eq!(live, vec![ids[0], ids[2], ids[4]]);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut pool = make_pool();
        let a = pool.alloc();
        pool.alloc();
        pool.delete(a);
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.free_count(), 0);
        assert_eq!(pool.alloc(), VertexIndex(0));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_count_tracks_alloc_and_delete(
                ops in proptest::collection::vec(any::<bool>(), 1..64),
            ) {
                let mut pool = make_pool();
                let mut live: Vec<VertexIndex> = Vec::new();
                for alloc in ops {
                    if alloc || live.is_empty() {
                        live.push(pool.alloc());
                    } else {
                        let v = live.pop().unwrap();
                        pool.delete(v);
                    }
                }
                prop_assert_eq!(pool.len(), live.len());
                let mut expected = live.clone();
                expected.sort();
                prop_assert_eq!(pool.iter().collect::<Vec<_>>(), expected);
            }

            #[test]
            fn slots_never_exceed_peak_live(
                ops in proptest::collection::vec(any::<bool>(), 1..64),
            ) {
                let mut pool = make_pool();
                let mut live: Vec<VertexIndex> = Vec::new();
                let mut peak = 0usize;
                for alloc in ops {
                    if alloc || live.is_empty() {
                        live.push(pool.alloc());
                    } else {
                        let v = live.remove(0);
                        pool.delete(v);
                    }
                    peak = peak.max(live.len());
                }
                // Free-list reuse means the high-water mark equals peak occupancy.
                prop_assert_eq!(pool.len() + pool.free_count(), peak);
            }
        }
    }
}
