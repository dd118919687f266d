//! Contiguous fixed-slot-size byte storage.
//!
//! A [`SlotStore`] is one `Vec<u8>` carved into equally sized slots. Slots
//! are addressed by position; the store itself has no notion of which
//! slots are live. That bookkeeping belongs to [`EntityPool`](crate::EntityPool).

/// Growable backing storage for fixed-size records.
///
/// Capacity doubles whenever [`push_slot`](SlotStore::push_slot) runs out
/// of room, giving amortised O(1) appends. Storage is never shrunk.
#[derive(Clone, Debug)]
pub struct SlotStore {
    /// Backing bytes. `data.len() == capacity * slot_size`.
    data: Vec<u8>,
    slot_size: usize,
    capacity: usize,
    /// Number of slots handed out so far (the high-water mark).
    len: usize,
}

impl SlotStore {
    /// Create a store for `slot_size`-byte records with room for
    /// `initial_capacity` slots.
    ///
    /// The reservation is zero-initialised.
    pub fn new(slot_size: usize, initial_capacity: usize) -> Self {
        let capacity = initial_capacity.max(1);
        Self {
            data: vec![0; capacity * slot_size],
            slot_size,
            capacity,
            len: 0,
        }
    }

    /// Append a slot at the end, growing the reservation if needed.
    ///
    /// Returns the new slot's position. The slot's contents are whatever
    /// the reservation held; callers initialise it.
    pub fn push_slot(&mut self) -> u32 {
        if self.len == self.capacity {
            self.grow();
        }
        let index = self.len;
        self.len += 1;
        index as u32
    }

    /// Double the capacity.
    fn grow(&mut self) {
        let new_capacity = (self.capacity * 2).max(1);
        self.data.resize(new_capacity * self.slot_size, 0);
        self.capacity = new_capacity;
    }

    /// Shared bytes of slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is beyond the reservation.
    #[inline]
    pub fn slot(&self, index: u32) -> &[u8] {
        let start = index as usize * self.slot_size;
        &self.data[start..start + self.slot_size]
    }

    /// Mutable bytes of slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is beyond the reservation.
    #[inline]
    pub fn slot_mut(&mut self, index: u32) -> &mut [u8] {
        let start = index as usize * self.slot_size;
        &mut self.data[start..start + self.slot_size]
    }

    /// Forget all slots without releasing memory.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Number of slots handed out (live or freed).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no slot was ever handed out since the last reset.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots the reservation can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of one slot in bytes.
    pub fn slot_size(&self) -> usize {
        self.slot_size
    }

    /// Bytes held by the reservation.
    pub fn memory_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_sequential_positions() {
        let mut store = SlotStore::new(8, 4);
        assert_eq!(store.push_slot(), 0);
        assert_eq!(store.push_slot(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn capacity_doubles_when_exhausted() {
        let mut store = SlotStore::new(8, 2);
        store.push_slot();
        store.push_slot();
        assert_eq!(store.capacity(), 2);
        store.push_slot();
        assert_eq!(store.capacity(), 4);
        assert_eq!(store.memory_bytes(), 32);
        for _ in 0..2 {
            store.push_slot();
        }
        assert_eq!(store.capacity(), 8);
    }

    #[test]
    fn slots_do_not_overlap() {
        let mut store = SlotStore::new(4, 2);
        let a = store.push_slot();
        let b = store.push_slot();
        store.slot_mut(a).copy_from_slice(&[1, 1, 1, 1]);
        store.slot_mut(b).copy_from_slice(&[2, 2, 2, 2]);
        assert_eq!(store.slot(a), &[1, 1, 1, 1]);
        assert_eq!(store.slot(b), &[2, 2, 2, 2]);
    }

    #[test]
    fn growth_preserves_contents() {
        let mut store = SlotStore::new(2, 1);
        let a = store.push_slot();
        store.slot_mut(a).copy_from_slice(&[7, 9]);
        let b = store.push_slot();
        assert!(store.capacity() >= 2);
        assert_eq!(store.slot(a), &[7, 9]);
        assert_eq!(store.slot(b), &[0, 0]);
    }

    #[test]
    fn reset_keeps_reservation() {
        let mut store = SlotStore::new(4, 1);
        store.push_slot();
        store.push_slot();
        let cap = store.capacity();
        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.capacity(), cap);
        assert_eq!(store.push_slot(), 0);
    }

    #[test]
    fn zero_sized_slots_are_empty_slices() {
        let mut store = SlotStore::new(0, 1);
        let a = store.push_slot();
        let b = store.push_slot();
        assert!(store.slot(a).is_empty());
        assert!(store.slot(b).is_empty());
    }
}
