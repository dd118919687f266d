//! Reusable slot cursors.
//!
//! A [`Handle`] is bound to at most one slot at a time. Binding never
//! allocates, so a single handle can walk an entire adjacency chain by
//! being re-fetched at every step.
//!
//! Handles do not own their slot and carry no generation: once the bound
//! slot is deleted the handle silently refers to whatever is allocated
//! there next. Keeping handles fresh across structural mutation is the
//! caller's job.

use std::fmt;

use strand_core::PoolIndex;

/// Non-owning cursor over one slot of an [`EntityPool`](crate::EntityPool).
///
/// Obtain one with [`EntityPool::create_handle`](crate::EntityPool::create_handle),
/// bind it with `fetch` or `allocate`, and hand it back with
/// [`EntityPool::release_handle`](crate::EntityPool::release_handle).
/// Deliberately neither `Clone` nor `Copy`: a handle is a cursor to be
/// rebound, and pools account for every handle outstanding.
#[must_use]
pub struct Handle<I: PoolIndex> {
    index: Option<I>,
}

impl<I: PoolIndex> Handle<I> {
    /// An unbound handle.
    pub(crate) fn unbound() -> Self {
        Self { index: None }
    }

    /// Point the handle at `index`.
    #[inline]
    pub(crate) fn bind(&mut self, index: I) {
        self.index = Some(index);
    }

    /// Drop the current binding.
    pub fn unbind(&mut self) {
        self.index = None;
    }

    /// The slot this handle is bound to, if any.
    #[inline]
    pub fn index(&self) -> Option<I> {
        self.index
    }

    /// Whether the handle is bound.
    pub fn is_bound(&self) -> bool {
        self.index.is_some()
    }
}

impl<I: PoolIndex> fmt::Debug for Handle<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "Handle({i:?})"),
            None => write!(f, "Handle(unbound)"),
        }
    }
}
