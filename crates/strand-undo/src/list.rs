//! The edit list: history entries, cursor and undo points.
//!
//! Entries live in an [`EntityPool`] of fixed-size records:
//!
//! ```text
//! | type u8 | undo_point u8 | record_len u32 |
//! ```
//!
//! The cursor `c` splits the list: entries `[0, c)` are applied, entries
//! `[c, len)` are the redo tail. Recording while the tail is non-empty
//! deletes it from the end down to the cursor. With last-in first-out
//! slot reuse that hands slot `c` straight back, so entry `k` always
//! lives in slot `k`.

use strand_arena::{EntityPool, Layout, PoolConfig};
use strand_core::{EditIndex, JournalError};
use tracing::debug;

const TYPE: usize = 0;
const UNDO_POINT: usize = 1;
const RECORD_LEN: usize = 2;

fn entry_layout() -> Layout {
    Layout::builder()
        .u8("type")
        .u8("undo_point")
        .i32("record_len")
        .build()
        .expect("three distinct fixed-size fields always form a valid layout")
}

/// One history entry as read from the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditEntry {
    /// Slot (and position) of the entry.
    pub index: EditIndex,
    /// Stored edit type tag.
    pub type_tag: u8,
    /// Whether this entry closes an atomic group.
    pub undo_point: bool,
    /// Length of the entry's record in the log.
    pub record_len: u32,
}

/// Ordered edit history with a cursor.
pub struct EditList {
    entries: EntityPool<EditIndex>,
    len: u32,
    cursor: u32,
}

impl EditList {
    /// Empty list.
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            entries: EntityPool::new(entry_layout(), config),
            len: 0,
            cursor: 0,
        }
    }

    /// Append an entry at the cursor, discarding the redo tail first.
    pub fn record(&mut self, type_tag: u8, record_len: u32) -> EditIndex {
        if self.cursor < self.len {
            debug!(
                discarded = self.len - self.cursor,
                cursor = self.cursor,
                "redo tail truncated"
            );
            for i in (self.cursor..self.len).rev() {
                self.entries.delete(EditIndex(i));
            }
            self.len = self.cursor;
        }
        let index = self.entries.alloc();
        debug_assert_eq!(index, EditIndex(self.cursor), "entry slot out of step");
        {
            let mut view = self.entries.view_mut(index);
            view.put_u8(TYPE, type_tag);
            view.put_u8(UNDO_POINT, 0);
            view.put_u32(RECORD_LEN, record_len);
        }
        self.len += 1;
        self.cursor = self.len;
        index
    }

    /// Mark the most recently applied entry as the end of a group.
    ///
    /// No-op when nothing has been applied.
    pub fn set_undo_point(&mut self) {
        if self.cursor > 0 {
            self.entries
                .view_mut(EditIndex(self.cursor - 1))
                .put_u8(UNDO_POINT, 1);
        }
    }

    /// Read entry `index`.
    pub fn entry(&self, index: EditIndex) -> EditEntry {
        let view = self.entries.view(index);
        EditEntry {
            index,
            type_tag: view.get_u8(TYPE),
            undo_point: view.get_u8(UNDO_POINT) != 0,
            record_len: view.get_u32(RECORD_LEN),
        }
    }

    /// Step back over one group, handing each entry to `revert`.
    ///
    /// Walks backward from the cursor and stops before an entry flagged
    /// as an undo point, except that the first entry is always taken.
    /// Returns the number of entries reverted; zero when there is no
    /// history. If `revert` fails the cursor stays after the failing
    /// entry.
    pub fn undo(
        &mut self,
        mut revert: impl FnMut(EditEntry) -> Result<(), JournalError>,
    ) -> Result<usize, JournalError> {
        let mut applied = 0;
        while self.cursor > 0 {
            let entry = self.entry(EditIndex(self.cursor - 1));
            if applied > 0 && entry.undo_point {
                break;
            }
            revert(entry)?;
            self.cursor -= 1;
            applied += 1;
        }
        Ok(applied)
    }

    /// Step forward over one group, handing each entry to `reapply`.
    ///
    /// Stops after the first entry flagged as an undo point, or at the end
    /// of the list. Returns the number of entries reapplied.
    pub fn redo(
        &mut self,
        mut reapply: impl FnMut(EditEntry) -> Result<(), JournalError>,
    ) -> Result<usize, JournalError> {
        let mut applied = 0;
        while self.cursor < self.len {
            let entry = self.entry(EditIndex(self.cursor));
            reapply(entry)?;
            self.cursor += 1;
            applied += 1;
            if entry.undo_point {
                break;
            }
        }
        Ok(applied)
    }

    /// Entries retained, applied and redo-available.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of applied entries.
    pub fn cursor(&self) -> usize {
        self.cursor as usize
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.len
    }
}

impl std::fmt::Debug for EditList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditList")
            .field("len", &self.len)
            .field("cursor", &self.cursor)
            .finish()
    }
}
