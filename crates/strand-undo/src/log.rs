//! Append-only byte log with a movable cursor.
//!
//! ```text
//!   0                position              len          capacity
//!   |── applied ───────|── redo-available ───|── spare ─────|
//! ```
//!
//! `record` writes at the cursor and discards everything after it,
//! `undo` steps the cursor back over one record, `redo` steps it forward.
//! The buffer only ever grows.

use strand_core::JournalError;
use tracing::debug;

/// Growable record buffer backing the undo journal.
#[derive(Clone, Debug)]
pub struct UndoLog {
    /// Backing bytes. `data.len()` is the capacity.
    data: Vec<u8>,
    position: usize,
    len: usize,
}

impl UndoLog {
    /// Empty log with `initial_capacity` bytes reserved.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            data: vec![0; initial_capacity.max(1)],
            position: 0,
            len: 0,
        }
    }

    /// Reserve `size` bytes at the cursor and return them for filling.
    ///
    /// Anything after the cursor is discarded first. Capacity doubles
    /// until the record fits.
    pub fn record(&mut self, size: usize) -> &mut [u8] {
        let end = self.position + size;
        if end > self.data.len() {
            self.grow(end);
        }
        let start = self.position;
        self.position = end;
        self.len = end;
        &mut self.data[start..end]
    }

    /// Move the cursor back over a `size`-byte record and return it.
    pub fn undo(&mut self, size: usize) -> Result<&[u8], JournalError> {
        if size > self.position {
            return Err(JournalError::MalformedRecord {
                detail: format!(
                    "undo of {size} bytes with only {} before the cursor",
                    self.position
                ),
            });
        }
        self.position -= size;
        Ok(&self.data[self.position..self.position + size])
    }

    /// Move the cursor forward over a `size`-byte record and return it.
    pub fn redo(&mut self, size: usize) -> Result<&[u8], JournalError> {
        let end = self.position + size;
        if end > self.len {
            return Err(JournalError::MalformedRecord {
                detail: format!(
                    "redo of {size} bytes with only {} after the cursor",
                    self.len - self.position
                ),
            });
        }
        let start = self.position;
        self.position = end;
        Ok(&self.data[start..end])
    }

    /// Put the cursor back at `position`, a value previously read from
    /// [`position`](Self::position).
    ///
    /// # Panics
    ///
    /// If `position` is past the end of the retained history.
    pub fn seek(&mut self, position: usize) {
        assert!(
            position <= self.len,
            "seek to {position} past log end {}",
            self.len
        );
        self.position = position;
    }

    fn grow(&mut self, needed: usize) {
        let mut capacity = self.data.len().max(1);
        while capacity < needed {
            capacity *= 2;
        }
        debug!(from = self.data.len(), to = capacity, "undo log grown");
        self.data.resize(capacity, 0);
    }

    /// Cursor offset: bytes of applied history.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes of retained history, applied and redo-available.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes reserved.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
}
