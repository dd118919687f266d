//! Journal configuration parameters.

use strand_arena::PoolConfig;

/// Configuration for the undo journal of an
/// [`UndoableGraph`](crate::UndoableGraph).
///
/// Both values are initial reservations. The edit list and the byte log
/// grow by doubling, so neither bounds the history length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalConfig {
    /// Edit list pool sizing.
    ///
    /// Default: [`DEFAULT_INITIAL_EDIT_CAPACITY`](Self::DEFAULT_INITIAL_EDIT_CAPACITY) entries.
    pub edits: PoolConfig,
    /// Bytes reserved for the record log.
    ///
    /// Default: [`DEFAULT_INITIAL_LOG_BYTES`](Self::DEFAULT_INITIAL_LOG_BYTES).
    pub initial_log_bytes: usize,
}

impl JournalConfig {
    /// Default number of edit entries reserved up front.
    pub const DEFAULT_INITIAL_EDIT_CAPACITY: u32 = 1024;

    /// Default log reservation (64 KiB).
    pub const DEFAULT_INITIAL_LOG_BYTES: usize = 64 * 1024;

    /// Create a config with explicit reservations.
    pub fn new(initial_edit_capacity: u32, initial_log_bytes: usize) -> Self {
        Self {
            edits: PoolConfig::new(initial_edit_capacity),
            initial_log_bytes: initial_log_bytes.max(1),
        }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_INITIAL_EDIT_CAPACITY,
            Self::DEFAULT_INITIAL_LOG_BYTES,
        )
    }
}
