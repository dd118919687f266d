//! Binary undo/redo journal for the Strand graph.
//!
//! Records structural, attribute and property edits of a
//! [`Graph`](strand_graph::Graph) into a compact byte log and replays them
//! exactly: an undone edge removal puts the edge back at the very
//! adjacency positions it occupied, and slot reuse order makes the
//! restored entities land in their original slots.
//!
//! # Architecture
//!
//! ```text
//! UndoableGraph (mutation API, recording switch)
//! ├── Graph
//! ├── EditList (EntityPool<EditIndex>: type | undo_point | record_len; cursor)
//! ├── UndoLog (byte buffer, cursor in step with the edit list)
//! └── StableIdMap × 2 (slot ↔ permanent id, vertices and edges)
//! ```
//!
//! History is linear: recording after an undo discards the redo tail.
//! Undo points group consecutive edits into one user action. The log is
//! never compacted.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod edit;
pub mod history;
pub mod ids;
pub mod list;
pub mod log;

// Public re-exports for the primary API surface.
pub use config::JournalConfig;
pub use edit::{Edit, EditKind, Replay};
pub use history::UndoableGraph;
pub use ids::StableIdMap;
pub use list::{EditEntry, EditList};
pub use log::UndoLog;
