//! Fixed-layout slot arena for the Strand graph.
//!
//! Records of one kind live back to back in a single growable byte
//! buffer. Each record is addressed by a slot index and decoded through a
//! [`Layout`] that maps field names to byte offsets. Deleted slots are
//! recycled through a last-in first-out free list.
//!
//! # Architecture
//!
//! ```text
//! EntityPool<I> (allocation, free list, occupancy, handle accounting)
//! ├── Layout (field name → offset, allocation template)
//! └── SlotStore (Vec<u8> carved into slot_size chunks, doubling growth)
//!
//! SlotView / SlotViewMut (typed little-endian access to one slot)
//! Handle<I> (reusable, rebindable cursor; no ownership, no generation)
//! ```
//!
//! The arena performs no liveness checks. Using an index after its slot
//! was deleted reads whatever record occupies the slot now.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod access;
pub mod config;
pub mod handle;
pub mod layout;
pub mod pool;
pub mod store;

// Public re-exports for the primary API surface.
pub use access::{SlotView, SlotViewMut};
pub use config::PoolConfig;
pub use handle::Handle;
pub use layout::{FieldKind, FieldSpec, Layout, LayoutBuilder};
pub use pool::EntityPool;
pub use store::SlotStore;
pub use strand_core::LayoutError;
