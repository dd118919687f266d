//! Test utilities for Strand development.
//!
//! Provides standard record layouts and prebuilt graphs ([`fixtures`]), a
//! [`RecordingListener`] that logs every change notification for later
//! inspection, and [`GraphSnapshot`], a structural capture of a graph
//! that compares with `==` and prints a readable diff on failure.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod listener;
pub mod snapshot;

pub use fixtures::{bare_graph, chain_graph, point_layout, weighted_layout};
pub use listener::{GraphEvent, RecordingListener};
pub use snapshot::GraphSnapshot;
