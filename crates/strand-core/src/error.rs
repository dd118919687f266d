//! Error types for the Strand workspace, organized by subsystem: record
//! layout declaration and undo journal replay.
//!
//! Structural graph operations have no error type. Misuse of a stale or
//! out-of-range index is a caller contract violation that the arena does
//! not detect, and capacity growth never fails short of allocator abort.

use std::error::Error;
use std::fmt;

use crate::id::{EntityKind, StableId};

/// Errors from declaring a record layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Two fields were declared with the same name.
    DuplicateField {
        /// The repeated field name.
        name: String,
    },
    /// A `Bytes` field was declared with zero length.
    ZeroSizedField {
        /// The offending field name.
        name: String,
    },
    /// The layout would exceed the addressable attribute range.
    TooManyFields {
        /// Number of fields requested.
        count: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField { name } => write!(f, "duplicate layout field '{name}'"),
            Self::ZeroSizedField { name } => {
                write!(f, "layout field '{name}' has zero size")
            }
            Self::TooManyFields { count } => {
                write!(f, "layout declares {count} fields, at most 65535 allowed")
            }
        }
    }
}

impl Error for LayoutError {}

/// Errors raised while replaying the undo journal.
///
/// These indicate a corrupted journal or a graph that was mutated behind
/// the journal's back while recording was active. They are never produced
/// by an empty history: undo and redo with nothing to do are no-ops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JournalError {
    /// An edit list entry carries a type tag outside the edit registry.
    UnknownEditType {
        /// The unrecognised tag.
        tag: u8,
    },
    /// A record references a stable id with no live slot bound to it.
    UnresolvedStableId {
        /// Which pool the id belongs to.
        kind: EntityKind,
        /// The dangling id.
        id: StableId,
    },
    /// A record window could not be decoded.
    MalformedRecord {
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl fmt::Display for JournalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEditType { tag } => write!(f, "unknown edit type tag {tag}"),
            Self::UnresolvedStableId { kind, id } => {
                write!(f, "stable {kind} id {id} is not bound to a live slot")
            }
            Self::MalformedRecord { detail } => write!(f, "malformed edit record: {detail}"),
        }
    }
}

impl Error for JournalError {}
