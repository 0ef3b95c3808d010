//! Domain model for sticky notes.
//!
//! # Responsibility
//! - Define the canonical note record shared by store and view projections.
//! - Own key generation and the clock seam it depends on.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteKey` that doubles as its
//!   creation timestamp.
//! - Keys are never reused or mutated after creation.

pub mod note;
