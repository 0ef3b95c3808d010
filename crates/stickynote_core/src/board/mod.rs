//! Store-to-view mirroring core.
//!
//! # Responsibility
//! - Keep the rendered note list consistent with the injected key-value
//!   store, across local actions and externally-observed changes.
//!
//! # Invariants
//! - The view is a complete, exact projection of the store; both are
//!   mutated inside one run-to-completion operation, never partially.
//! - Local creation, initial load, and external notifications all project
//!   through the same upsert path.

pub mod note_board;

pub use note_board::NoteBoard;
