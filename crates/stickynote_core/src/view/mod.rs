//! Rendered-view collaborator.
//!
//! # Responsibility
//! - Define the presenter contract the board projects notes through.
//! - Own the text rendering rules (line-break preservation, escaping) and
//!   the card element lifecycle.
//!
//! # Invariants
//! - The view holds at most one entry per key.
//! - New entries are inserted at the anchor position, so list order reflects
//!   arrival order at this view, not creation-time order across contexts.

pub mod card;
pub mod list;
pub mod text;

pub use card::NoteCard;
pub use list::ListPresenter;

/// Contract between the board and the rendered note list.
///
/// Key-addressed: the presenter owns whatever handle maps a key to its
/// on-screen representation.
pub trait NotePresenter {
    /// Whether a view entry exists for `key`.
    fn contains(&self, key: &str) -> bool;

    /// Inserts a new entry for `key` at the anchor position, immediately
    /// after the list-header marker.
    fn insert_at_anchor(&mut self, key: &str, note_text: &str);

    /// Replaces the displayed text of the existing entry for `key`.
    fn update(&mut self, key: &str, note_text: &str);

    /// Removes the entry for `key`. Absent keys are a no-op.
    fn remove(&mut self, key: &str);
}
