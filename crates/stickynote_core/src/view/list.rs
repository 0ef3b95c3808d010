//! In-memory list presenter.
//!
//! # Responsibility
//! - Hold rendered cards in on-screen order and implement the presenter
//!   contract over them.
//!
//! # Invariants
//! - Index 0 is the anchor position, immediately after the list-header
//!   marker; every insertion lands there.
//! - At most one card exists per key.

use crate::view::card::NoteCard;
use crate::view::NotePresenter;

/// Rendered note list with head-of-list anchor insertion.
#[derive(Debug, Default)]
pub struct ListPresenter {
    cards: Vec<NoteCard>,
}

impl ListPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in on-screen order, newest arrival first.
    pub fn cards(&self) -> &[NoteCard] {
        &self.cards
    }

    /// Number of rendered cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the card bound to `key`, when rendered.
    pub fn card(&self, key: &str) -> Option<&NoteCard> {
        self.cards.iter().find(|card| card.key() == Some(key))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.key() == Some(key))
    }
}

impl NotePresenter for ListPresenter {
    fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    fn insert_at_anchor(&mut self, key: &str, note_text: &str) {
        let mut card = NoteCard::new(note_text);
        // Key binding happens after insertion-time construction, once.
        card.assign_key(key);
        self.cards.insert(0, card);
    }

    fn update(&mut self, key: &str, note_text: &str) {
        if let Some(position) = self.position(key) {
            self.cards[position].set_body(note_text);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(position) = self.position(key) {
            self.cards.remove(position);
        }
    }
}
