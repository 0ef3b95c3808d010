//! Event dispatch and external-change pumping.
//!
//! # Responsibility
//! - Own the one-handler-per-event-type dispatch table built at
//!   initialization.
//! - Drain cross-context change notifications into the board's upsert path.
//! - Surface input-field side effects (clear, submit toggle) to the UI.
//!
//! # Invariants
//! - The board is fully loaded before the first event is dispatched.
//! - External changes are folded in only when the owning context pumps
//!   them; no handler interrupts another mid-operation.

use crate::board::NoteBoard;
use crate::model::note::NoteKey;
use crate::store::{KeyValueStore, StoreChange, StoreResult};
use crate::view::NotePresenter;
use std::sync::mpsc::Receiver;

/// UI input events routed into the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The user submitted the input field.
    Submit { text: String },
    /// The user invoked delete on a rendered note.
    DeleteRequested { key: NoteKey },
    /// The input field content changed.
    InputChanged { text: String },
}

/// Signal back to the UI layer after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiReaction {
    /// Nothing for the UI to do.
    None,
    /// Clear the input field; submit becomes disabled until the next edit.
    ResetInput,
    /// Recompute the submit-enabled state.
    SubmitEnabled(bool),
}

/// The page-level component: a loaded board plus its change subscription.
pub struct NotesApp<S: KeyValueStore, P: NotePresenter> {
    board: NoteBoard<S, P>,
    changes: Receiver<StoreChange>,
}

impl<S: KeyValueStore, P: NotePresenter> NotesApp<S, P> {
    /// Loads the board and wires the change subscription.
    ///
    /// The full load completes before this returns, so the view is ready
    /// before the first event can be dispatched.
    pub fn start(
        mut board: NoteBoard<S, P>,
        changes: Receiver<StoreChange>,
    ) -> StoreResult<Self> {
        board.load()?;
        Ok(Self { board, changes })
    }

    /// Routes one UI event to its handler.
    ///
    /// The match is the dispatch table: one arm, one handler, bound for the
    /// lifetime of the app.
    pub fn dispatch(&mut self, event: UiEvent) -> StoreResult<UiReaction> {
        match event {
            UiEvent::Submit { text } => self.on_submit(&text),
            UiEvent::DeleteRequested { key } => self.on_delete_requested(&key),
            UiEvent::InputChanged { text } => Ok(Self::on_input_changed(&text)),
        }
    }

    /// Folds queued cross-context changes into the view.
    ///
    /// Returns the number of changes applied. Changes observed for a key
    /// already deleted from the store are idempotent no-ops.
    pub fn pump_external_changes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(change) = self.changes.try_recv() {
            self.board.apply_change(&change.key, change.value.as_deref());
            applied += 1;
        }
        applied
    }

    /// The loaded board, for presentation reads.
    pub fn board(&self) -> &NoteBoard<S, P> {
        &self.board
    }

    fn on_submit(&mut self, text: &str) -> StoreResult<UiReaction> {
        match self.board.create(text)? {
            Some(_) => Ok(UiReaction::ResetInput),
            None => Ok(UiReaction::None),
        }
    }

    fn on_delete_requested(&mut self, key: &str) -> StoreResult<UiReaction> {
        self.board.delete(key)?;
        Ok(UiReaction::None)
    }

    fn on_input_changed(text: &str) -> UiReaction {
        UiReaction::SubmitEnabled(!text.is_empty())
    }
}
