//! Note board orchestration.
//!
//! # Responsibility
//! - Mirror the persistent store into the rendered view through one upsert
//!   path shared by load, local creation, and external notifications.
//!
//! # Invariants
//! - An empty/absent value always means "deleted", never "empty note".
//! - `apply_change` never writes the store; store writes happen only in
//!   `create` and `delete`.
//! - Empty submitted text is a silent no-op, not an error.

use crate::model::note::{Clock, KeyGenerator, Note, NoteKey, SystemClock};
use crate::store::{KeyValueStore, StoreResult};
use crate::view::NotePresenter;
use log::{debug, info};

/// Mirrors a keyed text-note model between a persistent store and a
/// rendered view.
///
/// Both collaborators are injected at construction; the board owns no
/// ambient state beyond its key generator.
pub struct NoteBoard<S: KeyValueStore, P: NotePresenter> {
    store: S,
    presenter: P,
    keys: KeyGenerator,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore, P: NotePresenter> NoteBoard<S, P> {
    /// Creates a board on the system clock.
    pub fn new(store: S, presenter: P) -> Self {
        Self::with_clock(store, presenter, Box::new(SystemClock))
    }

    /// Creates a board with an injected clock, for deterministic keys.
    pub fn with_clock(store: S, presenter: P, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            presenter,
            keys: KeyGenerator::new(),
            clock,
        }
    }

    /// Projects every stored entry into the view.
    ///
    /// A full, synchronous pass; the view is ready once this returns.
    /// Enumeration order is store-defined and not contractually meaningful.
    /// Returns the number of entries processed.
    pub fn load(&mut self) -> StoreResult<usize> {
        let entries = self.store.enumerate()?;
        let count = entries.len();
        for (key, value) in &entries {
            self.apply_change(key, Some(value.as_str()));
        }
        info!("event=board_load module=board status=ok entries={count}");
        Ok(count)
    }

    /// Persists and renders a new note, returning its key.
    ///
    /// Empty text is a silent no-op returning `None`; any non-empty string,
    /// whitespace included, is accepted untrimmed. The view is updated
    /// synchronously in the same call, with no round-trip through a change
    /// notification.
    pub fn create(&mut self, text: &str) -> StoreResult<Option<NoteKey>> {
        if text.is_empty() {
            debug!("event=note_create module=board status=skipped reason=empty_input");
            return Ok(None);
        }

        let key = self.keys.next_key(self.clock.as_ref());
        self.store.set(&key, text)?;
        self.apply_change(&key, Some(text));
        info!("event=note_create module=board status=ok key={key}");
        Ok(Some(key))
    }

    /// Folds one observed key/value pair into the view.
    ///
    /// The single code path behind initial load, local creation's view-side
    /// projection, and cross-context notifications, so "my own notes" and
    /// "notes from elsewhere" can never diverge into different rendering
    /// rules. Never writes the store.
    pub fn apply_change(&mut self, key: &str, value: Option<&str>) {
        match value {
            // An empty or absent value is a deletion, idempotent when the
            // entry is already gone.
            None | Some("") => {
                if self.presenter.contains(key) {
                    self.presenter.remove(key);
                }
            }
            Some(text) => {
                if self.presenter.contains(key) {
                    self.presenter.update(key, text);
                } else {
                    self.presenter.insert_at_anchor(key, text);
                }
            }
        }
    }

    /// Removes a note from the store and the view.
    ///
    /// A successful no-op when `key` exists in neither.
    pub fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.store.remove(key)?;
        self.apply_change(key, None);
        info!("event=note_delete module=board status=ok key={key}");
        Ok(())
    }

    /// Snapshot of the store's current contents as domain records.
    ///
    /// Entries holding an empty value are deletions, not notes, and are
    /// filtered out.
    pub fn notes(&self) -> StoreResult<Vec<Note>> {
        let entries = self.store.enumerate()?;
        Ok(entries
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, text)| Note::new(key, text))
            .collect())
    }

    /// Read access to the injected store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read access to the rendered view.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}
