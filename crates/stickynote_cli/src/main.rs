//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `stickynote_core` wiring.
//! - Keep output deterministic enough for quick local sanity checks.

use stickynote_core::{
    core_version, ListPresenter, MemoryNoteStore, NoteBoard, NotesApp, StoreError, UiEvent,
};

fn main() -> Result<(), StoreError> {
    let store = MemoryNoteStore::new();
    let changes = store.changes();
    let board = NoteBoard::new(store, ListPresenter::new());
    let mut app = NotesApp::start(board, changes)?;

    app.dispatch(UiEvent::Submit {
        text: "hello from the board\nsecond line".to_string(),
    })?;

    for card in app.board().presenter().cards() {
        println!(
            "note key={} caption=\"{}\" body={}",
            card.key().unwrap_or("-"),
            card.caption(),
            card.body_markup()
        );
    }
    println!("stickynote_core version={}", core_version());
    Ok(())
}
