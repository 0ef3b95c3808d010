use stickynote_core::{
    KeyValueStore, ListPresenter, MemoryNoteStore, NoteBoard, NotesApp, UiEvent, UiReaction,
};

fn start_app(store: MemoryNoteStore) -> NotesApp<MemoryNoteStore, ListPresenter> {
    let changes = store.changes();
    let board = NoteBoard::new(store, ListPresenter::new());
    NotesApp::start(board, changes).unwrap()
}

#[test]
fn a_note_created_in_one_context_appears_in_the_other_after_a_pump() {
    let store_a = MemoryNoteStore::new();
    let store_b = store_a.open_sibling();
    let mut app_a = start_app(store_a);
    let mut app_b = start_app(store_b);

    let reaction = app_a
        .dispatch(UiEvent::Submit {
            text: "shared note".to_string(),
        })
        .unwrap();
    assert_eq!(reaction, UiReaction::ResetInput);

    // Nothing surfaces in B until it pumps its queue.
    assert!(app_b.board().presenter().is_empty());
    assert_eq!(app_b.pump_external_changes(), 1);

    assert_eq!(app_b.board().presenter().len(), 1);
    let card = &app_b.board().presenter().cards()[0];
    assert_eq!(card.body_markup(), "shared note");
}

#[test]
fn a_context_never_observes_its_own_changes() {
    let store_a = MemoryNoteStore::new();
    let store_b = store_a.open_sibling();
    let mut app_a = start_app(store_a);
    let _app_b = start_app(store_b);

    app_a
        .dispatch(UiEvent::Submit {
            text: "no echo".to_string(),
        })
        .unwrap();

    assert_eq!(app_a.pump_external_changes(), 0);
    assert_eq!(app_a.board().presenter().len(), 1);
}

#[test]
fn deletion_in_one_context_removes_the_card_in_the_other() {
    let store_a = MemoryNoteStore::new();
    let store_b = store_a.open_sibling();
    let mut app_a = start_app(store_a);
    let mut app_b = start_app(store_b);

    app_a
        .dispatch(UiEvent::Submit {
            text: "short-lived".to_string(),
        })
        .unwrap();
    app_b.pump_external_changes();
    let key = app_b.board().presenter().cards()[0]
        .key()
        .unwrap()
        .to_string();

    app_b.dispatch(UiEvent::DeleteRequested { key }).unwrap();
    assert_eq!(app_a.pump_external_changes(), 1);

    assert!(app_a.board().presenter().is_empty());
    assert!(app_b.board().presenter().is_empty());
    assert!(app_a.board().store().enumerate().unwrap().is_empty());
}

#[test]
fn contexts_started_later_see_existing_notes_via_load() {
    let store_a = MemoryNoteStore::new();
    let mut app_a = start_app(store_a);
    app_a
        .dispatch(UiEvent::Submit {
            text: "pre-existing".to_string(),
        })
        .unwrap();

    // A "tab" opened afterwards projects the store during start.
    let app_b = start_app(app_a.board().store().open_sibling());

    assert_eq!(app_b.board().presenter().len(), 1);
    assert_eq!(
        app_b.board().presenter().cards()[0].body_markup(),
        "pre-existing"
    );
}

#[test]
fn last_write_observed_wins_for_a_contested_key() {
    let mut store_a = MemoryNoteStore::new();
    let mut store_b = store_a.open_sibling();
    let mut app_c = start_app(store_a.open_sibling());

    // Two sibling contexts race on the same key; C observes both in
    // arrival order and converges on the later value.
    store_a.set("k1", "from a").unwrap();
    store_b.set("k1", "from b").unwrap();

    assert_eq!(app_c.pump_external_changes(), 2);
    assert_eq!(app_c.board().presenter().len(), 1);
    assert_eq!(app_c.board().presenter().card("k1").unwrap().body_markup(), "from b");
}
