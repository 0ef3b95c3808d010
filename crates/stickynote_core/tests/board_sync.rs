use stickynote_core::{Clock, KeyValueStore, ListPresenter, MemoryNoteStore, NoteBoard, NotePresenter};
use std::collections::HashSet;

struct FrozenClock(i64);

impl Clock for FrozenClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

fn board_at(
    now_ms: i64,
) -> NoteBoard<MemoryNoteStore, ListPresenter> {
    NoteBoard::with_clock(
        MemoryNoteStore::new(),
        ListPresenter::new(),
        Box::new(FrozenClock(now_ms)),
    )
}

#[test]
fn create_writes_store_and_renders_one_card() {
    let mut board = board_at(1_700_000_000_000);

    let key = board.create("hello").unwrap().expect("key should be issued");

    assert_eq!(key, "1700000000000");
    assert_eq!(board.store().get(&key).unwrap().as_deref(), Some("hello"));
    assert_eq!(board.presenter().len(), 1);
    assert_eq!(board.presenter().card(&key).unwrap().body_markup(), "hello");
}

#[test]
fn create_round_trips_text_exactly() {
    let mut board = board_at(1_700_000_000_000);
    let text = "  spaced\tand\nbroken  ";

    let key = board.create(text).unwrap().unwrap();

    assert_eq!(board.store().get(&key).unwrap().as_deref(), Some(text));
}

#[test]
fn empty_input_is_a_no_op_without_store_write_or_view_change() {
    let mut board = board_at(1_700_000_000_000);

    assert_eq!(board.create("").unwrap(), None);

    assert!(board.store().enumerate().unwrap().is_empty());
    assert!(board.presenter().is_empty());
}

#[test]
fn all_whitespace_input_is_accepted_untrimmed() {
    let mut board = board_at(1_700_000_000_000);

    let key = board.create("   ").unwrap().expect("whitespace is a note");

    assert_eq!(board.store().get(&key).unwrap().as_deref(), Some("   "));
}

#[test]
fn keys_stay_unique_when_the_clock_does_not_advance() {
    let mut board = board_at(1_700_000_000_000);

    let first = board.create("one").unwrap().unwrap();
    let second = board.create("two").unwrap().unwrap();

    assert_ne!(first, second);
    assert!(second > first);
    assert_eq!(board.presenter().len(), 2);
}

#[test]
fn load_projects_exactly_the_enumerable_keys() {
    let mut store = MemoryNoteStore::new();
    store.set("k1", "a").unwrap();
    store.set("k2", "b").unwrap();
    let mut board = NoteBoard::new(store, ListPresenter::new());

    let processed = board.load().unwrap();

    assert_eq!(processed, 2);
    let rendered: HashSet<_> = board
        .presenter()
        .cards()
        .iter()
        .filter_map(|card| card.key().map(str::to_string))
        .collect();
    let stored: HashSet<_> = board
        .store()
        .enumerate()
        .unwrap()
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    assert_eq!(rendered, stored);
    assert_eq!(board.presenter().card("k1").unwrap().body_markup(), "a");
    assert_eq!(board.presenter().card("k2").unwrap().body_markup(), "b");
}

#[test]
fn load_after_partial_render_does_not_duplicate_entries() {
    let mut store = MemoryNoteStore::new();
    store.set("k1", "a").unwrap();
    let mut board = NoteBoard::new(store, ListPresenter::new());

    board.load().unwrap();
    board.load().unwrap();

    assert_eq!(board.presenter().len(), 1);
}

#[test]
fn upsert_is_idempotent() {
    let mut board = board_at(1_700_000_000_000);

    board.apply_change("k1", Some("x"));
    board.apply_change("k1", Some("x"));

    assert_eq!(board.presenter().len(), 1);
    assert_eq!(board.presenter().card("k1").unwrap().body_markup(), "x");
}

#[test]
fn upsert_replaces_text_without_duplicating_the_entry() {
    let mut board = board_at(1_700_000_000_000);

    board.apply_change("k1", Some("x"));
    board.apply_change("k1", Some("y"));

    assert_eq!(board.presenter().len(), 1);
    assert_eq!(board.presenter().card("k1").unwrap().body_markup(), "y");
}

#[test]
fn empty_and_absent_values_both_mean_deletion() {
    let mut board = board_at(1_700_000_000_000);

    board.apply_change("k1", Some("x"));
    board.apply_change("k1", Some(""));
    assert!(board.presenter().is_empty());

    board.apply_change("k2", Some("y"));
    board.apply_change("k2", None);
    assert!(board.presenter().is_empty());

    // Already-absent keys are quiet no-ops.
    board.apply_change("k3", None);
    board.apply_change("k3", Some(""));
    assert!(board.presenter().is_empty());
}

#[test]
fn external_deletion_does_not_rewrite_the_store() {
    let mut store = MemoryNoteStore::new();
    store.set("k1", "a").unwrap();
    let mut board = NoteBoard::new(store, ListPresenter::new());
    board.load().unwrap();

    // The observed deletion only updates the view; the store entry stays
    // until its owner removes it.
    board.apply_change("k1", None);

    assert!(!board.presenter().contains("k1"));
    assert_eq!(board.store().get("k1").unwrap().as_deref(), Some("a"));
}

#[test]
fn delete_removes_store_entry_and_card() {
    let mut board = board_at(1_700_000_000_000);
    let key = board.create("to be deleted").unwrap().unwrap();

    board.delete(&key).unwrap();

    assert_eq!(board.store().get(&key).unwrap(), None);
    assert!(board.presenter().is_empty());
}

#[test]
fn delete_of_an_unknown_key_is_a_no_op() {
    let mut board = board_at(1_700_000_000_000);
    board.create("keep me").unwrap();

    board.delete("does-not-exist").unwrap();

    assert_eq!(board.presenter().len(), 1);
    assert_eq!(board.store().enumerate().unwrap().len(), 1);
}

#[test]
fn arrivals_insert_at_the_anchor_regardless_of_key_order() {
    let mut board = board_at(1_700_000_000_000);

    // An externally-observed note with an older key still lands at the
    // anchor: list order is arrival order at this view.
    board.create("local").unwrap();
    board.apply_change("900000000000", Some("older elsewhere"));

    let keys: Vec<_> = board
        .presenter()
        .cards()
        .iter()
        .filter_map(|card| card.key())
        .collect();
    assert_eq!(keys, vec!["900000000000", "1700000000000"]);
}

#[test]
fn line_breaks_render_as_visual_breaks_through_the_board() {
    let mut board = board_at(1_700_000_000_000);

    let key = board.create("a\nb").unwrap().unwrap();

    assert_eq!(board.presenter().card(&key).unwrap().body_markup(), "a<br>b");
    // The stored text keeps the raw line break.
    assert_eq!(board.store().get(&key).unwrap().as_deref(), Some("a\nb"));
}

#[test]
fn notes_snapshot_mirrors_the_store() {
    let mut board = board_at(1_700_000_000_000);
    board.create("first").unwrap();
    board.create("second").unwrap();

    let notes = board.notes().unwrap();

    assert_eq!(notes.len(), 2);
    assert!(notes
        .iter()
        .all(|note| note.created_at_ms().is_some() && !note.text.is_empty()));
}

#[test]
fn created_caption_is_derived_from_the_key_timestamp() {
    // 2023-11-14T22:13:20Z
    let mut board = board_at(1_700_000_000_000);

    let key = board.create("dated").unwrap().unwrap();

    assert_eq!(
        board.presenter().card(&key).unwrap().caption(),
        "Created on Nov 14"
    );
}
