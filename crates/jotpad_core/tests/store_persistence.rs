use jotpad_core::db::{open_db, open_db_in_memory};
use jotpad_core::{Note, NoteStore, SqliteNoteRepository, NOTES_KEY};
use rusqlite::params;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use uuid::Uuid;

fn new_store() -> NoteStore {
    let conn = open_db_in_memory().unwrap();
    NoteStore::new(SqliteNoteRepository::new(conn))
}

#[test]
fn empty_store_observes_empty_collection() {
    let store = new_store();
    assert!(store.snapshot().is_empty());
}

#[test]
fn upsert_appends_new_note_and_refreshes_updated_at() {
    let store = new_store();

    let mut note = Note::new();
    note.title = "Shopping".to_string();
    note.updated_at = 0;
    store.upsert(note.clone());
    store.flush();

    let notes = store.snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, note.id);
    assert_eq!(notes[0].title, "Shopping");
    assert!(notes[0].updated_at >= note.created_at);
}

#[test]
fn upsert_replaces_record_with_matching_id() {
    let store = new_store();

    let mut note = Note::new();
    note.title = "draft".to_string();
    store.upsert(note.clone());

    note.title = "final".to_string();
    note.content = "body".to_string();
    store.upsert(note.clone());
    store.flush();

    let notes = store.snapshot();
    assert_eq!(notes.len(), 1, "same id must never produce two records");
    assert_eq!(notes[0].title, "final");
    assert_eq!(notes[0].content, "body");
}

#[test]
fn upserts_with_distinct_ids_keep_all_records() {
    let store = new_store();

    for index in 0..5 {
        let mut note = Note::new();
        note.title = format!("note {index}");
        store.upsert(note);
    }
    store.flush();

    let notes = store.snapshot();
    assert_eq!(notes.len(), 5);

    let ids: HashSet<_> = notes.iter().map(|note| note.id).collect();
    assert_eq!(ids.len(), 5, "ids must stay unique in the collection");
}

#[test]
fn delete_removes_record_and_missing_id_is_noop() {
    let store = new_store();

    let keep = Note::new();
    let remove = Note::new();
    store.upsert(keep.clone());
    store.upsert(remove.clone());

    store.delete(remove.id);
    store.delete(Uuid::new_v4());
    store.flush();

    let notes = store.snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, keep.id);
}

#[test]
fn rapid_edit_burst_converges_to_last_write() {
    let store = new_store();
    let note = Note::new();

    for index in 0..10 {
        let mut edit = note.clone();
        edit.content = format!("revision {index}");
        store.upsert(edit);
    }
    store.flush();

    let notes = store.snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "revision 9");
}

#[test]
fn concurrent_writers_lose_no_mutations() {
    let store = Arc::new(new_store());
    let mut handles = Vec::new();

    for _ in 0..2 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..25 {
                store.upsert(Note::new());
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    store.flush();

    assert_eq!(store.snapshot().len(), 50);
}

#[test]
fn subscribers_receive_collection_on_every_mutation() {
    let store = new_store();
    let updates = store.subscribe();

    let initial = updates.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(initial.is_empty());

    let note = Note::new();
    store.upsert(note.clone());
    let after_upsert = updates.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(after_upsert.len(), 1);
    assert_eq!(after_upsert[0].id, note.id);

    store.delete(note.id);
    let after_delete = updates.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(after_delete.is_empty());
}

#[test]
fn notes_persist_across_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jotpad.db");

    let mut note = Note::new();
    note.title = "durable".to_string();
    {
        let store = NoteStore::new(SqliteNoteRepository::new(open_db(&path).unwrap()));
        store.upsert(note.clone());
        store.flush();
    }

    let store = NoteStore::new(SqliteNoteRepository::new(open_db(&path).unwrap()));
    let notes = store.snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, note.id);
    assert_eq!(notes[0].title, "durable");
}

#[test]
fn malformed_payload_observes_as_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2);",
        params![NOTES_KEY, "{ this is not a note array"],
    )
    .unwrap();

    let store = NoteStore::new(SqliteNoteRepository::new(conn));
    assert!(store.snapshot().is_empty());

    // The store stays usable; the next mutation writes a clean payload.
    store.upsert(Note::new());
    store.flush();
    assert_eq!(store.snapshot().len(), 1);
}
