use jotpad_core::{derive_state, Note, NoteId};
use uuid::Uuid;

fn note_id(n: u128) -> NoteId {
    Uuid::from_u128(n)
}

fn note(id: NoteId, title: &str, content: &str, updated_at: i64) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: content.to_string(),
        created_at: updated_at,
        updated_at,
    }
}

#[test]
fn blank_query_returns_full_collection() {
    let notes = vec![
        note(note_id(1), "Shopping", "milk", 100),
        note(note_id(2), "Work", "notes", 200),
    ];

    let state = derive_state(&notes, "", None);
    assert_eq!(state.filtered_notes.len(), 2);
    assert_eq!(state.notes.len(), 2);
    assert_eq!(state.search_query, "");
}

#[test]
fn whitespace_only_query_is_treated_as_blank() {
    let notes = vec![note(note_id(1), "Shopping", "milk", 100)];

    let state = derive_state(&notes, "   \t ", None);
    assert_eq!(state.filtered_notes.len(), 1);
    assert_eq!(state.search_query, "");
}

#[test]
fn query_is_trimmed_before_matching_and_in_emitted_state() {
    let notes = vec![
        note(note_id(1), "Shopping", "milk", 100),
        note(note_id(2), "Work", "notes", 200),
    ];

    let state = derive_state(&notes, "  milk  ", None);
    assert_eq!(state.search_query, "milk");
    assert_eq!(state.filtered_notes.len(), 1);
    assert_eq!(state.filtered_notes[0].id, note_id(1));
}

#[test]
fn filter_matches_title_or_content_case_insensitively() {
    let notes = vec![
        note(note_id(1), "Groceries", "Buy MILK and eggs", 100),
        note(note_id(2), "Milk delivery", "schedule", 200),
        note(note_id(3), "Work", "quarterly notes", 300),
    ];

    let state = derive_state(&notes, "milk", None);
    let hit_ids: Vec<_> = state.filtered_notes.iter().map(|n| n.id).collect();
    assert_eq!(hit_ids, vec![note_id(2), note_id(1)]);
}

#[test]
fn lists_are_sorted_descending_by_updated_at() {
    let notes = vec![
        note(note_id(1), "oldest", "", 100),
        note(note_id(2), "newest", "", 300),
        note(note_id(3), "middle", "", 200),
    ];

    let state = derive_state(&notes, "", None);
    let order: Vec<_> = state.notes.iter().map(|n| n.id).collect();
    assert_eq!(order, vec![note_id(2), note_id(3), note_id(1)]);
}

#[test]
fn sort_ties_keep_original_collection_order() {
    let notes = vec![
        note(note_id(1), "first inserted", "", 100),
        note(note_id(2), "second inserted", "", 100),
        note(note_id(3), "third inserted", "", 100),
    ];

    let state = derive_state(&notes, "", None);
    let order: Vec<_> = state.notes.iter().map(|n| n.id).collect();
    assert_eq!(order, vec![note_id(1), note_id(2), note_id(3)]);
}

#[test]
fn milk_scenario_filters_and_sorts_as_specified() {
    let a = note(note_id(0xa), "Shopping", "milk", 100);
    let b = note(note_id(0xb), "Work", "notes", 200);
    let notes = vec![a.clone(), b.clone()];

    let state = derive_state(&notes, "milk", None);
    assert_eq!(state.filtered_notes, vec![a.clone()]);
    assert_eq!(state.notes, vec![b, a]);
}

#[test]
fn active_note_prefers_match_in_filtered_list() {
    let notes = vec![
        note(note_id(1), "Shopping", "milk", 100),
        note(note_id(2), "Milk delivery", "", 200),
    ];

    let state = derive_state(&notes, "milk", Some(note_id(1)));
    assert_eq!(state.active_note.as_ref().map(|n| n.id), Some(note_id(1)));
}

#[test]
fn active_note_falls_back_to_full_collection_match() {
    // Selected note is hidden by the query but still in the collection; it
    // must stay active rather than yielding to the first filtered note.
    let notes = vec![
        note(note_id(1), "Shopping", "milk", 100),
        note(note_id(2), "Work", "notes", 200),
    ];

    let state = derive_state(&notes, "milk", Some(note_id(2)));
    assert_eq!(state.active_note.as_ref().map(|n| n.id), Some(note_id(2)));
}

#[test]
fn active_note_falls_back_to_first_filtered_for_unknown_selection() {
    let notes = vec![
        note(note_id(1), "Shopping", "milk", 100),
        note(note_id(2), "Work", "notes", 200),
    ];

    let state = derive_state(&notes, "", Some(note_id(99)));
    assert_eq!(state.active_note.as_ref().map(|n| n.id), Some(note_id(2)));
}

#[test]
fn no_selection_defaults_to_most_recent_note() {
    let notes = vec![
        note(note_id(1), "older", "", 100),
        note(note_id(2), "newer", "", 200),
    ];

    let state = derive_state(&notes, "", None);
    assert_eq!(state.active_note.as_ref().map(|n| n.id), Some(note_id(2)));
}

#[test]
fn empty_collection_has_no_active_note() {
    let state = derive_state(&[], "anything", Some(note_id(1)));
    assert!(state.notes.is_empty());
    assert!(state.filtered_notes.is_empty());
    assert!(state.active_note.is_none());
}

#[test]
fn query_without_matches_yields_empty_filtered_list() {
    let notes = vec![note(note_id(1), "Shopping", "milk", 100)];

    let state = derive_state(&notes, "zebra", None);
    assert!(state.filtered_notes.is_empty());
    assert_eq!(state.notes.len(), 1);
    assert!(state.active_note.is_none());
}
