//! Derived presentation state and its recomputation rules.
//!
//! # Responsibility
//! - Derive the filtered, sorted note lists and the active note from the
//!   collection plus search/selection inputs.
//!
//! # Invariants
//! - Lists are ordered descending by `updated_at`, stable on ties.
//! - The active-note fallback priority is: selected note in the filtered
//!   list, selected note anywhere in the collection, first filtered note.

use crate::model::note::{Note, NoteId};

/// Presentation state consumed by a rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotepadState {
    /// Full collection, sorted by recency.
    pub notes: Vec<Note>,
    /// Notes matching the search query, sorted by recency.
    pub filtered_notes: Vec<Note>,
    /// Note shown in the editor pane, when any.
    pub active_note: Option<Note>,
    /// Trimmed search query the lists were derived from.
    pub search_query: String,
}

/// Recomputes the full presentation state from its inputs.
///
/// The middle tier of the active-note fallback keeps a just-created or
/// just-edited note active even when a stale search query filters it out.
pub fn derive_state(
    notes: &[Note],
    search_query: &str,
    selected_id: Option<NoteId>,
) -> NotepadState {
    let trimmed = search_query.trim();

    let mut all: Vec<Note> = notes.to_vec();
    let mut filtered: Vec<Note> = if trimmed.is_empty() {
        all.clone()
    } else {
        let needle = trimmed.to_lowercase();
        all.iter()
            .filter(|note| matches_query(note, &needle))
            .cloned()
            .collect()
    };

    sort_by_recency(&mut all);
    sort_by_recency(&mut filtered);

    let active_note = selected_id
        .and_then(|id| filtered.iter().find(|note| note.id == id))
        .or_else(|| selected_id.and_then(|id| all.iter().find(|note| note.id == id)))
        .or_else(|| filtered.first())
        .cloned();

    NotepadState {
        notes: all,
        filtered_notes: filtered,
        active_note,
        search_query: trimmed.to_string(),
    }
}

fn matches_query(note: &Note, needle_lower: &str) -> bool {
    note.title.to_lowercase().contains(needle_lower)
        || note.content.to_lowercase().contains(needle_lower)
}

fn sort_by_recency(notes: &mut [Note]) {
    // Stable sort: ties keep original collection order.
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
