//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the store.
//! - Own the wire field layout of the persisted JSON payload.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is set once at creation; `updated_at` is refreshed by the
//!   store on every mutation.
//! - Unknown fields in stored records are ignored on decode; all fields are
//!   written on every encode.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Canonical persisted note record.
///
/// Serialized field names follow the stored payload schema (`createdAt`,
/// `updatedAt`), while the Rust shape keeps snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable global ID, serialized as a hyphenated UUID string.
    pub id: NoteId,
    /// Display title. May be empty.
    pub title: String,
    /// Note body. May be empty.
    pub content: String,
    /// Creation time in epoch milliseconds. Immutable after creation.
    pub created_at: i64,
    /// Last-modified time in epoch milliseconds.
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty note with a generated stable ID and fresh timestamps.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4(), "", "")
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by decode/import paths and tests where identity already exists.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at` to the current wall clock.
    pub fn touch(&mut self) {
        self.updated_at = now_epoch_ms();
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// The only clock used by the crate; a pre-epoch system clock saturates to 0.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}

#[cfg(test)]
mod tests {
    use super::{now_epoch_ms, Note};

    #[test]
    fn new_note_is_empty_with_fresh_identity() {
        let note = Note::new();
        assert!(!note.id.is_nil());
        assert!(note.title.is_empty());
        assert!(note.content.is_empty());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn touch_only_moves_updated_at() {
        let mut note = Note::new();
        let created = note.created_at;
        note.updated_at = 0;
        note.touch();
        assert_eq!(note.created_at, created);
        assert!(note.updated_at >= created);
    }

    #[test]
    fn now_epoch_ms_is_monotonic_enough() {
        let first = now_epoch_ms();
        let second = now_epoch_ms();
        assert!(second >= first);
        assert!(first > 1_600_000_000_000);
    }
}
