//! Note collection repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Load and save the full note collection under one durable key.
//! - Keep SQL and JSON payload details inside the persistence boundary.
//!
//! # Invariants
//! - A missing key loads as the empty collection.
//! - A payload that fails to decode loads as the empty collection and is
//!   reported through a warning log, never through an error.
//! - Unknown fields in stored records are ignored on decode.

use crate::db::DbError;
use crate::model::note::Note;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Durable key holding the serialized note collection.
pub const NOTES_KEY: &str = "notes_json";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for collection persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode note collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for whole-collection persistence.
pub trait NoteRepository: Send {
    /// Loads the latest persisted collection.
    fn load_all(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the persisted collection with `notes`.
    fn save_all(&self, notes: &[Note]) -> RepoResult<()>;
}

/// SQLite-backed collection repository over the `kv` table.
pub struct SqliteNoteRepository {
    conn: Connection,
}

impl SqliteNoteRepository {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository {
    fn load_all(&self) -> RepoResult<Vec<Note>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1;",
                [NOTES_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            Some(raw) => Ok(decode_collection(&raw)),
            None => Ok(Vec::new()),
        }
    }

    fn save_all(&self, notes: &[Note]) -> RepoResult<()> {
        let payload = serde_json::to_string(notes).map_err(RepoError::Encode)?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![NOTES_KEY, payload],
        )?;
        Ok(())
    }
}

/// Decodes the stored payload, substituting the empty collection on failure.
///
/// The raw bytes stay in place on disk until the next successful save.
fn decode_collection(raw: &str) -> Vec<Note> {
    match serde_json::from_str::<Vec<Note>>(raw) {
        Ok(notes) => notes,
        Err(err) => {
            warn!("event=notes_decode_failed module=repo status=fallback_empty error={err}");
            Vec::new()
        }
    }
}
