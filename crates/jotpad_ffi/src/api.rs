//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The store and view model are constructed once per process and owned
//!   here; repeated opens with the same path are idempotent.

use jotpad_core::db::open_db;
use jotpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Note, NotepadState, NotepadViewModel, NoteStore, SqliteNoteRepository,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use uuid::Uuid;

static RUNTIME: OnceLock<Mutex<Option<NotepadRuntime>>> = OnceLock::new();

struct NotepadRuntime {
    db_path: PathBuf,
    store: Arc<NoteStore>,
    view_model: NotepadViewModel,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return an
///   error message.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Note record crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDto {
    /// Stable note ID in string form.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Last-modified time in epoch milliseconds.
    pub updated_at: i64,
}

impl From<&Note> for NoteDto {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title.clone(),
            content: note.content.clone(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Derived presentation state crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotepadStateDto {
    /// Full collection, sorted by recency.
    pub notes: Vec<NoteDto>,
    /// Notes matching the search query, sorted by recency.
    pub filtered_notes: Vec<NoteDto>,
    /// Note shown in the editor pane, when any.
    pub active_note: Option<NoteDto>,
    /// Trimmed search query the lists were derived from.
    pub search_query: String,
}

impl From<NotepadState> for NotepadStateDto {
    fn from(state: NotepadState) -> Self {
        Self {
            notes: state.notes.iter().map(NoteDto::from).collect(),
            filtered_notes: state.filtered_notes.iter().map(NoteDto::from).collect(),
            active_note: state.active_note.as_ref().map(NoteDto::from),
            search_query: state.search_query,
        }
    }
}

/// Generic action response envelope for intent calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation was accepted.
    pub ok: bool,
    /// Optional note ID the operation refers to.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Opens the note database and wires up the store and view model.
///
/// # FFI contract
/// - First call constructs the process-wide runtime.
/// - Repeat calls with the same path are idempotent; a different path is
///   rejected (the store owns exclusive write access for its lifetime).
#[flutter_rust_bridge::frb(sync)]
pub fn open_notepad(db_path: String) -> ActionResponse {
    let requested = PathBuf::from(db_path);
    let mut slot = runtime_slot().lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(runtime) = slot.as_ref() {
        if runtime.db_path == requested {
            return ActionResponse::success("notepad already open", None);
        }
        return ActionResponse::failure(format!(
            "notepad already open at `{}`; refusing to switch to `{}`",
            runtime.db_path.display(),
            requested.display()
        ));
    }

    let conn = match open_db(&requested) {
        Ok(conn) => conn,
        Err(err) => return ActionResponse::failure(format!("failed to open database: {err}")),
    };

    let store = Arc::new(NoteStore::new(SqliteNoteRepository::new(conn)));
    let view_model = NotepadViewModel::new(Arc::clone(&store));
    *slot = Some(NotepadRuntime {
        db_path: requested,
        store,
        view_model,
    });

    ActionResponse::success("notepad opened", None)
}

/// Returns the current derived presentation state.
///
/// Returns `None` until [`open_notepad`] has succeeded.
#[flutter_rust_bridge::frb(sync)]
pub fn notepad_state() -> Option<NotepadStateDto> {
    with_runtime(|runtime| runtime.view_model.state().into())
}

/// Updates the search query; the state recomputes immediately.
#[flutter_rust_bridge::frb(sync)]
pub fn on_search(query: String) -> ActionResponse {
    with_runtime(|runtime| {
        runtime.view_model.on_search(&query);
        ActionResponse::success("search updated", None)
    })
    .unwrap_or_else(not_open)
}

/// Selects a note by ID, or clears the selection with `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn select_note(note_id: Option<String>) -> ActionResponse {
    let parsed = match note_id.as_deref() {
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => return ActionResponse::failure(format!("invalid note id `{raw}`")),
        },
        None => None,
    };

    with_runtime(|runtime| {
        runtime.view_model.select_note(parsed);
        ActionResponse::success("selection updated", parsed.map(|id| id.to_string()))
    })
    .unwrap_or_else(not_open)
}

/// Creates an empty note, selects it, and enqueues its persistence.
#[flutter_rust_bridge::frb(sync)]
pub fn create_note() -> ActionResponse {
    with_runtime(|runtime| {
        let note = runtime.view_model.create_note();
        ActionResponse::success("note created", Some(note.id.to_string()))
    })
    .unwrap_or_else(not_open)
}

/// Enqueues an update of the given note; `updated_at` is refreshed by the
/// store on write.
#[flutter_rust_bridge::frb(sync)]
pub fn update_note(note: NoteDto) -> ActionResponse {
    let id = match Uuid::parse_str(&note.id) {
        Ok(id) => id,
        Err(_) => return ActionResponse::failure(format!("invalid note id `{}`", note.id)),
    };

    with_runtime(|runtime| {
        runtime.view_model.update_note(Note {
            id,
            title: note.title.clone(),
            content: note.content.clone(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        });
        ActionResponse::success("note update enqueued", Some(note.id.clone()))
    })
    .unwrap_or_else(not_open)
}

/// Enqueues deletion of a note; a missing id is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_note(note_id: String) -> ActionResponse {
    let id = match Uuid::parse_str(&note_id) {
        Ok(id) => id,
        Err(_) => return ActionResponse::failure(format!("invalid note id `{note_id}`")),
    };

    with_runtime(|runtime| {
        runtime.view_model.delete_note(id);
        ActionResponse::success("note delete enqueued", Some(note_id.clone()))
    })
    .unwrap_or_else(not_open)
}

/// Blocks until all enqueued mutations are persisted.
///
/// Intended as an embedder shutdown hook, not for the interactive path.
#[flutter_rust_bridge::frb(sync)]
pub fn flush_store() -> ActionResponse {
    with_runtime(|runtime| {
        runtime.store.flush();
        ActionResponse::success("pending writes persisted", None)
    })
    .unwrap_or_else(not_open)
}

fn runtime_slot() -> &'static Mutex<Option<NotepadRuntime>> {
    RUNTIME.get_or_init(|| Mutex::new(None))
}

fn with_runtime<T>(f: impl FnOnce(&NotepadRuntime) -> T) -> Option<T> {
    let slot = runtime_slot().lock().unwrap_or_else(PoisonError::into_inner);
    slot.as_ref().map(f)
}

fn not_open() -> ActionResponse {
    ActionResponse::failure("notepad is not open; call open_notepad first")
}
