//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `jotpad_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use jotpad_core::db::open_db_in_memory;
use jotpad_core::{NotepadViewModel, NoteStore, SqliteNoteRepository};
use std::sync::Arc;

fn main() {
    println!("jotpad_core ping={}", jotpad_core::ping());
    println!("jotpad_core version={}", jotpad_core::core_version());

    // One in-memory create/persist cycle to validate store wiring without
    // touching the user's data.
    match open_db_in_memory() {
        Ok(conn) => {
            let store = Arc::new(NoteStore::new(SqliteNoteRepository::new(conn)));
            let view_model = NotepadViewModel::new(Arc::clone(&store));
            view_model.create_note();
            store.flush();
            println!("jotpad_core smoke_notes={}", store.snapshot().len());
        }
        Err(err) => println!("jotpad_core smoke_error={err}"),
    }
}
