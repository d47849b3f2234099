//! Note-pad view model: intents in, presentation state out.
//!
//! # Responsibility
//! - Own the transient search/selection inputs.
//! - Subscribe once to the store and recompute the presentation state on
//!   every published collection or input change.
//! - Forward mutation intents to the store fire-and-forget.
//!
//! # Invariants
//! - Note records surface in the state only after the store publishes them;
//!   there is no optimistic echo of persisted data.
//! - Recomputation runs under one lock, so derivation order stays
//!   deterministic.

use crate::model::note::{Note, NoteId};
use crate::store::note_store::NoteStore;
use crate::view::state::{derive_state, NotepadState};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

/// View model over an injected note store.
///
/// One instance serves one presentation surface; the store outlives it.
pub struct NotepadViewModel {
    store: Arc<NoteStore>,
    inner: Arc<Mutex<VmInner>>,
}

struct VmInner {
    notes: Vec<Note>,
    search_query: String,
    selected_id: Option<NoteId>,
    state: NotepadState,
    observers: Vec<Sender<NotepadState>>,
}

impl VmInner {
    fn new(notes: Vec<Note>) -> Self {
        let state = derive_state(&notes, "", None);
        Self {
            notes,
            search_query: String::new(),
            selected_id: None,
            state,
            observers: Vec::new(),
        }
    }

    fn recompute(&mut self) {
        self.state = derive_state(&self.notes, &self.search_query, self.selected_id);
        let state = &self.state;
        self.observers
            .retain(|observer| observer.send(state.clone()).is_ok());
    }
}

impl NotepadViewModel {
    /// Subscribes to the store and seeds the state from its current
    /// collection.
    ///
    /// A listener thread applies every subsequent collection snapshot; it
    /// holds only a weak reference to the view-model state and exits when
    /// the view model is dropped or the store shuts down.
    pub fn new(store: Arc<NoteStore>) -> Self {
        let updates = store.subscribe();
        let initial = updates.recv().unwrap_or_default();
        let inner = Arc::new(Mutex::new(VmInner::new(initial)));

        let weak = Arc::downgrade(&inner);
        thread::spawn(move || {
            while let Ok(snapshot) = updates.recv() {
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
                guard.notes = snapshot;
                guard.recompute();
            }
        });

        Self { store, inner }
    }

    /// Returns the current presentation state.
    pub fn state(&self) -> NotepadState {
        self.lock().state.clone()
    }

    /// Subscribes to presentation state changes.
    ///
    /// The current state is delivered immediately, then one message per
    /// recomputation.
    pub fn subscribe(&self) -> Receiver<NotepadState> {
        let (tx, rx) = channel();
        let mut inner = self.lock();
        if tx.send(inner.state.clone()).is_ok() {
            inner.observers.push(tx);
        }
        rx
    }

    /// Updates the search query and recomputes immediately.
    pub fn on_search(&self, query: &str) {
        let mut inner = self.lock();
        inner.search_query = query.to_string();
        inner.recompute();
    }

    /// Updates the selection and recomputes immediately.
    pub fn select_note(&self, id: Option<NoteId>) {
        let mut inner = self.lock();
        inner.selected_id = id;
        inner.recompute();
    }

    /// Creates an empty note, selects it, and enqueues its persistence.
    ///
    /// The record appears in the state once the store publishes it.
    pub fn create_note(&self) -> Note {
        let note = Note::new();
        {
            let mut inner = self.lock();
            inner.selected_id = Some(note.id);
            inner.recompute();
        }
        self.store.upsert(note.clone());
        note
    }

    /// Enqueues an upsert of `note`; the store refreshes `updated_at`.
    pub fn update_note(&self, note: Note) {
        self.store.upsert(note);
    }

    /// Enqueues deletion of `id`, clearing the selection when it was
    /// the selected note.
    pub fn delete_note(&self, id: NoteId) {
        {
            let mut inner = self.lock();
            if inner.selected_id == Some(id) {
                inner.selected_id = None;
                inner.recompute();
            }
        }
        self.store.delete(id);
    }

    fn lock(&self) -> MutexGuard<'_, VmInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
