//! Single-writer note store over a collection repository.
//!
//! # Responsibility
//! - Serialize upsert/delete read-modify-write cycles on one writer thread.
//! - Push the updated collection to every live subscriber after each
//!   successful mutation.
//!
//! # Invariants
//! - Commands are processed strictly in submission order.
//! - `upsert` refreshes `updated_at`; `delete` of a missing id is a no-op.
//! - A failed save is logged and not published; the previous collection
//!   remains observable.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::NoteRepository;
use log::{debug, error};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

enum StoreCommand {
    Upsert(Note),
    Delete(NoteId),
    Subscribe(Sender<Vec<Note>>),
    Flush(Sender<()>),
}

/// Durable, observable note collection with fire-and-forget mutations.
///
/// Constructed once at startup and injected into consumers; dropping the
/// store closes the command queue and joins the writer thread.
pub struct NoteStore {
    cmd_tx: Option<Sender<StoreCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl NoteStore {
    /// Creates a store over the given repository and starts its writer.
    ///
    /// The repository is moved into the writer thread; all persistence work
    /// happens there, off the caller's path.
    pub fn new(repo: impl NoteRepository + 'static) -> Self {
        let (cmd_tx, cmd_rx) = channel();
        let worker = thread::spawn(move || run_writer(repo, cmd_rx));
        Self {
            cmd_tx: Some(cmd_tx),
            worker: Some(worker),
        }
    }

    /// Inserts or replaces `note` by id, refreshing `updated_at`.
    ///
    /// Fire-and-forget: completion is observable only through the next
    /// published collection snapshot.
    pub fn upsert(&self, note: Note) {
        self.send(StoreCommand::Upsert(note));
    }

    /// Removes the note with `id` from the collection.
    ///
    /// A missing id is a no-op, not an error.
    pub fn delete(&self, id: NoteId) {
        self.send(StoreCommand::Delete(id));
    }

    /// Subscribes to collection snapshots.
    ///
    /// The current persisted collection is delivered immediately, then one
    /// snapshot per completed mutation.
    pub fn subscribe(&self) -> Receiver<Vec<Note>> {
        let (tx, rx) = channel();
        self.send(StoreCommand::Subscribe(tx));
        rx
    }

    /// Returns the current persisted collection.
    pub fn snapshot(&self) -> Vec<Note> {
        self.subscribe().recv().unwrap_or_default()
    }

    /// Blocks until every previously enqueued command has been processed.
    ///
    /// Intended for tests and embedder shutdown, never the interactive path.
    pub fn flush(&self) {
        let (tx, rx) = channel();
        self.send(StoreCommand::Flush(tx));
        let _ = rx.recv();
    }

    fn send(&self, command: StoreCommand) {
        if let Some(cmd_tx) = &self.cmd_tx {
            if cmd_tx.send(command).is_err() {
                debug!("event=store_command_dropped module=store status=writer_stopped");
            }
        }
    }
}

impl Drop for NoteStore {
    fn drop(&mut self) {
        // Closing the channel lets the writer drain remaining commands and exit.
        drop(self.cmd_tx.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_writer(repo: impl NoteRepository, cmd_rx: Receiver<StoreCommand>) {
    let mut subscribers: Vec<Sender<Vec<Note>>> = Vec::new();

    while let Ok(command) = cmd_rx.recv() {
        match command {
            StoreCommand::Upsert(note) => {
                if let Some(notes) = apply_upsert(&repo, note) {
                    publish(&mut subscribers, notes);
                }
            }
            StoreCommand::Delete(id) => {
                if let Some(notes) = apply_delete(&repo, id) {
                    publish(&mut subscribers, notes);
                }
            }
            StoreCommand::Subscribe(tx) => {
                let notes = load_or_empty(&repo);
                if tx.send(notes).is_ok() {
                    subscribers.push(tx);
                }
            }
            StoreCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

/// One full read-modify-write cycle for an upsert.
///
/// Returns the new collection on success, `None` when the save failed.
fn apply_upsert(repo: &impl NoteRepository, mut note: Note) -> Option<Vec<Note>> {
    let mut notes = load_or_empty(repo);
    note.touch();

    match notes.iter_mut().find(|existing| existing.id == note.id) {
        Some(existing) => *existing = note,
        None => notes.push(note),
    }

    save_or_log(repo, notes, "note_upsert")
}

fn apply_delete(repo: &impl NoteRepository, id: NoteId) -> Option<Vec<Note>> {
    let mut notes = load_or_empty(repo);
    notes.retain(|note| note.id != id);
    save_or_log(repo, notes, "note_delete")
}

fn save_or_log(
    repo: &impl NoteRepository,
    notes: Vec<Note>,
    event: &str,
) -> Option<Vec<Note>> {
    match repo.save_all(&notes) {
        Ok(()) => {
            debug!("event={event} module=store status=ok count={}", notes.len());
            Some(notes)
        }
        Err(err) => {
            error!("event=notes_persist_failed module=store op={event} error={err}");
            None
        }
    }
}

fn load_or_empty(repo: &impl NoteRepository) -> Vec<Note> {
    match repo.load_all() {
        Ok(notes) => notes,
        Err(err) => {
            error!("event=notes_load_failed module=store status=fallback_empty error={err}");
            Vec::new()
        }
    }
}

fn publish(subscribers: &mut Vec<Sender<Vec<Note>>>, notes: Vec<Note>) {
    subscribers.retain(|subscriber| subscriber.send(notes.clone()).is_ok());
}
