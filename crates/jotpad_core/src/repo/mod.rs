//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection data access contract used by the store.
//! - Isolate SQLite and payload-encoding details from store orchestration.
//!
//! # Invariants
//! - The collection is read and written as one value; there are no partial
//!   or row-level note writes.
//! - Decode failures of the persisted payload degrade to the empty
//!   collection instead of propagating as errors.

pub mod note_repo;
