//! Durable note store with push-based observation.
//!
//! # Responsibility
//! - Own exclusive write access to the persisted note collection.
//! - Publish the full collection to subscribers after every mutation.
//!
//! # Invariants
//! - Mutations are serialized through a single writer; a read-modify-write
//!   cycle never interleaves with another.
//! - Subscribers observe collection snapshots in mutation order.

pub mod note_store;
