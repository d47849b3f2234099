//! Presentation state derivation and the note-pad view model.
//!
//! # Responsibility
//! - Combine the store's observable collection with transient search and
//!   selection inputs into one derived presentation state.
//! - Expose the mutation intents consumed by a rendering layer.
//!
//! # Invariants
//! - Derived state is recomputed in full on every input change, never
//!   incrementally patched.
//! - Search and selection state live only in memory and are never persisted.

pub mod model;
pub mod state;
