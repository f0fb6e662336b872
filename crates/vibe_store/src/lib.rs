//! # vibe_store
//!
//! Saved trails keyed by user identity, stored as JSON files. The engine in
//! `vibe_core` does not know about this crate.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{FileTrailStore, SavedTrail};
