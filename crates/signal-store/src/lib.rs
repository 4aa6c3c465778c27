//! Durable Store - JSON-file persistence for the signal collections.
//!
//! Two ordered collections (`pending`, `approved`) are kept as
//! pretty-printed JSON arrays under a configured storage directory. Writes
//! replace the whole file; reads that fail (missing file, corrupt content)
//! degrade to an empty collection instead of surfacing an error, favoring
//! read availability over strict consistency.
//!
//! This crate owns the on-disk representation only. Serializing concurrent
//! writers is the caller's job (the moderation engine holds a single write
//! lock across every read-modify-write cycle).

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod errors;
pub mod store;

pub use errors::StoreError;
pub use store::{Collection, FileStore};
