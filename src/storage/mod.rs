//! Storage Module
//!
//! File-backed record persistence, one JSON-array file per entity.
//!
//! ## Responsibilities
//! - Create the backing file for a new entity
//! - Read the whole collection, or the record with a given id
//! - Full read-modify-write for add / update / delete
//! - Replace the file atomically (temp file + rename) when configured
//!
//! ## File Format
//! ```text
//! [
//!   {
//!     "name": "Yaron",
//!     "age": 35,
//!     "id": "5d0c8a3e-...",
//!     "creationTime": 1700000000
//!   },
//!   ... (one object per record, insertion order)
//! ]
//! ```
//!
//! There is no append-only log and no in-place patching: every mutation
//! re-encodes and overwrites the whole file.

mod codec;
mod store;

pub use codec::{decode_records, encode_records};
pub use store::RecordStore;
