//! Key-value blob persistence.
//!
//! # Responsibility
//! - Define the storage contract the entity store persists through.
//! - Keep SQLite details out of store/service code.
//!
//! # Invariants
//! - Blob values are opaque UTF-8 text; encoding belongs to callers.
//! - Reading an absent key is `Ok(None)`, never an error.

pub mod blob_repo;
