//! Content hashing for the hoard asset store.
//!
//! Asset identifiers are plain SHA-1 digests of the uploaded bytes, matching
//! the names game clients compute before uploading. No domain separation is
//! applied; the id must be reproducible by any client.

pub mod hasher;

pub use hasher::{ContentHasher, HashMismatch, HashVerifier};
