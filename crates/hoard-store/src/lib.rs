//! Content-addressed blob storage for the hoard asset store.
//!
//! Blobs are keyed by the canonical hex form of their [`AssetId`]. The store
//! is append-only: a blob is written once and never overwritten or mutated.
//!
//! # Backends
//!
//! All backends implement the [`BlobBackend`] trait:
//!
//! - [`InMemoryBackend`] -- `HashMap`-based backend for tests and embedding
//! - [`FsBackend`] -- sharded directory tree with temp-file-then-link writes
//! - [`WriteFailingBackend`] -- fault injection: every write fails
//!
//! # Design Rules
//!
//! 1. Writes are create-if-absent. A second write for a key is a no-op.
//! 2. Writes are all-or-nothing: a reader never observes a partial blob.
//! 3. Same-key operations serialize through [`KeyedLocks`] in [`ContentStore`];
//!    distinct keys never contend.
//! 4. Every key is re-validated as bare canonical hex before any backend
//!    access, so no key can address outside the storage root.
//! 5. All I/O errors are propagated, never silently ignored.
//!
//! [`AssetId`]: hoard_types::AssetId

pub mod error;
pub mod failing;
pub mod fs;
pub mod locks;
pub mod memory;
pub mod store;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use failing::WriteFailingBackend;
pub use fs::FsBackend;
pub use locks::{KeyGuard, KeyedLocks};
pub use memory::InMemoryBackend;
pub use store::ContentStore;
pub use traits::{ensure_canonical_key, BlobBackend, PutStatus};
