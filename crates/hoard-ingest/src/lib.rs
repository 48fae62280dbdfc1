//! Ingest coordination and retrieval for the hoard asset store.
//!
//! [`IngestCoordinator`] turns an upload into exactly one [`IngestOutcome`]:
//!
//! 1. identifier syntax -> `BadIdentifier`
//! 2. size -> `SizeExceeded`
//! 3. format policy -> `FormatBlocked` (nothing hashed, nothing stored)
//! 4. SHA-1 verification -> `HashMismatch`
//! 5. existence check -> `AlreadyExists` (no write)
//! 6. create-if-absent write -> `Stored`, or `StorageFailure` with no blob
//!
//! [`RetrievalGateway`] resolves a caller-supplied id back to bytes, refusing
//! malformed ids before the store is touched.

pub mod catalog;
pub mod coordinator;
pub mod gateway;
pub mod outcome;
pub mod request;

pub use catalog::{AssetCatalog, AssetRecord, InMemoryCatalog};
pub use coordinator::IngestCoordinator;
pub use gateway::{RetrievalGateway, RetrieveError};
pub use outcome::{IngestOutcome, OutcomeClass};
pub use request::IngestRequest;
