//! Foundation types for the hoard asset store.
//!
//! Every other hoard crate depends on `hoard-types`.
//!
//! # Key Types
//!
//! - [`AssetId`]: Canonical 40-character lowercase hex name of a blob's SHA-1 digest
//! - [`AssetFormat`]: Format tag inferred from a blob's leading bytes
//! - [`CallerIdentity`]: Opaque, externally verified uploader identity
//! - [`Platform`]: Client platform the caller connected from

pub mod error;
pub mod format;
pub mod id;
pub mod identity;

pub use error::TypeError;
pub use format::AssetFormat;
pub use id::AssetId;
pub use identity::{CallerIdentity, Platform};
