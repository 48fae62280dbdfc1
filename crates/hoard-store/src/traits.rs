use bytes::Bytes;
use hoard_types::AssetId;

use crate::error::{StoreError, StoreResult};

/// Result of a create-if-absent write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PutStatus {
    /// This call made the blob durable.
    Stored,
    /// A blob was already present under the key; nothing was written.
    AlreadyExists,
}

/// Pluggable blob backend: key = canonical asset id string, value = bytes.
///
/// All implementations must satisfy these invariants:
/// - `write_if_absent` is atomic create-if-absent. Of any number of racing
///   writers for one key, at most one returns `Stored`.
/// - A failed or interrupted write leaves nothing readable under the key.
/// - Stored values are never replaced.
/// - All I/O errors are propagated, never silently ignored.
pub trait BlobBackend: Send + Sync {
    /// Short backend name for logs and errors.
    fn name(&self) -> &'static str;

    /// Check whether a blob exists under `key`.
    fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Read a blob. Returns `Ok(None)` if it does not exist.
    fn read(&self, key: &str) -> StoreResult<Option<Bytes>>;

    /// Write `data` under `key` unless a blob is already present.
    fn write_if_absent(&self, key: &str, data: &[u8]) -> StoreResult<PutStatus>;
}

/// Reject any key that is not a bare canonical asset identifier.
pub fn ensure_canonical_key(key: &str) -> StoreResult<()> {
    if AssetId::is_canonical(key) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
