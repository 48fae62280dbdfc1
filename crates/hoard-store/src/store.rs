use std::sync::Arc;

use bytes::Bytes;
use hoard_types::AssetId;

use crate::error::StoreResult;
use crate::locks::KeyedLocks;
use crate::traits::{ensure_canonical_key, BlobBackend, PutStatus};

/// Content-addressed blob store over a pluggable [`BlobBackend`].
///
/// Same-id writes are serialized twice over: the store holds a per-id lock
/// for the whole check-then-write sequence, and the backend write itself is
/// create-if-absent. The first guards racing callers in this process, the
/// second guards other processes sharing the backend.
///
/// The store never checks that bytes hash to their id; callers verify before
/// calling [`Self::put`].
pub struct ContentStore {
    backend: Arc<dyn BlobBackend>,
    locks: KeyedLocks,
}

impl ContentStore {
    pub fn new(backend: Arc<dyn BlobBackend>) -> Self {
        Self {
            backend,
            locks: KeyedLocks::new(),
        }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &Arc<dyn BlobBackend> {
        &self.backend
    }

    /// Check whether a blob is stored under `id`.
    pub fn exists(&self, id: &AssetId) -> StoreResult<bool> {
        let key = Self::key(id)?;
        self.backend.exists(&key)
    }

    /// Store `data` under `id` unless a blob is already present.
    ///
    /// Returns `AlreadyExists` both when the blob was present beforehand and
    /// when a concurrent writer won the race.
    pub fn put(&self, id: &AssetId, data: &[u8]) -> StoreResult<PutStatus> {
        let key = Self::key(id)?;
        let _guard = self.locks.lock(&key);

        if self.backend.exists(&key)? {
            tracing::debug!(asset = %key, "blob already present, skipping write");
            return Ok(PutStatus::AlreadyExists);
        }

        let status = self.backend.write_if_absent(&key, data).map_err(|e| {
            tracing::warn!(asset = %key, backend = self.backend.name(), error = %e, "blob write failed");
            e
        })?;
        tracing::debug!(asset = %key, bytes = data.len(), ?status, "blob write finished");
        Ok(status)
    }

    /// Read the blob stored under `id`. Returns `Ok(None)` if absent.
    pub fn get(&self, id: &AssetId) -> StoreResult<Option<Bytes>> {
        let key = Self::key(id)?;
        self.backend.read(&key)
    }

    fn key(id: &AssetId) -> StoreResult<String> {
        let key = id.to_hex();
        ensure_canonical_key(&key)?;
        Ok(key)
    }
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::failing::WriteFailingBackend;
    use crate::fs::FsBackend;
    use crate::memory::InMemoryBackend;
    use hoard_crypto::ContentHasher;
    use std::thread;

    fn memory_store() -> (Arc<InMemoryBackend>, ContentStore) {
        let backend = Arc::new(InMemoryBackend::new());
        let store = ContentStore::new(backend.clone());
        (backend, store)
    }

    #[test]
    fn put_then_get_returns_exact_bytes() {
        let (_backend, store) = memory_store();
        let id = ContentHasher::hash(b"TEX a");
        assert_eq!(store.put(&id, b"TEX a").unwrap(), PutStatus::Stored);
        assert!(store.exists(&id).unwrap());
        assert_eq!(store.get(&id).unwrap().unwrap(), Bytes::from_static(b"TEX a"));
    }

    #[test]
    fn second_put_reports_already_exists() {
        let (backend, store) = memory_store();
        let id = ContentHasher::hash(b"TEX a");
        store.put(&id, b"TEX a").unwrap();
        assert_eq!(store.put(&id, b"TEX a").unwrap(), PutStatus::AlreadyExists);
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn get_missing_is_none() {
        let (_backend, store) = memory_store();
        let id = ContentHasher::hash(b"never stored");
        assert!(store.get(&id).unwrap().is_none());
        assert!(!store.exists(&id).unwrap());
    }

    #[test]
    fn failed_write_leaves_no_blob() {
        let store = ContentStore::new(Arc::new(WriteFailingBackend::new()));
        let id = ContentHasher::hash(b"TEX a");
        assert!(matches!(store.put(&id, b"TEX a"), Err(StoreError::Backend { .. })));
        assert!(!store.exists(&id).unwrap());
        assert!(store.get(&id).unwrap().is_none());
    }

    #[test]
    fn racing_puts_store_exactly_once() {
        let (backend, store) = memory_store();
        let store = Arc::new(store);
        let id = ContentHasher::hash(b"TEX race");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.put(&id, b"TEX race").unwrap())
            })
            .collect();
        let statuses: Vec<PutStatus> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();

        let stored = statuses.iter().filter(|s| **s == PutStatus::Stored).count();
        assert_eq!(stored, 1);
        assert_eq!(statuses.len() - stored, 15);
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn racing_puts_on_two_fs_stores_sharing_a_root() {
        let dir = tempfile::tempdir().unwrap();
        let a = Arc::new(ContentStore::new(Arc::new(FsBackend::open(dir.path()).unwrap())));
        let b = Arc::new(ContentStore::new(Arc::new(FsBackend::open(dir.path()).unwrap())));
        let data = vec![7u8; 64 * 1024];
        let id = ContentHasher::hash(&data);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = if i % 2 == 0 { Arc::clone(&a) } else { Arc::clone(&b) };
                let data = data.clone();
                thread::spawn(move || store.put(&id, &data).unwrap())
            })
            .collect();
        let stored = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .filter(|s| *s == PutStatus::Stored)
            .count();

        assert_eq!(stored, 1);
        assert_eq!(a.get(&id).unwrap().unwrap().as_ref(), data.as_slice());
    }

    #[test]
    fn debug_names_backend() {
        let (_backend, store) = memory_store();
        assert!(format!("{store:?}").contains("memory"));
    }
}
