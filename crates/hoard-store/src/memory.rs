use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;

use crate::error::{StoreError, StoreResult};
use crate::traits::{ensure_canonical_key, BlobBackend, PutStatus};

/// In-memory, HashMap-based blob backend.
///
/// Intended for tests and embedding. Blobs are held as `Bytes`, so reads are
/// reference-counted clones rather than copies. Keys are validated exactly as
/// [`crate::FsBackend`] validates them.
pub struct InMemoryBackend {
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the backend is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|blob| blob.len() as u64)
            .sum()
    }

    /// Sorted list of all stored keys.
    pub fn keys(&self) -> Vec<String> {
        let map = self.blobs.read().expect("lock poisoned");
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobBackend for InMemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        ensure_canonical_key(key)?;
        let map = self.blobs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.contains_key(key))
    }

    fn read(&self, key: &str) -> StoreResult<Option<Bytes>> {
        ensure_canonical_key(key)?;
        let map = self.blobs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn write_if_absent(&self, key: &str, data: &[u8]) -> StoreResult<PutStatus> {
        ensure_canonical_key(key)?;
        let mut map = self.blobs.write().map_err(|_| StoreError::Poisoned)?;
        if map.contains_key(key) {
            return Ok(PutStatus::AlreadyExists);
        }
        map.insert(key.to_string(), Bytes::copy_from_slice(data));
        Ok(PutStatus::Stored)
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("blob_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "39c988f421c2a4adff4f3c81b0bb8291a41b99fb";

    #[test]
    fn write_and_read() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.write_if_absent(KEY, b"TEX a").unwrap(), PutStatus::Stored);
        assert_eq!(backend.read(KEY).unwrap().unwrap(), Bytes::from_static(b"TEX a"));
        assert!(backend.exists(KEY).unwrap());
    }

    #[test]
    fn second_write_is_a_no_op() {
        let backend = InMemoryBackend::new();
        backend.write_if_absent(KEY, b"TEX a").unwrap();
        assert_eq!(
            backend.write_if_absent(KEY, b"something else").unwrap(),
            PutStatus::AlreadyExists
        );
        assert_eq!(backend.read(KEY).unwrap().unwrap(), Bytes::from_static(b"TEX a"));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn missing_blob_reads_none() {
        let backend = InMemoryBackend::new();
        assert!(backend.read(KEY).unwrap().is_none());
        assert!(!backend.exists(KEY).unwrap());
    }

    #[test]
    fn len_total_bytes_and_keys() {
        let backend = InMemoryBackend::default();
        assert!(backend.is_empty());
        let b = "b".repeat(40);
        let a = "a".repeat(40);
        backend.write_if_absent(&b, b"12345").unwrap();
        backend.write_if_absent(&a, b"123456789").unwrap();
        assert_eq!(backend.len(), 2);
        assert_eq!(backend.total_bytes(), 14);
        assert_eq!(backend.keys(), vec![a, b]);
    }

    #[test]
    fn non_canonical_keys_are_rejected() {
        let backend = InMemoryBackend::new();
        for key in ["aa", "../rpc.json", KEY.to_ascii_uppercase().as_str()] {
            assert!(matches!(backend.write_if_absent(key, b"x"), Err(StoreError::InvalidKey(_))));
            assert!(matches!(backend.exists(key), Err(StoreError::InvalidKey(_))));
            assert!(matches!(backend.read(key), Err(StoreError::InvalidKey(_))));
        }
        assert!(backend.is_empty());
    }

    #[test]
    fn debug_format() {
        let backend = InMemoryBackend::new();
        let debug = format!("{backend:?}");
        assert!(debug.contains("InMemoryBackend"));
        assert!(debug.contains("blob_count"));
    }
}
