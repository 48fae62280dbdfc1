use bytes::Bytes;

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryBackend;
use crate::traits::{ensure_canonical_key, BlobBackend, PutStatus};

/// Fault-injection backend: reads behave like [`InMemoryBackend`], every
/// write fails.
#[derive(Debug, Default)]
pub struct WriteFailingBackend {
    inner: InMemoryBackend,
}

impl WriteFailingBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobBackend for WriteFailingBackend {
    fn name(&self) -> &'static str {
        "write-failing"
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        self.inner.exists(key)
    }

    fn read(&self, key: &str) -> StoreResult<Option<Bytes>> {
        self.inner.read(key)
    }

    fn write_if_absent(&self, key: &str, _data: &[u8]) -> StoreResult<PutStatus> {
        ensure_canonical_key(key)?;
        Err(StoreError::backend(
            self.name(),
            format!("injected write failure for {key}"),
        ))
    }
}
