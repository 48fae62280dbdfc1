use std::sync::Arc;

use bytes::Bytes;
use hoard_gate::FormatTable;
use hoard_store::{ContentStore, StoreError};
use hoard_types::{AssetId, TypeError};

use crate::catalog::{AssetCatalog, AssetRecord};
use crate::coordinator::IngestCoordinator;

/// Errors from the retrieval path.
#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    /// The requested id is not a canonical asset identifier.
    #[error("invalid asset identifier: {0}")]
    BadIdentifier(#[from] TypeError),

    /// No blob is stored under the id.
    #[error("asset not found: {0}")]
    NotFound(AssetId),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Resolves caller-supplied ids back to stored bytes.
pub struct RetrievalGateway {
    store: Arc<ContentStore>,
    catalog: Arc<dyn AssetCatalog>,
    table: Arc<FormatTable>,
}

impl RetrievalGateway {
    /// A gateway over `store`. `describe` answers from `catalog`, so pass the
    /// catalog the ingest side records into; blobs without a record are
    /// described by sniffing.
    pub fn new(
        store: Arc<ContentStore>,
        catalog: Arc<dyn AssetCatalog>,
        table: Arc<FormatTable>,
    ) -> Self {
        Self {
            store,
            catalog,
            table,
        }
    }

    /// A gateway reading the same store, catalog and table as `coordinator`.
    pub fn for_coordinator(coordinator: &IngestCoordinator) -> Self {
        Self::new(
            Arc::clone(coordinator.store()),
            Arc::clone(coordinator.catalog()),
            Arc::clone(coordinator.validator().table()),
        )
    }

    /// Fetch the exact bytes stored under `raw_id`.
    ///
    /// The id is lowercased and strictly validated before the store is
    /// consulted; anything else (wrong length, `/`, `..`, escapes) fails with
    /// `BadIdentifier` without any backend access.
    pub fn retrieve(&self, raw_id: &str) -> Result<Bytes, RetrieveError> {
        let id = Self::resolve(raw_id)?;
        match self.store.get(&id)? {
            Some(data) => {
                tracing::debug!(asset = %id, bytes = data.len(), "asset retrieved");
                Ok(data)
            }
            None => Err(RetrieveError::NotFound(id)),
        }
    }

    /// Metadata for the asset stored under `raw_id`.
    ///
    /// Falls back to sniffing the stored bytes when the catalog has no entry,
    /// e.g. for blobs written before the process started.
    pub fn describe(&self, raw_id: &str) -> Result<AssetRecord, RetrieveError> {
        let id = Self::resolve(raw_id)?;
        if let Some(record) = self.catalog.get(&id) {
            return Ok(record);
        }
        let data = self.store.get(&id)?.ok_or(RetrieveError::NotFound(id))?;
        Ok(AssetRecord {
            id,
            format: self.table.sniff(&data).format,
            size: data.len(),
            uploader: None,
            platform: None,
            uploaded_at: None,
        })
    }

    fn resolve(raw_id: &str) -> Result<AssetId, RetrieveError> {
        AssetId::canonicalize(raw_id).map_err(|e| {
            tracing::debug!(requested = %raw_id.escape_debug(), error = %e, "rejected asset id");
            RetrieveError::BadIdentifier(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::outcome::IngestOutcome;
    use crate::request::IngestRequest;
    use hoard_crypto::ContentHasher;
    use hoard_gate::ValidatorConfig;
    use hoard_store::{BlobBackend, FsBackend, InMemoryBackend};
    use hoard_types::{AssetFormat, CallerIdentity};

    fn pair(backend: Arc<dyn BlobBackend>) -> (IngestCoordinator, RetrievalGateway) {
        let coordinator = IngestCoordinator::from_config(backend, &ValidatorConfig::default());
        let gateway = RetrievalGateway::for_coordinator(&coordinator);
        (coordinator, gateway)
    }

    fn ingest(coordinator: &IngestCoordinator, payload: &[u8]) -> IngestOutcome {
        let id = ContentHasher::hash(payload).to_hex();
        coordinator.ingest(&IngestRequest::new(CallerIdentity::user("alice"), id, payload.to_vec()))
    }

    #[test]
    fn retrieves_exact_bytes() {
        let (coordinator, gateway) = pair(Arc::new(InMemoryBackend::new()));
        ingest(&coordinator, b"TEX a");
        let data = gateway.retrieve("39c988f421c2a4adff4f3c81b0bb8291a41b99fb").unwrap();
        assert_eq!(data.as_ref(), b"TEX a");
    }

    #[test]
    fn uppercase_request_is_canonicalized() {
        let (coordinator, gateway) = pair(Arc::new(InMemoryBackend::new()));
        ingest(&coordinator, b"TEX a");
        let data = gateway.retrieve("39C988F421C2A4ADFF4F3C81B0BB8291A41B99FB").unwrap();
        assert_eq!(data.as_ref(), b"TEX a");
    }

    #[test]
    fn malformed_ids_are_bad_identifiers() {
        let (_coordinator, gateway) = pair(Arc::new(InMemoryBackend::new()));
        for raw in ["asdf", "../rpc.json", "..%2Frpc.json", "", "39c988f421c2a4adff4f3c81b0bb8291a41b99fb/"] {
            assert!(
                matches!(gateway.retrieve(raw), Err(RetrieveError::BadIdentifier(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn traversal_cannot_escape_fs_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rpc.json"), b"{\"secret\":true}").unwrap();
        let backend = FsBackend::open(dir.path().join("assets")).unwrap();
        let (_coordinator, gateway) = pair(Arc::new(backend));
        assert!(matches!(
            gateway.retrieve("../rpc.json"),
            Err(RetrieveError::BadIdentifier(_))
        ));
    }

    #[test]
    fn absent_id_is_not_found() {
        let (_coordinator, gateway) = pair(Arc::new(InMemoryBackend::new()));
        let err = gateway.retrieve("6e4d252f247e3aa99ef846df8c65493393e79f4f").unwrap_err();
        assert!(matches!(err, RetrieveError::NotFound(_)));
    }

    #[test]
    fn describe_uses_catalog() {
        let (coordinator, gateway) = pair(Arc::new(InMemoryBackend::new()));
        ingest(&coordinator, b"TEX a");
        let record = gateway.describe("39c988f421c2a4adff4f3c81b0bb8291a41b99fb").unwrap();
        assert_eq!(record.uploader.as_deref(), Some("alice"));
        assert_eq!(record.format, AssetFormat::Texture);
    }

    #[test]
    fn describe_falls_back_to_sniffing() {
        let backend = Arc::new(InMemoryBackend::new());
        let id = ContentHasher::hash(b"MSHb mesh");
        backend.write_if_absent(&id.to_hex(), b"MSHb mesh").unwrap();
        let (_coordinator, gateway) = pair(backend);
        let record = gateway.describe(&id.to_hex()).unwrap();
        assert_eq!(record.format, AssetFormat::Mesh);
        assert_eq!(record.size, 9);
        assert!(record.uploader.is_none());
    }

    #[test]
    fn gateway_shares_catalog_passed_at_construction() {
        let store = Arc::new(ContentStore::new(Arc::new(InMemoryBackend::new())));
        let catalog: Arc<dyn AssetCatalog> = Arc::new(InMemoryCatalog::new());
        let table = Arc::new(FormatTable::default());
        let coordinator = IngestCoordinator::new(Arc::clone(&store), Arc::clone(&table), 5_000_000)
            .with_catalog(Arc::clone(&catalog));
        let gateway = RetrievalGateway::new(store, catalog, table);

        ingest(&coordinator, b"TEX a");
        let record = gateway.describe("39c988f421c2a4adff4f3c81b0bb8291a41b99fb").unwrap();
        assert_eq!(record.uploader.as_deref(), Some("alice"));
        assert!(record.uploaded_at.is_some());
    }

    #[test]
    fn describe_absent_is_not_found() {
        let (_coordinator, gateway) = pair(Arc::new(InMemoryBackend::new()));
        assert!(matches!(
            gateway.describe("6e4d252f247e3aa99ef846df8c65493393e79f4f"),
            Err(RetrieveError::NotFound(_))
        ));
    }
}
