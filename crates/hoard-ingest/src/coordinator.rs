use std::sync::Arc;

use chrono::Utc;
use hoard_crypto::HashVerifier;
use hoard_gate::{FormatTable, Rejection, UploadValidator, ValidatorConfig};
use hoard_store::{BlobBackend, ContentStore, PutStatus};

use crate::catalog::{AssetCatalog, AssetRecord, InMemoryCatalog};
use crate::outcome::IngestOutcome;
use crate::request::IngestRequest;

/// Orchestrates validation, verification, dedup and persistence.
///
/// The store and the format table are injected; the coordinator holds no
/// other shared state. A call that ends in anything but `Stored` leaves the
/// store exactly as it found it.
pub struct IngestCoordinator {
    validator: UploadValidator,
    store: Arc<ContentStore>,
    catalog: Arc<dyn AssetCatalog>,
}

impl IngestCoordinator {
    pub fn new(store: Arc<ContentStore>, table: Arc<FormatTable>, max_asset_size: usize) -> Self {
        Self {
            validator: UploadValidator::with_table(max_asset_size, table),
            store,
            catalog: Arc::new(InMemoryCatalog::new()),
        }
    }

    /// Convenience constructor wiring a fresh store over `backend`.
    pub fn from_config(backend: Arc<dyn BlobBackend>, config: &ValidatorConfig) -> Self {
        Self::new(
            Arc::new(ContentStore::new(backend)),
            Arc::new(FormatTable::from_config(config)),
            config.max_asset_size,
        )
    }

    /// Replace the metadata catalog.
    pub fn with_catalog(mut self, catalog: Arc<dyn AssetCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn store(&self) -> &Arc<ContentStore> {
        &self.store
    }

    pub fn catalog(&self) -> &Arc<dyn AssetCatalog> {
        &self.catalog
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    /// Run one upload through the pipeline.
    pub fn ingest(&self, request: &IngestRequest) -> IngestOutcome {
        let outcome = self.run(request);
        let caller = &request.caller;
        match &outcome {
            IngestOutcome::Stored { .. } => tracing::info!(
                asset = %request.loggable_id(),
                uploader = %request.loggable_uploader(),
                platform = %caller.platform,
                bytes = request.payload.len(),
                outcome = outcome.name(),
                "asset uploaded"
            ),
            IngestOutcome::StorageFailure { reason, .. } => tracing::error!(
                asset = %request.loggable_id(),
                uploader = %request.loggable_uploader(),
                error = %reason,
                outcome = outcome.name(),
                "asset upload failed"
            ),
            _ => tracing::info!(
                asset = %request.loggable_id(),
                uploader = %request.loggable_uploader(),
                platform = %caller.platform,
                bytes = request.payload.len(),
                outcome = outcome.name(),
                "asset upload refused: {outcome}"
            ),
        }
        outcome
    }

    fn run(&self, request: &IngestRequest) -> IngestOutcome {
        let payload = request.payload.as_ref();

        // Steps 1-3: identifier, size, format. No hashing happens on rejection.
        let upload = match self.validator.validate(payload, &request.claimed_id) {
            Ok(upload) => upload,
            Err(Rejection::BadIdentifier(e)) => {
                return IngestOutcome::BadIdentifier {
                    reason: e.to_string(),
                }
            }
            Err(Rejection::SizeExceeded { size, limit }) => {
                return IngestOutcome::SizeExceeded { size, limit }
            }
            Err(Rejection::FormatBlocked(format)) => return IngestOutcome::FormatBlocked { format },
        };
        let id = upload.id;

        // Step 4: the bytes must hash to the claimed id.
        if let Err(mismatch) = HashVerifier::check(payload, &request.claimed_id) {
            return IngestOutcome::HashMismatch {
                claimed: id,
                computed: mismatch.computed,
            };
        }

        // Step 5: dedup.
        match self.store.exists(&id) {
            Ok(true) => return IngestOutcome::AlreadyExists { id },
            Ok(false) => {}
            Err(e) => {
                return IngestOutcome::StorageFailure {
                    id,
                    reason: e.to_string(),
                }
            }
        }

        // Step 6: persist. Losing a race to an identical upload is a conflict.
        match self.store.put(&id, payload) {
            Ok(PutStatus::Stored) => {
                self.catalog.record(AssetRecord {
                    id,
                    format: upload.format,
                    size: upload.size,
                    uploader: Some(request.caller.name.clone()),
                    platform: Some(request.caller.platform),
                    uploaded_at: Some(Utc::now()),
                });
                IngestOutcome::Stored {
                    id,
                    format: upload.format,
                }
            }
            Ok(PutStatus::AlreadyExists) => IngestOutcome::AlreadyExists { id },
            Err(e) => IngestOutcome::StorageFailure {
                id,
                reason: e.to_string(),
            },
        }
    }
}

impl std::fmt::Debug for IngestCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestCoordinator")
            .field("validator", &self.validator)
            .field("store", &self.store)
            .finish()
    }
}
