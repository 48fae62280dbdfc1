use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use hoard_types::{AssetFormat, AssetId, Platform};
use serde::{Deserialize, Serialize};

/// Metadata kept for a stored asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: AssetId,
    pub format: AssetFormat,
    pub size: usize,
    /// `None` when the blob predates the catalog (e.g. after a restart).
    pub uploader: Option<String>,
    pub platform: Option<Platform>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Index of asset metadata, written once per stored asset.
pub trait AssetCatalog: Send + Sync {
    /// Record a newly stored asset. An existing record is kept.
    fn record(&self, record: AssetRecord);

    fn get(&self, id: &AssetId) -> Option<AssetRecord>;

    /// All records uploaded by `uploader`, oldest first.
    fn by_uploader(&self, uploader: &str) -> Vec<AssetRecord>;
}

/// In-memory catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    records: RwLock<HashMap<AssetId, AssetRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetCatalog for InMemoryCatalog {
    fn record(&self, record: AssetRecord) {
        self.records
            .write()
            .expect("lock poisoned")
            .entry(record.id)
            .or_insert(record);
    }

    fn get(&self, id: &AssetId) -> Option<AssetRecord> {
        self.records.read().expect("lock poisoned").get(id).cloned()
    }

    fn by_uploader(&self, uploader: &str) -> Vec<AssetRecord> {
        let map = self.records.read().expect("lock poisoned");
        let mut records: Vec<AssetRecord> = map
            .values()
            .filter(|r| r.uploader.as_deref() == Some(uploader))
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.uploaded_at, r.id));
        records
    }
}
