use serde::{Deserialize, Serialize};

use hoard_types::AssetFormat;

/// Payloads of this many bytes or more are rejected by default.
pub const DEFAULT_MAX_ASSET_SIZE: usize = 5_000_000;

/// Configuration for the upload validation pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Exclusive upper bound on payload length in bytes.
    pub max_asset_size: usize,
    /// Whether payloads matching no known signature are accepted.
    pub allow_unknown_formats: bool,
    /// Formats refused at ingestion.
    pub blocked_formats: Vec<AssetFormat>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_asset_size: DEFAULT_MAX_ASSET_SIZE,
            allow_unknown_formats: true,
            blocked_formats: vec![AssetFormat::Script],
        }
    }
}
