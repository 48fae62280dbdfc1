use std::fmt;

use hoard_types::{AssetFormat, AssetId};
use serde::Serialize;

/// Error class of an outcome, deciding how callers should react.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClass {
    /// The blob is now stored.
    Success,
    /// Malformed identifier or oversized payload. Caller-recoverable.
    Input,
    /// Blocklisted format. Never retried.
    Policy,
    /// Claimed id does not match the bytes. Tampering or corruption.
    Integrity,
    /// Identical content already stored. Benign.
    Conflict,
    /// Backend failure. The whole request may be retried.
    Storage,
}

/// The single definitive result of an ingest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    Stored { id: AssetId, format: AssetFormat },
    AlreadyExists { id: AssetId },
    BadIdentifier { reason: String },
    SizeExceeded { size: usize, limit: usize },
    FormatBlocked { format: AssetFormat },
    HashMismatch { claimed: AssetId, computed: AssetId },
    StorageFailure { id: AssetId, reason: String },
}

impl IngestOutcome {
    pub fn class(&self) -> OutcomeClass {
        match self {
            Self::Stored { .. } => OutcomeClass::Success,
            Self::BadIdentifier { .. } | Self::SizeExceeded { .. } => OutcomeClass::Input,
            Self::FormatBlocked { .. } => OutcomeClass::Policy,
            Self::HashMismatch { .. } => OutcomeClass::Integrity,
            Self::AlreadyExists { .. } => OutcomeClass::Conflict,
            Self::StorageFailure { .. } => OutcomeClass::Storage,
        }
    }

    /// Returns `true` only for `Stored`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }

    /// Returns `true` if the content is present in the store afterwards.
    pub fn content_present(&self) -> bool {
        matches!(self, Self::Stored { .. } | Self::AlreadyExists { .. })
    }

    /// Stable snake_case name for logs and response bodies.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stored { .. } => "stored",
            Self::AlreadyExists { .. } => "already_exists",
            Self::BadIdentifier { .. } => "bad_identifier",
            Self::SizeExceeded { .. } => "size_exceeded",
            Self::FormatBlocked { .. } => "format_blocked",
            Self::HashMismatch { .. } => "hash_mismatch",
            Self::StorageFailure { .. } => "storage_failure",
        }
    }
}

impl fmt::Display for IngestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored { id, format } => write!(f, "stored {format} asset {id}"),
            Self::AlreadyExists { id } => write!(f, "asset {id} already exists"),
            Self::BadIdentifier { reason } => write!(f, "invalid asset identifier: {reason}"),
            Self::SizeExceeded { size, limit } => {
                write!(f, "asset of {size} bytes exceeds limit of {limit}")
            }
            Self::FormatBlocked { format } => write!(f, "asset format '{format}' is not allowed"),
            Self::HashMismatch { claimed, computed } => {
                write!(f, "asset hash mismatch: claimed {claimed}, computed {computed}")
            }
            Self::StorageFailure { id, reason } => write!(f, "failed to store asset {id}: {reason}"),
        }
    }
}
