use std::fmt;
use std::time::Duration;

use hoard_types::{AssetFormat, AssetId, TypeError};

// ---------------------------------------------------------------------------
// UploadCandidate
// ---------------------------------------------------------------------------

/// An upload as received: the raw claimed id and the payload.
#[derive(Clone, Copy, Debug)]
pub struct UploadCandidate<'a> {
    pub claimed_id: &'a str,
    pub payload: &'a [u8],
}

// ---------------------------------------------------------------------------
// Rejection / StageDecision
// ---------------------------------------------------------------------------

/// Why the validator refused an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The claimed id is not 40 lowercase hex characters.
    BadIdentifier(TypeError),
    /// The payload is at or above the size limit.
    SizeExceeded { size: usize, limit: usize },
    /// The sniffed format is blocklisted.
    FormatBlocked(AssetFormat),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadIdentifier(e) => write!(f, "bad identifier: {e}"),
            Self::SizeExceeded { size, limit } => {
                write!(f, "payload of {size} bytes exceeds limit of {limit}")
            }
            Self::FormatBlocked(format) => write!(f, "format '{format}' is blocked"),
        }
    }
}

/// The outcome of a single stage evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageDecision {
    Pass,
    Reject(Rejection),
}

impl StageDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

// ---------------------------------------------------------------------------
// StageResult / StageContext
// ---------------------------------------------------------------------------

/// Recorded result from a completed stage evaluation.
#[derive(Clone, Debug)]
pub struct StageResult {
    pub stage_name: &'static str,
    pub passed: bool,
    pub reason: Option<String>,
    pub elapsed: Duration,
}

/// Facts established by earlier stages.
#[derive(Clone, Debug, Default)]
pub struct StageContext {
    /// Set by the identifier stage once the claimed id parses.
    pub id: Option<AssetId>,
    /// Set by the format stage.
    pub format: Option<AssetFormat>,
}

// ---------------------------------------------------------------------------
// UploadStage trait
// ---------------------------------------------------------------------------

/// A single evaluation stage in the upload pipeline.
///
/// Stages are pure: they read the candidate, may record facts in the
/// context, and never perform I/O.
pub trait UploadStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, candidate: &UploadCandidate<'_>, context: &mut StageContext) -> StageDecision;
}
