use crate::stage::{Rejection, StageContext, StageDecision, UploadCandidate, UploadStage};

/// Payload size stage.
pub struct SizeStage {
    /// Exclusive upper bound in bytes.
    pub limit: usize,
}

impl UploadStage for SizeStage {
    fn name(&self) -> &'static str {
        "size"
    }

    fn evaluate(&self, candidate: &UploadCandidate<'_>, _context: &mut StageContext) -> StageDecision {
        let size = candidate.payload.len();
        if size >= self.limit {
            StageDecision::Reject(Rejection::SizeExceeded {
                size,
                limit: self.limit,
            })
        } else {
            StageDecision::Pass
        }
    }
}
