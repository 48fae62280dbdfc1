use std::sync::Arc;

use crate::format::{FormatTable, Verdict};
use crate::stage::{Rejection, StageContext, StageDecision, UploadCandidate, UploadStage};

/// Format policy stage.
///
/// Sniffs the payload against the shared [`FormatTable`]. Runs before any
/// hashing, so a blocked payload is refused whether or not its id is correct.
pub struct FormatStage {
    pub table: Arc<FormatTable>,
}

impl UploadStage for FormatStage {
    fn name(&self) -> &'static str {
        "format"
    }

    fn evaluate(&self, candidate: &UploadCandidate<'_>, context: &mut StageContext) -> StageDecision {
        let sniffed = self.table.sniff(candidate.payload);
        context.format = Some(sniffed.format);
        match sniffed.verdict {
            Verdict::Allow => StageDecision::Pass,
            Verdict::Block => StageDecision::Reject(Rejection::FormatBlocked(sniffed.format)),
        }
    }
}
