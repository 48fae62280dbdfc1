use hoard_types::AssetId;

use crate::stage::{Rejection, StageContext, StageDecision, UploadCandidate, UploadStage};

/// Identifier syntax stage.
///
/// The claimed id must already be canonical. Nothing is lowercased or
/// decoded here: `%2F`, `..` and uppercase hex all fail.
pub struct IdentifierStage;

impl UploadStage for IdentifierStage {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn evaluate(&self, candidate: &UploadCandidate<'_>, context: &mut StageContext) -> StageDecision {
        match AssetId::parse(candidate.claimed_id) {
            Ok(id) => {
                context.id = Some(id);
                StageDecision::Pass
            }
            Err(e) => StageDecision::Reject(Rejection::BadIdentifier(e)),
        }
    }
}
