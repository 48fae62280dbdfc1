use std::sync::Arc;
use std::time::{Duration, Instant};

use hoard_types::{AssetFormat, AssetId};

use crate::config::ValidatorConfig;
use crate::format::FormatTable;
use crate::stage::{
    Rejection, StageContext, StageDecision, StageResult, UploadCandidate, UploadStage,
};
use crate::stages::{FormatStage, IdentifierStage, SizeStage};

/// An upload that passed every stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedUpload {
    /// The claimed id, parsed. Not yet checked against the payload's hash.
    pub id: AssetId,
    pub format: AssetFormat,
    pub size: usize,
}

/// Full audit trail of one validation run.
#[derive(Clone, Debug)]
pub struct ValidationReport {
    pub outcome: Result<ValidatedUpload, Rejection>,
    /// Per-stage results in evaluation order; stops at the first rejection.
    pub stage_results: Vec<StageResult>,
    pub elapsed: Duration,
}

/// Fixed, fail-fast upload validation pipeline:
/// identifier -> size -> format.
pub struct UploadValidator {
    stages: Vec<Box<dyn UploadStage>>,
    table: Arc<FormatTable>,
    max_asset_size: usize,
}

impl UploadValidator {
    /// Build the pipeline with a table derived from `config`.
    pub fn new(config: &ValidatorConfig) -> Self {
        Self::with_table(config.max_asset_size, Arc::new(FormatTable::from_config(config)))
    }

    /// Build the pipeline around an existing shared table.
    pub fn with_table(max_asset_size: usize, table: Arc<FormatTable>) -> Self {
        let stages: Vec<Box<dyn UploadStage>> = vec![
            Box::new(IdentifierStage),
            Box::new(SizeStage {
                limit: max_asset_size,
            }),
            Box::new(FormatStage {
                table: Arc::clone(&table),
            }),
        ];
        Self {
            stages,
            table,
            max_asset_size,
        }
    }

    /// The shared format table.
    pub fn table(&self) -> &Arc<FormatTable> {
        &self.table
    }

    /// Exclusive payload size limit.
    pub fn max_asset_size(&self) -> usize {
        self.max_asset_size
    }

    /// Stage names in evaluation order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Validate an upload, returning only the outcome.
    pub fn validate(&self, payload: &[u8], claimed_id: &str) -> Result<ValidatedUpload, Rejection> {
        self.evaluate(payload, claimed_id).outcome
    }

    /// Validate an upload and keep the per-stage audit trail.
    pub fn evaluate(&self, payload: &[u8], claimed_id: &str) -> ValidationReport {
        let pipeline_start = Instant::now();
        let candidate = UploadCandidate {
            claimed_id,
            payload,
        };
        let mut context = StageContext::default();
        let mut stage_results = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let stage_start = Instant::now();
            let decision = stage.evaluate(&candidate, &mut context);
            let elapsed = stage_start.elapsed();

            let reason = match &decision {
                StageDecision::Pass => None,
                StageDecision::Reject(rejection) => Some(rejection.to_string()),
            };
            stage_results.push(StageResult {
                stage_name: stage.name(),
                passed: decision.is_pass(),
                reason,
                elapsed,
            });

            if let StageDecision::Reject(rejection) = decision {
                tracing::debug!(stage = stage.name(), %rejection, "upload rejected");
                return ValidationReport {
                    outcome: Err(rejection),
                    stage_results,
                    elapsed: pipeline_start.elapsed(),
                };
            }
        }

        // The identifier stage always runs first and sets the id on pass.
        let outcome = match context.id {
            Some(id) => Ok(ValidatedUpload {
                id,
                format: context.format.unwrap_or(AssetFormat::Unknown),
                size: payload.len(),
            }),
            None => Err(Rejection::BadIdentifier(hoard_types::TypeError::InvalidLength {
                expected: AssetId::HEX_LEN,
                actual: claimed_id.len(),
            })),
        };
        ValidationReport {
            outcome,
            stage_results,
            elapsed: pipeline_start.elapsed(),
        }
    }
}

impl std::fmt::Debug for UploadValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadValidator")
            .field("stages", &self.stage_names())
            .field("max_asset_size", &self.max_asset_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEX_A: &str = "39c988f421c2a4adff4f3c81b0bb8291a41b99fb";
    const FSH: &str = "59cbdac2f96b4a8ab3993dfb6bf94ac5bf02a2a0";
    const UNRELATED: &str = "6e4d252f247e3aa99ef846df8c65493393e79f4f";

    fn validator() -> UploadValidator {
        UploadValidator::new(&ValidatorConfig::default())
    }

    // -----------------------------------------------------------------------
    // Passing uploads
    // -----------------------------------------------------------------------

    #[test]
    fn valid_texture_passes_all_stages() {
        let report = validator().evaluate(b"TEX a", TEX_A);
        let upload = report.outcome.unwrap();
        assert_eq!(upload.id.to_hex(), TEX_A);
        assert_eq!(upload.format, AssetFormat::Texture);
        assert_eq!(upload.size, 5);
        assert_eq!(report.stage_results.len(), 3);
        assert!(report.stage_results.iter().all(|r| r.passed));
    }

    #[test]
    fn validator_does_not_check_the_hash() {
        // Hash verification belongs to the coordinator.
        assert!(validator().validate(b"TEX a", UNRELATED).is_ok());
    }

    // -----------------------------------------------------------------------
    // Identifier stage
    // -----------------------------------------------------------------------

    #[test]
    fn malformed_identifiers_fail_first() {
        for claimed in ["I_AM_NOT_REAL", "asdf", "..%2Frpc.json", "../rpc.json", ""] {
            let report = validator().evaluate(b"FSHbthsa", claimed);
            assert!(matches!(report.outcome, Err(Rejection::BadIdentifier(_))));
            assert_eq!(report.stage_results.len(), 1, "fail-fast at identifier");
        }
    }

    #[test]
    fn uppercase_identifier_is_rejected() {
        let err = validator()
            .validate(b"TEX a", &TEX_A.to_ascii_uppercase())
            .unwrap_err();
        assert!(matches!(err, Rejection::BadIdentifier(_)));
    }

    // -----------------------------------------------------------------------
    // Size stage
    // -----------------------------------------------------------------------

    #[test]
    fn five_million_bytes_is_rejected() {
        let payload = vec![0u8; 5_000_000];
        let report = validator().evaluate(&payload, "95775c451ed9604d9753465d8cc4d52ca1cb58a4");
        assert_eq!(
            report.outcome,
            Err(Rejection::SizeExceeded { size: 5_000_000, limit: 5_000_000 })
        );
        assert_eq!(report.stage_results.len(), 2);
    }

    #[test]
    fn just_under_the_limit_passes() {
        let payload = vec![0u8; 4_999_999];
        assert!(validator().validate(&payload, UNRELATED).is_ok());
    }

    #[test]
    fn size_wins_over_blocked_format() {
        let mut payload = b"FSHb".to_vec();
        payload.resize(5_000_000, 0);
        assert!(matches!(
            validator().validate(&payload, FSH),
            Err(Rejection::SizeExceeded { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Format stage
    // -----------------------------------------------------------------------

    #[test]
    fn blocked_format_is_rejected_with_correct_hash() {
        let report = validator().evaluate(b"FSHbthsa", FSH);
        assert_eq!(report.outcome, Err(Rejection::FormatBlocked(AssetFormat::Script)));
        let last = report.stage_results.last().unwrap();
        assert_eq!(last.stage_name, "format");
        assert!(last.reason.as_deref().unwrap().contains("script"));
    }

    #[test]
    fn blocked_format_is_rejected_with_wrong_hash() {
        assert_eq!(
            validator().validate(b"FSHbthsa", UNRELATED),
            Err(Rejection::FormatBlocked(AssetFormat::Script))
        );
    }

    // -----------------------------------------------------------------------
    // Pipeline shape
    // -----------------------------------------------------------------------

    #[test]
    fn stage_order_is_fixed() {
        assert_eq!(validator().stage_names(), vec!["identifier", "size", "format"]);
    }

    #[test]
    fn shared_table_is_reused() {
        let table = Arc::new(FormatTable::default());
        let v = UploadValidator::with_table(100, Arc::clone(&table));
        assert!(Arc::ptr_eq(v.table(), &table));
        assert_eq!(v.max_asset_size(), 100);
    }

    #[test]
    fn debug_lists_stages() {
        let debug = format!("{:?}", validator());
        assert!(debug.contains("identifier"));
        assert!(debug.contains("max_asset_size"));
    }
}
