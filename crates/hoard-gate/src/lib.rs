//! Upload validation pipeline for the hoard asset store.
//!
//! Every upload passes through the [`UploadValidator`] before anything is
//! hashed or stored. The validator runs a fixed, fail-fast pipeline:
//!
//! 1. [`IdentifierStage`] -- the claimed id is 40 lowercase hex characters
//! 2. [`SizeStage`] -- the payload is below the configured size limit
//! 3. [`FormatStage`] -- the sniffed format is not blocklisted
//!
//! Size runs before format: it is a length comparison and bounds the work
//! any later stage can be asked to do.
//!
//! # Quick Start
//!
//! ```rust
//! use hoard_gate::{UploadValidator, ValidatorConfig};
//!
//! let validator = UploadValidator::new(&ValidatorConfig::default());
//! let upload = validator
//!     .validate(b"TEX a", "39c988f421c2a4adff4f3c81b0bb8291a41b99fb")
//!     .unwrap();
//! assert_eq!(upload.format.name(), "texture");
//! ```

pub mod config;
pub mod format;
pub mod stage;
pub mod stages;
pub mod validator;

pub use config::ValidatorConfig;
pub use format::{FormatDescriptor, FormatTable, Sniffed, Verdict};
pub use stage::{Rejection, StageContext, StageDecision, StageResult, UploadCandidate, UploadStage};
pub use stages::{FormatStage, IdentifierStage, SizeStage};
pub use validator::{UploadValidator, ValidatedUpload, ValidationReport};
