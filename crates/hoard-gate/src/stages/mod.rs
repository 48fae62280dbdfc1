//! Built-in upload stages.

pub mod format;
pub mod identifier;
pub mod size;

pub use format::FormatStage;
pub use identifier::IdentifierStage;
pub use size::SizeStage;
