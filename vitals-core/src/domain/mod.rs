// vitals-core/src/domain/mod.rs

pub mod dataset;
pub mod error;
pub mod project;
pub mod quality;
pub mod rules;
pub mod transform;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use dataset::{Dataset, DatasetKind, Value};
pub use error::DomainError;
pub use quality::{QualityChecker, QualityReport, QualityStatus};
pub use rules::ValidationRules;
