// vitals-core/src/domain/error.rs

use crate::domain::dataset::DatasetKind;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Missing required field '{field}' in {dataset} dataset")]
    #[diagnostic(
        code(vitals::domain::missing_field),
        help("The raw {dataset} source must provide a '{field}' column.")
    )]
    MissingRequiredField { dataset: DatasetKind, field: String },

    #[error(
        "High data loss while cleaning {dataset}: kept {retained} of {original} rows (minimum ratio {min_ratio:.2})"
    )]
    #[diagnostic(
        code(vitals::domain::data_loss),
        help("Upstream data looks suspect. Inspect the raw quality report before re-running.")
    )]
    ExcessiveDataLoss {
        dataset: DatasetKind,
        retained: usize,
        original: usize,
        min_ratio: f64,
    },

    #[error("No valid data left after cleaning {dataset}")]
    #[diagnostic(code(vitals::domain::empty_result))]
    EmptyResult { dataset: DatasetKind },

    #[error("Unexpected failure during {context}: {source}")]
    #[diagnostic(code(vitals::domain::unexpected))]
    UnexpectedComputationFailure {
        context: String,
        source: Box<DomainError>,
    },

    #[error("Schema Error: {0}")]
    #[diagnostic(code(vitals::domain::schema))]
    SchemaError(String),
}

impl DomainError {
    /// Wraps any error raised while computing `context` so the caller keeps the cause.
    pub fn unexpected(context: impl Into<String>, source: DomainError) -> Self {
        DomainError::UnexpectedComputationFailure {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
