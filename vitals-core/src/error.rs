// vitals-core/src/error.rs

use crate::application::pipeline::Stage;
use crate::domain::error::DomainError;
use crate::domain::quality::QualityReport;
use crate::infrastructure::error::InfrastructureError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VitalsError {
    // --- ERREURS DU DOMAINE (Cleaning rules, Guardrails) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, DuckDB, Config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // The report was computed but could not be persisted; it travels with the error.
    #[error("Failed to write quality report to '{path}': {source}")]
    ReportWriteFailure {
        path: String,
        report: Box<QualityReport>,
        source: InfrastructureError,
    },

    #[error("Stage '{stage}' failed after {attempts} attempt(s): {source}")]
    StageFailed {
        stage: Stage,
        attempts: u32,
        source: Box<VitalsError>,
    },

    // --- ERREURS GÉNÉRIQUES / APPLICATIVES ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

/// Coarse classification of any failure, as reported to the user and in run results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingRequiredField,
    ExcessiveDataLoss,
    EmptyResult,
    ReportWriteFailure,
    UnexpectedComputationFailure,
    Infrastructure,
}

impl VitalsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VitalsError::Domain(e) => match e {
                DomainError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
                DomainError::ExcessiveDataLoss { .. } => ErrorKind::ExcessiveDataLoss,
                DomainError::EmptyResult { .. } => ErrorKind::EmptyResult,
                DomainError::UnexpectedComputationFailure { .. }
                | DomainError::SchemaError(_) => ErrorKind::UnexpectedComputationFailure,
            },
            VitalsError::Infrastructure(_) => ErrorKind::Infrastructure,
            VitalsError::ReportWriteFailure { .. } => ErrorKind::ReportWriteFailure,
            VitalsError::StageFailed { source, .. } => source.kind(),
            VitalsError::InternalError(_) => ErrorKind::UnexpectedComputationFailure,
        }
    }

    /// Stage the error escaped from, when it went through the orchestrator.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            VitalsError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingRequiredField => "MissingRequiredField",
            ErrorKind::ExcessiveDataLoss => "ExcessiveDataLoss",
            ErrorKind::EmptyResult => "EmptyResult",
            ErrorKind::ReportWriteFailure => "ReportWriteFailure",
            ErrorKind::UnexpectedComputationFailure => "UnexpectedComputationFailure",
            ErrorKind::Infrastructure => "Infrastructure",
        };
        f.write_str(name)
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for VitalsError {
    fn from(err: std::io::Error) -> Self {
        VitalsError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for VitalsError {
    fn from(err: duckdb::Error) -> Self {
        VitalsError::Infrastructure(InfrastructureError::from(err))
    }
}
