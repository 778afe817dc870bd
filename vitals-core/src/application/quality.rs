// vitals-core/src/application/quality.rs

use tracing::instrument;

use crate::domain::dataset::Dataset;
use crate::domain::quality::{QualityChecker, QualityReport};
use crate::error::VitalsError;
use crate::ports::artifact::ArtifactSink;

/// Computes the report for a pair of datasets and persists it under `name`.
///
/// A report that was computed but could not be written is not lost: it comes back
/// inside [`VitalsError::ReportWriteFailure`].
#[instrument(skip_all, fields(report = name))]
pub fn generate_quality_report(
    checker: &QualityChecker,
    heart_rate: &Dataset,
    steps: &Dataset,
    sink: &dyn ArtifactSink,
    name: &str,
) -> Result<QualityReport, VitalsError> {
    let report = checker.report(heart_rate, steps)?;

    match sink.write_report(name, &report) {
        Ok(_) => Ok(report),
        Err(source) => Err(VitalsError::ReportWriteFailure {
            path: sink.location(name).display().to_string(),
            report: Box::new(report),
            source,
        }),
    }
}
