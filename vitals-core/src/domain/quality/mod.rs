// vitals-core/src/domain/quality/mod.rs

pub mod checks;
pub mod report;

pub use report::{DatasetChecks, QualityReport, QualityStatus, RangeViolations};

use crate::domain::dataset::{Dataset, DatasetKind};
use crate::domain::error::DomainError;
use crate::domain::rules::ValidationRules;

/// Computes defect counts for heart-rate and steps datasets.
#[derive(Debug, Clone, Default)]
pub struct QualityChecker {
    rules: ValidationRules,
}

impl QualityChecker {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Runs the five checks that apply to `kind`.
    pub fn assess(
        &self,
        dataset: &Dataset,
        kind: DatasetKind,
    ) -> Result<DatasetChecks, DomainError> {
        let column = kind.numeric_column();
        let violations =
            checks::count_range_violations(dataset, column, self.rules.range_rule(kind))?;

        Ok(DatasetChecks {
            missing_values: checks::count_missing(dataset),
            duplicate_rows: checks::count_duplicates(dataset),
            invalid_timestamps: checks::count_invalid_timestamps(dataset)?,
            invalid_numeric_values: checks::count_invalid_numeric(dataset, column)?,
            range: match kind {
                DatasetKind::HeartRate => RangeViolations::OutOfRange(violations),
                DatasetKind::Steps => RangeViolations::Negative(violations),
            },
        })
    }

    /// Builds the combined report. Any failure is wrapped with the dataset it came from.
    pub fn report(
        &self,
        heart_rate: &Dataset,
        steps: &Dataset,
    ) -> Result<QualityReport, DomainError> {
        let hr = self
            .assess(heart_rate, DatasetKind::HeartRate)
            .map_err(|e| DomainError::unexpected("quality checks on heart_rate", e))?;
        let st = self
            .assess(steps, DatasetKind::Steps)
            .map_err(|e| DomainError::unexpected("quality checks on steps", e))?;

        Ok(QualityReport::new(hr, st))
    }
}

/// Assesses `dataset` with the default rules.
pub fn assess_dataset(dataset: &Dataset, kind: DatasetKind) -> Result<DatasetChecks, DomainError> {
    QualityChecker::default().assess(dataset, kind)
}
