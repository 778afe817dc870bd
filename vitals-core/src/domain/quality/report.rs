// vitals-core/src/domain/quality/report.rs

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityStatus {
    Pass,
    Fail,
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityStatus::Pass => f.write_str("PASS"),
            QualityStatus::Fail => f.write_str("FAIL"),
        }
    }
}

/// The range defect a dataset kind is checked for. Serialized under its own key
/// so each sub-report keeps the field name its consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeViolations {
    #[serde(rename = "out_of_range_values")]
    OutOfRange(usize),
    #[serde(rename = "negative_values")]
    Negative(usize),
}

impl RangeViolations {
    pub fn count(&self) -> usize {
        match *self {
            RangeViolations::OutOfRange(n) | RangeViolations::Negative(n) => n,
        }
    }
}

/// Defect counts for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetChecks {
    pub missing_values: usize,
    pub duplicate_rows: usize,
    pub invalid_timestamps: usize,
    pub invalid_numeric_values: usize,
    #[serde(flatten)]
    pub range: RangeViolations,
}

impl DatasetChecks {
    pub fn total(&self) -> usize {
        self.missing_values
            + self.duplicate_rows
            + self.invalid_timestamps
            + self.invalid_numeric_values
            + self.range.count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub heart_rate_checks: DatasetChecks,
    pub steps_checks: DatasetChecks,
    pub status: QualityStatus,
}

impl QualityReport {
    /// Assembles the report. `PASS` only when every one of the ten counts is zero.
    pub fn new(heart_rate_checks: DatasetChecks, steps_checks: DatasetChecks) -> Self {
        let status = if heart_rate_checks.total() + steps_checks.total() == 0 {
            QualityStatus::Pass
        } else {
            QualityStatus::Fail
        };
        Self {
            heart_rate_checks,
            steps_checks,
            status,
        }
    }

    pub fn total_issues(&self) -> usize {
        self.heart_rate_checks.total() + self.steps_checks.total()
    }
}
