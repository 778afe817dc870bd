// vitals-core/src/domain/quality/checks.rs
//
// Defect counters. Each one reads the dataset and returns a count; none of them
// mutates or reorders anything.

use std::collections::HashSet;

use crate::domain::dataset::{Dataset, RangeRule, TIMESTAMP_COLUMN, Value};
use crate::domain::error::DomainError;

/// Total missing cells across every field of every record.
pub fn count_missing(dataset: &Dataset) -> usize {
    dataset
        .rows()
        .iter()
        .flat_map(|row| row.iter())
        .filter(|cell| cell.is_missing())
        .count()
}

/// Records that repeat an earlier record cell for cell. The first occurrence is not counted.
pub fn count_duplicates(dataset: &Dataset) -> usize {
    let mut seen = HashSet::with_capacity(dataset.len());
    dataset
        .rows()
        .iter()
        .filter(|row| !seen.insert(row.iter().map(Value::fingerprint).collect::<Vec<_>>()))
        .count()
}

/// Records whose `timestamp` does not coerce to a point in time (missing included).
pub fn count_invalid_timestamps(dataset: &Dataset) -> Result<usize, DomainError> {
    Ok(dataset
        .column(TIMESTAMP_COLUMN)?
        .filter(|v| v.as_timestamp().is_none())
        .count())
}

/// Records whose `column` does not coerce to a number (missing included).
pub fn count_invalid_numeric(dataset: &Dataset, column: &str) -> Result<usize, DomainError> {
    Ok(dataset
        .column(column)?
        .filter(|v| v.as_number().is_none())
        .count())
}

/// Parsed values of `column` rejected by `rule`. Unparseable cells are left to
/// [`count_invalid_numeric`].
pub fn count_range_violations(
    dataset: &Dataset,
    column: &str,
    rule: RangeRule,
) -> Result<usize, DomainError> {
    Ok(dataset
        .column(column)?
        .filter_map(Value::as_number)
        .filter(|v| !rule.accepts(*v))
        .count())
}

pub fn count_out_of_range(
    dataset: &Dataset,
    column: &str,
    min: f64,
    max: f64,
) -> Result<usize, DomainError> {
    count_range_violations(dataset, column, RangeRule::Bounded { min, max })
}

pub fn count_negative(dataset: &Dataset, column: &str) -> Result<usize, DomainError> {
    count_range_violations(dataset, column, RangeRule::NonNegative)
}
