// vitals-core/src/domain/transform/mod.rs

pub mod heart_rate;
pub mod retention;
pub mod steps;

pub use heart_rate::{HeartRateCleaner, HeartRateRecord, clean_heart_rate};
pub use retention::RetentionCheck;
pub use steps::{HourlyStepsRecord, StepsCleaner, clean_steps};

use crate::domain::dataset::{ColumnType, Dataset, DatasetKind, Value};
use crate::domain::error::DomainError;

/// A cleaned record that can be handed back as a [`Dataset`] (for the clean quality
/// report and for loading).
pub trait TabularRecord {
    const COLUMNS: &'static [&'static str];
    /// Storage type of each entry of `COLUMNS`, in the same order.
    const COLUMN_TYPES: &'static [ColumnType];

    fn cells(&self) -> Vec<Value>;
}

pub fn records_to_dataset<R: TabularRecord>(records: &[R]) -> Result<Dataset, DomainError> {
    Dataset::new(
        R::COLUMNS.iter().map(|c| c.to_string()).collect(),
        records.iter().map(R::cells).collect(),
    )?
    .with_column_types(R::COLUMN_TYPES.to_vec())
}

/// Looks up a column the cleaning pass cannot do without.
fn required_column(
    raw: &Dataset,
    dataset: DatasetKind,
    field: &str,
) -> Result<usize, DomainError> {
    raw.column_index(field)
        .map_err(|_| DomainError::MissingRequiredField {
            dataset,
            field: field.to_string(),
        })
}
