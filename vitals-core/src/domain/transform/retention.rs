// vitals-core/src/domain/transform/retention.rs

use crate::domain::dataset::DatasetKind;
use crate::domain::error::DomainError;

/// Guardrail on how many rows a cleaning pass may discard.
pub struct RetentionCheck;

impl RetentionCheck {
    /// Fails when fewer than `min_ratio` of the `original` rows were `retained`.
    ///
    /// # Arguments
    /// * `retained` - Rows left after filtering.
    /// * `original` - Rows in the raw dataset.
    /// * `min_ratio` - Share of rows that must survive (ex: 0.5 for 50%).
    pub fn validate(
        dataset: DatasetKind,
        retained: usize,
        original: usize,
        min_ratio: f64,
    ) -> Result<(), DomainError> {
        // An empty input cannot lose anything.
        if original == 0 {
            return Ok(());
        }

        if (retained as f64) < min_ratio * original as f64 {
            return Err(DomainError::ExcessiveDataLoss {
                dataset,
                retained,
                original,
                min_ratio,
            });
        }

        Ok(())
    }
}
