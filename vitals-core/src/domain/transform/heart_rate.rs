// vitals-core/src/domain/transform/heart_rate.rs

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{RetentionCheck, TabularRecord, required_column};
use crate::domain::dataset::{ColumnType, Dataset, DatasetKind, TIMESTAMP_COLUMN, Value};
use crate::domain::error::DomainError;
use crate::domain::rules::ValidationRules;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartRateRecord {
    pub timestamp: NaiveDateTime,
    pub heart_rate: f64,
    pub hr_rolling_avg: f64,
}

impl TabularRecord for HeartRateRecord {
    const COLUMNS: &'static [&'static str] = &["timestamp", "heart_rate", "hr_rolling_avg"];
    const COLUMN_TYPES: &'static [ColumnType] =
        &[ColumnType::Timestamp, ColumnType::Float, ColumnType::Float];

    fn cells(&self) -> Vec<Value> {
        vec![
            Value::Timestamp(self.timestamp),
            Value::Float(self.heart_rate),
            Value::Float(self.hr_rolling_avg),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeartRateCleaner {
    rules: ValidationRules,
}

impl HeartRateCleaner {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Coerce, range-filter, drop incomplete rows, then attach the rolling average.
    ///
    /// The raw dataset is only read. The output is indexed from 0 in input order.
    pub fn clean(&self, raw: &Dataset) -> Result<Vec<HeartRateRecord>, DomainError> {
        let kind = DatasetKind::HeartRate;
        let ts_idx = required_column(raw, kind, TIMESTAMP_COLUMN)?;
        let hr_idx = required_column(raw, kind, kind.numeric_column())?;
        let rule = self.rules.range_rule(kind);

        let retained: Vec<(NaiveDateTime, f64)> = raw
            .rows()
            .iter()
            .map(|row| (row[ts_idx].as_timestamp(), row[hr_idx].as_number()))
            // missing values fail the range test as well
            .filter(|(_, hr)| hr.is_some_and(|v| rule.accepts(v)))
            .filter_map(|(ts, hr)| Some((ts?, hr?)))
            .collect();

        RetentionCheck::validate(
            kind,
            retained.len(),
            raw.len(),
            self.rules.min_retention_ratio,
        )?;

        let values: Vec<f64> = retained.iter().map(|(_, hr)| *hr).collect();
        let averages = rolling_mean(&values, self.rules.rolling_window);

        Ok(retained
            .into_iter()
            .zip(averages)
            .map(|((timestamp, heart_rate), hr_rolling_avg)| HeartRateRecord {
                timestamp,
                heart_rate,
                hr_rolling_avg,
            })
            .collect())
    }
}

/// Mean of each value and up to `window - 1` values before it.
/// The window shrinks at the start of the sequence, it never pads.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let slice = &values[(i + 1).saturating_sub(window)..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Cleans heart-rate samples with the default rules.
pub fn clean_heart_rate(raw: &Dataset) -> Result<Vec<HeartRateRecord>, DomainError> {
    HeartRateCleaner::default().clean(raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::QualityChecker;
    use crate::domain::transform::records_to_dataset;

    fn raw(timestamps: &[Option<&str>], rates: &[Option<&str>]) -> Dataset {
        Dataset::from_columns(vec![
            (
                "timestamp",
                timestamps.iter().map(|v| Value::from(*v)).collect(),
            ),
            ("heart_rate", rates.iter().map(|v| Value::from(*v)).collect()),
        ])
        .unwrap()
    }

    #[test]
    fn test_removes_invalid_and_outliers() {
        let df = raw(
            &[
                Some("2025-01-01 00:00"),
                Some("invalid_date"),
                Some("2025-01-01 00:02"),
                Some("2025-01-01 00:04"),
                Some("2025-01-05 00:00"),
            ],
            &[
                Some("80"),
                Some("not_a_number"),
                Some("300"),
                Some("100"),
                Some("110"),
            ],
        );

        let cleaned = clean_heart_rate(&df).unwrap();

        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned[0].heart_rate, 80.0);
        assert_eq!(
            cleaned.iter().map(|r| r.heart_rate).collect::<Vec<_>>(),
            vec![80.0, 100.0, 110.0]
        );
        // averaged over retained rows only
        assert_eq!(cleaned[1].hr_rolling_avg, 90.0);
        assert!((cleaned[2].hr_rolling_avg - 290.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_timestamp_with_valid_rate_is_dropped() {
        let df = raw(
            &[Some("2025-01-01 00:00"), Some("nope"), None],
            &[Some("60"), Some("60"), Some("61")],
        );
        let err = clean_heart_rate(&df).unwrap_err();
        assert!(matches!(
            err,
            DomainError::ExcessiveDataLoss {
                retained: 1,
                original: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_high_data_loss_fails() {
        let df = raw(
            &[
                Some("2025-01-01 00:00"),
                Some("2025-01-01 00:01"),
                Some("2025-01-01 00:02"),
                Some("2025-01-01 00:03"),
            ],
            &[Some("80"), Some("10"), Some("500"), None],
        );
        assert!(matches!(
            clean_heart_rate(&df),
            Err(DomainError::ExcessiveDataLoss { .. })
        ));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let df = raw(
            &[Some("2025-01-01 00:00"), Some("2025-01-01 00:01")],
            &[Some("40"), Some("220")],
        );
        let cleaned = clean_heart_rate(&df).unwrap();
        assert_eq!(cleaned.len(), 2);
        assert!(
            cleaned
                .iter()
                .all(|r| (40.0..=220.0).contains(&r.heart_rate))
        );
    }

    #[test]
    fn test_missing_column() {
        let df = Dataset::from_columns(vec![("timestamp", vec![Value::from("2025-01-01")])])
            .unwrap();
        match clean_heart_rate(&df) {
            Err(DomainError::MissingRequiredField { dataset, field }) => {
                assert_eq!(dataset, DatasetKind::HeartRate);
                assert_eq!(field, "heart_rate");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rolling_window_of_five() {
        let values: Vec<f64> = (1..=7).map(f64::from).collect();
        let avg = rolling_mean(&values, 5);
        for (i, got) in avg.iter().enumerate() {
            let window = &values[i.saturating_sub(4)..=i];
            let expected = window.iter().sum::<f64>() / window.len() as f64;
            assert_eq!(*got, expected, "index {i}");
        }
        assert_eq!(avg[0], 1.0);
        assert_eq!(avg[6], 5.0);
        assert!(rolling_mean(&[], 5).is_empty());
    }

    #[test]
    fn test_clean_is_idempotent_and_pure() {
        let df = raw(
            &[Some("2025-01-01 00:00"), Some("2025-01-01 00:01"), None],
            &[Some("80"), Some("82"), Some("90")],
        );
        let before = df.clone();
        let first = clean_heart_rate(&df).unwrap();
        let second = clean_heart_rate(&df).unwrap();
        assert_eq!(first, second);
        assert_eq!(df, before);
    }

    #[test]
    fn test_cleaned_output_passes_quality() {
        let df = raw(
            &[
                Some("2025-01-01 00:00"),
                Some("2025-01-01 00:01"),
                Some("2025-01-01 00:02"),
            ],
            &[Some("80"), Some("81"), Some("82")],
        );
        let cleaned = records_to_dataset(&clean_heart_rate(&df).unwrap()).unwrap();
        let checks = QualityChecker::default()
            .assess(&cleaned, DatasetKind::HeartRate)
            .unwrap();
        assert_eq!(checks.total(), 0);
        assert_eq!(
            cleaned.columns(),
            ["timestamp", "heart_rate", "hr_rolling_avg"]
        );
    }
}
