// vitals-core/src/domain/transform/steps.rs

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::Serialize;

use super::{TabularRecord, required_column};
use crate::domain::dataset::{ColumnType, Dataset, DatasetKind, TIMESTAMP_COLUMN, Value};
use crate::domain::error::DomainError;
use crate::domain::rules::ValidationRules;

/// Steps summed over one clock hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyStepsRecord {
    pub timestamp: NaiveDateTime,
    pub steps: f64,
}

impl TabularRecord for HourlyStepsRecord {
    const COLUMNS: &'static [&'static str] = &["timestamp", "steps"];
    const COLUMN_TYPES: &'static [ColumnType] = &[ColumnType::Timestamp, ColumnType::Float];

    fn cells(&self) -> Vec<Value> {
        vec![Value::Timestamp(self.timestamp), Value::Float(self.steps)]
    }
}

#[derive(Debug, Clone, Default)]
pub struct StepsCleaner {
    rules: ValidationRules,
}

impl StepsCleaner {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Coerce, drop negative and incomplete rows, then sum per hour (ascending).
    pub fn clean(&self, raw: &Dataset) -> Result<Vec<HourlyStepsRecord>, DomainError> {
        let kind = DatasetKind::Steps;
        let ts_idx = required_column(raw, kind, TIMESTAMP_COLUMN)?;
        let steps_idx = required_column(raw, kind, kind.numeric_column())?;
        let rule = self.rules.range_rule(kind);

        let mut hourly: BTreeMap<NaiveDateTime, f64> = BTreeMap::new();

        let retained = raw
            .rows()
            .iter()
            .map(|row| (row[ts_idx].as_timestamp(), row[steps_idx].as_number()))
            .filter(|(_, steps)| steps.is_none_or(|v| rule.accepts(v)))
            .filter_map(|(ts, steps)| Some((ts?, steps?)));

        for (ts, steps) in retained {
            *hourly.entry(floor_to_hour(ts)).or_insert(0.0) += steps;
        }

        if hourly.is_empty() {
            return Err(DomainError::EmptyResult { dataset: kind });
        }

        Ok(hourly
            .into_iter()
            .map(|(timestamp, steps)| HourlyStepsRecord { timestamp, steps })
            .collect())
    }
}

/// Start of the clock hour containing `ts`.
pub fn floor_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(ts.hour()))
}

/// Cleans and aggregates steps with the default rules.
pub fn clean_steps(raw: &Dataset) -> Result<Vec<HourlyStepsRecord>, DomainError> {
    StepsCleaner::default().clean(raw)
}
