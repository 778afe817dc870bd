// vitals-core/src/domain/dataset/value.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

/// A single cell of a [`Dataset`](super::Dataset).
///
/// Raw sources hand everything over as `Text` (or `Null` for empty cells);
/// cleaned datasets carry typed `Float` and `Timestamp` values.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
    Text(String),
}

// Formats tried in order. Date-only inputs resolve to midnight.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Canonical timestamp rendering used when a value leaves the domain (reports, SQL).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Value {
    /// Null cells and NaN floats both count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Coerces the value to a point in time. `None` is the "missing" marker:
    /// nulls and unparseable inputs both end up there.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            Value::Text(raw) => parse_timestamp(raw),
            _ => None,
        }
    }

    /// Coerces the value to a finite number, `None` otherwise.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) if v.is_finite() => Some(*v),
            Value::Text(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Hashable identity of the cell, used for full-row equality.
    /// Floats compare by bit pattern after folding `-0.0` into `0.0`.
    pub(crate) fn fingerprint(&self) -> CellKey {
        match self {
            Value::Null => CellKey::Null,
            Value::Int(v) => CellKey::Int(*v),
            Value::Float(v) => {
                let v = if *v == 0.0 { 0.0 } else { *v };
                CellKey::Float(v.to_bits())
            }
            Value::Timestamp(ts) => CellKey::Timestamp(*ts),
            Value::Text(s) => CellKey::Text(s.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum CellKey {
    Null,
    Int(i64),
    Float(u64),
    Timestamp(NaiveDateTime),
    Text(String),
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // the offset is dropped: readings keep the wall-clock time they were taken at
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }

    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .find_map(|date| date.and_hms_opt(0, 0, 0))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Option<&str>> for Value {
    fn from(s: Option<&str>) -> Self {
        s.map(Value::from).unwrap_or(Value::Null)
    }
}

impl From<Option<String>> for Value {
    fn from(s: Option<String>) -> Self {
        s.map(Value::Text).unwrap_or(Value::Null)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(ts: NaiveDateTime) -> Self {
        Value::Timestamp(ts)
    }
}
