// vitals-core/src/domain/dataset/mod.rs

pub mod kind;
pub mod value;

pub use kind::{DatasetKind, RangeRule};
pub use value::{TIMESTAMP_FORMAT, Value};

use crate::domain::error::DomainError;
use std::collections::HashSet;

/// Name of the time column shared by every dataset kind.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Storage type declared for a column. Raw sources carry none; cleaned tables do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Timestamp,
    Float,
    Text,
}

/// An ordered, immutable table of named columns.
///
/// Every row holds exactly one cell per column; the constructors reject any other shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    column_types: Option<Vec<ColumnType>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(DomainError::SchemaError(format!(
                "Duplicate column '{}'",
                dup
            )));
        }

        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(DomainError::SchemaError(format!(
                "Row {} has {} cells, expected {} ({})",
                idx,
                row.len(),
                columns.len(),
                columns.join(", ")
            )));
        }

        Ok(Self {
            columns,
            rows,
            column_types: None,
        })
    }

    /// Declares one storage type per column, so an empty dataset still has a schema.
    pub fn with_column_types(mut self, types: Vec<ColumnType>) -> Result<Self, DomainError> {
        if types.len() != self.columns.len() {
            return Err(DomainError::SchemaError(format!(
                "{} column types declared for {} columns ({})",
                types.len(),
                self.columns.len(),
                self.columns.join(", ")
            )));
        }
        self.column_types = Some(types);
        Ok(self)
    }

    /// Builds a dataset from column vectors, the way tabular sources are usually described.
    pub fn from_columns<S: Into<String>>(
        columns: Vec<(S, Vec<Value>)>,
    ) -> Result<Self, DomainError> {
        let height = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut cells: Vec<std::vec::IntoIter<Value>> = Vec::with_capacity(columns.len());

        for (name, values) in columns {
            let name = name.into();
            if values.len() != height {
                return Err(DomainError::SchemaError(format!(
                    "Column '{}' has {} values, expected {}",
                    name,
                    values.len(),
                    height
                )));
            }
            names.push(name);
            cells.push(values.into_iter());
        }

        let rows = (0..height)
            .map(|_| cells.iter_mut().filter_map(Iterator::next).collect())
            .collect();

        Self::new(names, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column_types(&self) -> Option<&[ColumnType]> {
        self.column_types.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, DomainError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| {
                DomainError::SchemaError(format!(
                    "Column '{}' not found. Available: [{}]",
                    name,
                    self.columns.join(", ")
                ))
            })
    }

    /// Iterates over the cells of one column, in row order.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_, DomainError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }
}
