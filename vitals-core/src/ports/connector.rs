// vitals-core/src/ports/connector.rs

// What the pipeline needs from a relational engine: read raw sources in,
// write cleaned tables out. The adapter decides how.

use crate::domain::dataset::Dataset;
use crate::error::VitalsError;
use async_trait::async_trait;

// Struct simple pour décrire une colonne (indépendant de la DB)
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

#[async_trait]
pub trait Connector: Send + Sync {
    async fn execute(&self, query: &str) -> Result<(), VitalsError>;

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, VitalsError>;

    /// Exposes a CSV file as a queryable relation named `name`, every column as text.
    async fn register_source(&self, name: &str, path: &str) -> Result<(), VitalsError>;

    /// Reads a whole relation, in storage order.
    async fn fetch_dataset(&self, table_name: &str) -> Result<Dataset, VitalsError>;

    /// Replaces every `(table_name, dataset)` pair as one unit: either all tables hold
    /// their new content or none changed. Returns the stored row counts, in input order.
    async fn load_tables(&self, tables: &[(&str, &Dataset)]) -> Result<Vec<u64>, VitalsError>;

    /// Replaces `table_name` with the content of `dataset`. Returns the stored row count.
    async fn load_table(&self, table_name: &str, dataset: &Dataset) -> Result<u64, VitalsError> {
        self.load_tables(&[(table_name, dataset)])
            .await?
            .first()
            .copied()
            .ok_or_else(|| VitalsError::InternalError("No row count returned".into()))
    }

    async fn query_scalar(&self, query: &str) -> Result<u64, VitalsError>;

    fn engine_name(&self) -> &str;
}
