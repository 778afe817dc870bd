// vitals-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::Value as SqlValue;
use duckdb::{Config, Connection, params_from_iter};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

// Imports Hexagonaux
use crate::domain::dataset::{ColumnType, Dataset, TIMESTAMP_FORMAT, Value};
use crate::domain::project::configuration::IN_MEMORY_DATABASE;
use crate::error::VitalsError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{ColumnSchema, Connector};

pub struct DuckDBConnector {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == IN_MEMORY_DATABASE {
            Connection::open_in_memory_with_flags(config)?
        } else {
            if let Some(parent) = Path::new(db_path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, VitalsError> {
        self.conn
            .lock()
            .map_err(|_| InfrastructureError::Database(DatabaseError::Poisoned).into())
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn sql_type(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Timestamp => "TIMESTAMP",
        ColumnType::Float => "DOUBLE",
        ColumnType::Text => "VARCHAR",
    }
}

/// `CREATE OR REPLACE` and `INSERT` statements for one table. Columns without a
/// declared type are stored as text, the way sources are read.
fn load_statements(table_name: &str, dataset: &Dataset) -> (String, String) {
    let table = quote_ident(table_name);
    let types: Vec<&str> = match dataset.column_types() {
        Some(types) => types.iter().copied().map(sql_type).collect(),
        None => vec![sql_type(ColumnType::Text); dataset.columns().len()],
    };

    let ddl = dataset
        .columns()
        .iter()
        .zip(&types)
        .map(|(name, ty)| format!("{} {}", quote_ident(name), ty))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = types
        .iter()
        .map(|ty| format!("CAST(? AS {})", ty))
        .collect::<Vec<_>>()
        .join(", ");

    (
        format!("CREATE OR REPLACE TABLE {} ({})", table, ddl),
        format!("INSERT INTO {} VALUES ({})", table, placeholders),
    )
}

fn row_count(conn: &Connection, table_name: &str) -> Result<u64, VitalsError> {
    let value: i64 = conn.query_row(
        &format!("SELECT count(*) FROM {}", quote_ident(table_name)),
        [],
        |row| row.get(0),
    )?;
    u64::try_from(value)
        .map_err(|_| VitalsError::InternalError(format!("Negative row count: {}", value)))
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Int(v) => SqlValue::BigInt(*v),
        Value::Float(v) if v.is_nan() => SqlValue::Null,
        Value::Float(v) => SqlValue::Double(*v),
        // bound as text, cast by the INSERT
        Value::Timestamp(ts) => SqlValue::Text(ts.format(TIMESTAMP_FORMAT).to_string()),
        Value::Text(s) => SqlValue::Text(s.clone()),
    }
}

#[async_trait]
impl Connector for DuckDBConnector {
    async fn execute(&self, query: &str) -> Result<(), VitalsError> {
        let conn = self.lock()?;
        conn.execute(query, []).map(|_rows| ())?;
        Ok(())
    }

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, VitalsError> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!(
            "PRAGMA table_info({})",
            quote_literal(table_name)
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(ColumnSchema {
                name: row.get("name")?,
                data_type: row.get("type")?,
                is_nullable: !row.get::<_, bool>("notnull")?,
            })
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }

        Ok(columns)
    }

    #[instrument(skip(self))]
    async fn register_source(&self, name: &str, path: &str) -> Result<(), VitalsError> {
        if !Path::new(path).exists() {
            return Err(InfrastructureError::SourceNotFound(path.to_string()).into());
        }

        let query = format!(
            "CREATE OR REPLACE VIEW {} AS SELECT * FROM read_csv_auto({}, header = true, all_varchar = true)",
            quote_ident(name),
            quote_literal(path)
        );
        self.execute(&query).await
    }

    #[instrument(skip(self))]
    async fn fetch_dataset(&self, table_name: &str) -> Result<Dataset, VitalsError> {
        let columns: Vec<String> = self
            .fetch_columns(table_name)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();

        if columns.is_empty() {
            return Err(VitalsError::InternalError(format!(
                "Relation '{}' has no columns",
                table_name
            )));
        }

        // Everything comes back as text; coercion is the domain's job.
        let select_list = columns
            .iter()
            .map(|c| format!("CAST({0} AS VARCHAR) AS {0}", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(", ");

        let rows = {
            let conn = self.lock()?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM {}",
                select_list,
                quote_ident(table_name)
            ))?;
            let width = columns.len();
            let mapped = stmt.query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, Option<String>>(i).map(Value::from))
                    .collect::<Result<Vec<Value>, _>>()
            })?;
            mapped.collect::<Result<Vec<_>, _>>()?
        };

        debug!(rows = rows.len(), "Fetched relation");
        Ok(Dataset::new(columns, rows)?)
    }

    #[instrument(skip_all, fields(tables = tables.len()))]
    async fn load_tables(&self, tables: &[(&str, &Dataset)]) -> Result<Vec<u64>, VitalsError> {
        let mut conn = self.lock()?;
        // dropped without commit on any error, which rolls every table back
        let tx = conn.transaction()?;
        let mut counts = Vec::with_capacity(tables.len());

        for (table_name, dataset) in tables {
            let (create, insert) = load_statements(table_name, dataset);
            tx.execute_batch(&create)?;
            {
                let mut stmt = tx.prepare(&insert)?;
                for row in dataset.rows() {
                    stmt.execute(params_from_iter(row.iter().map(to_sql)))?;
                }
            }
            let count = row_count(&tx, table_name)?;
            debug!(table = %table_name, rows = count, "Table replaced");
            counts.push(count);
        }

        tx.commit()?;
        Ok(counts)
    }

    async fn query_scalar(&self, query: &str) -> Result<u64, VitalsError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;

        let row = rows
            .next()?
            .ok_or_else(|| VitalsError::InternalError("No scalar value returned".into()))?;

        let value: i64 = row.get(0)?;
        u64::try_from(value)
            .map_err(|_| VitalsError::InternalError(format!("Negative scalar value: {}", value)))
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
