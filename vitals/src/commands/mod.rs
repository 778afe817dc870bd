// vitals/src/commands/mod.rs

pub mod check;
pub mod inspect;
pub mod run;

use anyhow::Context;
use std::path::Path;
use vitals_core::infrastructure::adapters::duckdb::DuckDBConnector;
use vitals_core::infrastructure::config::{ProjectConfig, load_or_default};

/// Loads the project configuration and opens the database it points to.
pub(crate) fn bootstrap(
    project_dir: &Path,
    defaults: bool,
) -> anyhow::Result<(ProjectConfig, DuckDBConnector)> {
    println!("⚙️  Loading configuration...");
    let config = load_or_default(project_dir, defaults).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);
    tracing::debug!(config = ?config, "Resolved project configuration");

    let db_path = config.database_path(project_dir);
    let connector = DuckDBConnector::new(&db_path)
        .with_context(|| format!("Failed to initialize DuckDB at {}", db_path))?;
    println!("   Engine: DuckDB 🦆 ({})", db_path);

    Ok((config, connector))
}
