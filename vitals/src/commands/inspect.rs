// vitals/src/commands/inspect.rs
//
// USE CASE: Inspect a loaded table (schema + sample rows).

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use duckdb::{Connection, Row};
use std::path::Path;

pub fn execute(db_path: String, table: String, limit: usize) -> anyhow::Result<()> {
    if !Path::new(&db_path).exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'vitals run'?",
            db_path
        );
    }

    let conn = Connection::open(&db_path)?;
    let quoted = format!("\"{}\"", table.replace('"', "\"\""));

    println!("\n🔍 Inspecting Table: '{}'", table);

    // Schema
    let mut stmt_cols = conn.prepare(&format!(
        "PRAGMA table_info('{}')",
        table.replace('\'', "''")
    ))?;
    let columns: Vec<(String, String)> = stmt_cols
        .query_map([], |row: &Row| Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        anyhow::bail!("❌ Table '{}' not found in {}", table, db_path);
    }

    let mut schema = Table::new();
    schema.load_preset(UTF8_FULL);
    schema.set_header(vec!["column", "type"]);
    for (name, ty) in &columns {
        schema.add_row(vec![name.as_str(), ty.as_str()]);
    }
    println!("{schema}");

    let total: i64 =
        conn.query_row(&format!("SELECT count(*) FROM {}", quoted), [], |r| r.get(0))?;

    // Sample rows
    let mut sample = Table::new();
    sample.load_preset(UTF8_FULL);
    sample.set_header(columns.iter().map(|(name, _)| name.as_str()));

    // Rendered by DuckDB itself, so timestamps read the way they were loaded.
    let select_list = columns
        .iter()
        .map(|(name, _)| format!("CAST(\"{}\" AS VARCHAR)", name.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {} LIMIT {}",
        select_list, quoted, limit
    ))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let cells: Vec<String> = (0..columns.len())
            .map(|i| {
                row.get::<_, Option<String>>(i)
                    .map(|v| v.unwrap_or_else(|| "NULL".to_string()))
                    .unwrap_or_else(|_| "ERROR".to_string())
            })
            .collect();
        sample.add_row(cells);
    }

    let shown = limit.min(usize::try_from(total).unwrap_or(0));
    println!("   --- Rows ({} of {}) ---", shown, total);
    println!("{sample}");

    Ok(())
}
