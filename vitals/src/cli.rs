// vitals/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Health analytics batch pipeline (heart rate & steps)", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the full pipeline (Extract -> Quality -> Transform -> Quality -> Load)
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Use the built-in configuration when no vitals.yaml is found
        #[arg(long)]
        defaults: bool,
    },

    /// 🩺 Extracts the raw sources and writes the raw quality report only
    Check {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Use the built-in configuration when no vitals.yaml is found
        #[arg(long)]
        defaults: bool,
    },

    /// 🔍 Inspects a loaded table (schema + sample rows)
    Inspect {
        /// Path to the DuckDB database file
        #[arg(long, default_value = "db/health.duckdb")]
        db_path: String,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}
