// vitals/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug vitals run ... pour voir les détails
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: RUN PIPELINE ---
        Commands::Run {
            project_dir,
            defaults,
        } => commands::run::execute(project_dir, defaults).await,

        // --- USE CASE: RAW QUALITY CHECK ---
        Commands::Check {
            project_dir,
            defaults,
        } => commands::check::execute(project_dir, defaults).await,

        // --- USE CASE: INSPECT LOADED TABLE ---
        Commands::Inspect {
            db_path,
            table,
            limit,
        } => commands::inspect::execute(db_path, table, limit),
    }
}
