// vitals/src/commands/check.rs
//
// USE CASE: Raw quality report only (no cleaning, no load).

use std::path::PathBuf;

use vitals_core::application::run_quality_check;
use vitals_core::domain::quality::DatasetChecks;
use vitals_core::infrastructure::artifacts::ArtifactStore;
use vitals_core::ports::ArtifactSink;
use vitals_core::ports::observer::TracingObserver;

pub async fn execute(project_dir: PathBuf, defaults: bool) -> anyhow::Result<()> {
    let (config, connector) = super::bootstrap(&project_dir, defaults)?;
    let sink = ArtifactStore::new(config.target_dir(&project_dir));

    match run_quality_check(&project_dir, &config, &connector, &sink, &TracingObserver).await {
        Ok(report) => {
            print_checks("heart_rate", &report.heart_rate_checks);
            print_checks("steps", &report.steps_checks);
            println!(
                "\n📋 Quality status: {} ({})",
                report.status,
                sink.location(&config.reports.raw).display()
            );
        }
        Err(e) => {
            super::run::report_failure(&e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_checks(dataset: &str, checks: &DatasetChecks) {
    println!(
        "   {:<10} missing={} duplicates={} bad_timestamps={} bad_numbers={} range={}",
        dataset,
        checks.missing_values,
        checks.duplicate_rows,
        checks.invalid_timestamps,
        checks.invalid_numeric_values,
        checks.range.count()
    );
}
