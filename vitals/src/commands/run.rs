// vitals/src/commands/run.rs
//
// USE CASE: Run the full pipeline.

use std::path::PathBuf;

use vitals_core::VitalsError;
use vitals_core::application::{StageStatus, run_pipeline};
use vitals_core::infrastructure::artifacts::ArtifactStore;
use vitals_core::ports::observer::TracingObserver;

pub async fn execute(project_dir: PathBuf, defaults: bool) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let (config, connector) = super::bootstrap(&project_dir, defaults)?;
    let sink = ArtifactStore::new(config.target_dir(&project_dir));

    let result = run_pipeline(&project_dir, &config, &connector, &sink, &TracingObserver).await;

    match result {
        Ok(run_res) => {
            for outcome in run_res.stages.iter().filter(|o| o.status == StageStatus::Success) {
                println!("   ✔ {:<14} ({} attempt(s))", outcome.stage, outcome.attempts);
            }
            if let (Some(raw), Some(clean)) = (run_res.raw_quality, run_res.clean_quality) {
                println!("   Quality: raw {} → clean {}", raw, clean);
            }
            println!(
                "   Loaded: heart_rate={} steps={}",
                run_res.rows.loaded_heart_rate.unwrap_or_default(),
                run_res.rows.loaded_steps.unwrap_or_default()
            );
            println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    }

    Ok(())
}

pub(crate) fn report_failure(e: &VitalsError) {
    let stage = e
        .stage()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    eprintln!("\n💥 PIPELINE FAILED (stage: {}, kind: {})", stage, e.kind());
    eprintln!("   {}", e);
}
