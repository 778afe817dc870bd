// vitals-core/src/application/mod.rs

pub mod pipeline;
pub mod quality;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI fait simplement `use vitals_core::application::{run_pipeline, run_quality_check};`

pub use pipeline::{
    RUN_RESULTS_FILE, RunResult, Stage, StageOutcome, StageStatus, run_pipeline, run_quality_check,
};
pub use quality::generate_quality_report;
