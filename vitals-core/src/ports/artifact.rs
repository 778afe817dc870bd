// vitals-core/src/ports/artifact.rs

use crate::domain::quality::QualityReport;
use crate::infrastructure::error::InfrastructureError;
use std::path::PathBuf;

/// Destination for the JSON artifacts of a run (quality reports, run results).
pub trait ArtifactSink: Send + Sync {
    /// Where `name` ends up, whether or not it has been written yet.
    fn location(&self, name: &str) -> PathBuf;

    /// Stores `content` under `name`, replacing any previous artifact.
    fn write_artifact(&self, name: &str, content: &str) -> Result<PathBuf, InfrastructureError>;

    fn write_report(
        &self,
        name: &str,
        report: &QualityReport,
    ) -> Result<PathBuf, InfrastructureError> {
        let content = serde_json::to_string_pretty(report)?;
        self.write_artifact(name, &content)
    }
}
