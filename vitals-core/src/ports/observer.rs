// vitals-core/src/ports/observer.rs

/// Narrow logging seam for the orchestrator. The core never configures logging itself;
/// whoever drives the pipeline decides where events go.
pub trait PipelineObserver: Send + Sync {
    fn record(&self, event: &str, fields: &[(&str, String)]);
}

/// Forwards events to `tracing`. Failures go out as errors, retries as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn record(&self, event: &str, fields: &[(&str, String)]) {
        let rendered = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");

        if event.ends_with("_failed") {
            tracing::error!(event, "{}", rendered);
        } else if event.ends_with("_retry") {
            tracing::warn!(event, "{}", rendered);
        } else {
            tracing::info!(event, "{}", rendered);
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn record(&self, _event: &str, _fields: &[(&str, String)]) {}
}
