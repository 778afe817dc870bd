// vitals-core/src/application/pipeline.rs

use std::fmt;
use std::future::{self, Future};
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::application::quality::generate_quality_report;
use crate::domain::dataset::{Dataset, DatasetKind};
use crate::domain::project::ProjectConfig;
use crate::domain::quality::{QualityChecker, QualityReport, QualityStatus};
use crate::domain::transform::{HeartRateCleaner, StepsCleaner, records_to_dataset};
use crate::error::{ErrorKind, VitalsError};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::artifact::ArtifactSink;
use crate::ports::connector::Connector;
use crate::ports::observer::PipelineObserver;

pub const RUN_RESULTS_FILE: &str = "run_results.json";

/// Position of a run in its fixed five-stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Extract,
    QualityRaw,
    Transform,
    QualityClean,
    Load,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Extract,
        Stage::QualityRaw,
        Stage::Transform,
        Stage::QualityClean,
        Stage::Load,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Extract => "extract",
            Stage::QualityRaw => "quality_raw",
            Stage::Transform => "transform",
            Stage::QualityClean => "quality_clean",
            Stage::Load => "load",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Success,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageOutcome {
    pub stage: Stage,
    pub status: StageStatus,
    pub attempts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowCounts {
    pub raw_heart_rate: Option<usize>,
    pub raw_steps: Option<usize>,
    pub clean_heart_rate: Option<usize>,
    pub clean_steps: Option<usize>,
    pub loaded_heart_rate: Option<u64>,
    pub loaded_steps: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunFailure {
    pub stage: Option<Stage>,
    pub kind: ErrorKind,
    pub message: String,
}

/// Summary of one run, persisted as `run_results.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub success: bool,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub stages: Vec<StageOutcome>,
    pub rows: RowCounts,
    pub raw_quality: Option<QualityStatus>,
    pub clean_quality: Option<QualityStatus>,
    pub error: Option<RunFailure>,
}

impl RunResult {
    fn start() -> Self {
        Self {
            success: false,
            started_at: Utc::now(),
            duration_secs: 0.0,
            stages: Vec::with_capacity(Stage::ALL.len()),
            rows: RowCounts::default(),
            raw_quality: None,
            clean_quality: None,
            error: None,
        }
    }

    fn finish(&mut self, error: Option<&VitalsError>, elapsed: f64) {
        self.duration_secs = elapsed;
        self.success = error.is_none();
        self.error = error.map(|e| RunFailure {
            stage: e.stage(),
            kind: e.kind(),
            message: e.to_string(),
        });

        // Stages never reached are reported as skipped.
        for stage in Stage::ALL {
            if !self.stages.iter().any(|o| o.stage == stage) {
                self.stages.push(StageOutcome {
                    stage,
                    status: StageStatus::Skipped,
                    attempts: 0,
                });
            }
        }
    }
}

struct RawData {
    heart_rate: Dataset,
    steps: Dataset,
}

/// Cleaned outputs, already shaped as the typed tables that get loaded.
struct CleanData {
    heart_rate: Dataset,
    steps: Dataset,
}

/// Runs Extract → QualityRaw → Transform → QualityClean → Load, retrying each stage
/// on failure, and records the outcome in `run_results.json` whatever happens.
pub async fn run_pipeline(
    project_dir: &Path,
    config: &ProjectConfig,
    connector: &dyn Connector,
    sink: &dyn ArtifactSink,
    observer: &dyn PipelineObserver,
) -> Result<RunResult, VitalsError> {
    let pipeline = Pipeline {
        project_dir,
        config,
        connector,
        sink,
        observer,
        checker: QualityChecker::new(config.rules.clone()),
    };
    pipeline.run().await
}

/// Extract and raw quality report only; nothing is cleaned or loaded.
pub async fn run_quality_check(
    project_dir: &Path,
    config: &ProjectConfig,
    connector: &dyn Connector,
    sink: &dyn ArtifactSink,
    observer: &dyn PipelineObserver,
) -> Result<QualityReport, VitalsError> {
    let pipeline = Pipeline {
        project_dir,
        config,
        connector,
        sink,
        observer,
        checker: QualityChecker::new(config.rules.clone()),
    };
    let mut scratch = RunResult::start();

    let raw = pipeline
        .stage(&mut scratch, Stage::Extract, || pipeline.extract())
        .await?;
    pipeline
        .stage(&mut scratch, Stage::QualityRaw, || {
            future::ready(pipeline.quality(&raw.heart_rate, &raw.steps, &config.reports.raw))
        })
        .await
}

struct Pipeline<'a> {
    project_dir: &'a Path,
    config: &'a ProjectConfig,
    connector: &'a dyn Connector,
    sink: &'a dyn ArtifactSink,
    observer: &'a dyn PipelineObserver,
    checker: QualityChecker,
}

impl Pipeline<'_> {
    #[instrument(skip_all, fields(project = %self.config.name))]
    async fn run(&self) -> Result<RunResult, VitalsError> {
        let clock = Instant::now();
        let mut result = RunResult::start();
        self.observer.record(
            "pipeline_started",
            &[
                ("project", self.config.name.clone()),
                ("engine", self.connector.engine_name().to_string()),
            ],
        );

        let outcome = self.execute(&mut result).await;
        result.finish(outcome.as_ref().err(), clock.elapsed().as_secs_f64());

        match &outcome {
            Ok(()) => self.observer.record(
                "pipeline_finished",
                &[("duration_secs", format!("{:.3}", result.duration_secs))],
            ),
            Err(e) => self.observer.record(
                "pipeline_failed",
                &[
                    ("stage", e.stage().map(|s| s.to_string()).unwrap_or_default()),
                    ("kind", e.kind().to_string()),
                ],
            ),
        }

        self.save_run_results(&result);
        outcome.map(|()| result)
    }

    async fn execute(&self, result: &mut RunResult) -> Result<(), VitalsError> {
        let raw = self
            .stage(result, Stage::Extract, || self.extract())
            .await?;
        result.rows.raw_heart_rate = Some(raw.heart_rate.len());
        result.rows.raw_steps = Some(raw.steps.len());

        let raw_report = self
            .stage(result, Stage::QualityRaw, || {
                future::ready(self.quality(&raw.heart_rate, &raw.steps, &self.config.reports.raw))
            })
            .await?;
        result.raw_quality = Some(raw_report.status);

        let clean = self
            .stage(result, Stage::Transform, || future::ready(self.transform(&raw)))
            .await?;
        result.rows.clean_heart_rate = Some(clean.heart_rate.len());
        result.rows.clean_steps = Some(clean.steps.len());

        let clean_report = self
            .stage(result, Stage::QualityClean, || {
                future::ready(self.quality(
                    &clean.heart_rate,
                    &clean.steps,
                    &self.config.reports.clean,
                ))
            })
            .await?;
        result.clean_quality = Some(clean_report.status);

        let (loaded_hr, loaded_steps) = self
            .stage(result, Stage::Load, || self.load(&clean))
            .await?;
        result.rows.loaded_heart_rate = Some(loaded_hr);
        result.rows.loaded_steps = Some(loaded_steps);

        Ok(())
    }

    /// Runs `op` until it succeeds or the retry budget is spent, recording the outcome.
    async fn stage<T, F, Fut>(
        &self,
        result: &mut RunResult,
        stage: Stage,
        mut op: F,
    ) -> Result<T, VitalsError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, VitalsError>>,
    {
        let policy = &self.config.retry;
        let max_attempts = policy.max_attempts();
        let mut attempt = 1;

        loop {
            self.observer.record(
                "stage_started",
                &[("stage", stage.to_string()), ("attempt", attempt.to_string())],
            );

            match op().await {
                Ok(value) => {
                    self.observer.record(
                        "stage_succeeded",
                        &[("stage", stage.to_string()), ("attempts", attempt.to_string())],
                    );
                    result.stages.push(StageOutcome {
                        stage,
                        status: StageStatus::Success,
                        attempts: attempt,
                    });
                    return Ok(value);
                }
                Err(e) if attempt < max_attempts => {
                    self.observer.record(
                        "stage_retry",
                        &[
                            ("stage", stage.to_string()),
                            ("attempt", attempt.to_string()),
                            ("kind", e.kind().to_string()),
                            ("error", e.to_string()),
                        ],
                    );
                    tokio::time::sleep(policy.delay()).await;
                    attempt += 1;
                }
                Err(e) => {
                    self.observer.record(
                        "stage_failed",
                        &[
                            ("stage", stage.to_string()),
                            ("attempts", attempt.to_string()),
                            ("kind", e.kind().to_string()),
                            ("error", e.to_string()),
                        ],
                    );
                    result.stages.push(StageOutcome {
                        stage,
                        status: StageStatus::Failed,
                        attempts: attempt,
                    });
                    return Err(VitalsError::StageFailed {
                        stage,
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
            }
        }
    }

    async fn extract(&self) -> Result<RawData, VitalsError> {
        let heart_rate = self
            .extract_one(DatasetKind::HeartRate, &self.config.sources.heart_rate)
            .await?;
        let steps = self
            .extract_one(DatasetKind::Steps, &self.config.sources.steps)
            .await?;
        Ok(RawData { heart_rate, steps })
    }

    async fn extract_one(&self, kind: DatasetKind, source: &str) -> Result<Dataset, VitalsError> {
        let view = format!("raw_{}", kind.table_name());
        let path = self.config.resolve(self.project_dir, source);

        self.connector
            .register_source(&view, &path.to_string_lossy())
            .await?;
        let dataset = self.connector.fetch_dataset(&view).await?;

        self.observer.record(
            "rows_extracted",
            &[("dataset", kind.to_string()), ("rows", dataset.len().to_string())],
        );
        Ok(dataset)
    }

    fn quality(
        &self,
        heart_rate: &Dataset,
        steps: &Dataset,
        name: &str,
    ) -> Result<QualityReport, VitalsError> {
        let report = generate_quality_report(&self.checker, heart_rate, steps, self.sink, name)?;
        self.observer.record(
            "quality_report",
            &[
                ("report", name.to_string()),
                ("status", report.status.to_string()),
                ("issues", report.total_issues().to_string()),
            ],
        );
        Ok(report)
    }

    fn transform(&self, raw: &RawData) -> Result<CleanData, VitalsError> {
        let rules = &self.config.rules;
        let heart_rate =
            records_to_dataset(&HeartRateCleaner::new(rules.clone()).clean(&raw.heart_rate)?)?;
        let steps = records_to_dataset(&StepsCleaner::new(rules.clone()).clean(&raw.steps)?)?;

        self.observer.record(
            "rows_cleaned",
            &[
                ("heart_rate", heart_rate.len().to_string()),
                ("steps", steps.len().to_string()),
            ],
        );
        Ok(CleanData { heart_rate, steps })
    }

    /// Both tables are replaced in one unit, so a failed load never mixes runs.
    async fn load(&self, clean: &CleanData) -> Result<(u64, u64), VitalsError> {
        let counts = self
            .connector
            .load_tables(&[
                (DatasetKind::HeartRate.table_name(), &clean.heart_rate),
                (DatasetKind::Steps.table_name(), &clean.steps),
            ])
            .await?;
        let (hr, st) = match counts[..] {
            [hr, st] => (hr, st),
            _ => {
                return Err(VitalsError::InternalError(format!(
                    "Expected 2 row counts, got {}",
                    counts.len()
                )));
            }
        };

        self.observer.record(
            "rows_loaded",
            &[("heart_rate", hr.to_string()), ("steps", st.to_string())],
        );
        Ok((hr, st))
    }

    // A run whose summary cannot be written still reports its real outcome.
    fn save_run_results(&self, result: &RunResult) {
        let written = serde_json::to_string_pretty(result)
            .map_err(InfrastructureError::from)
            .and_then(|content| self.sink.write_artifact(RUN_RESULTS_FILE, &content));

        if let Err(e) = written {
            warn!(error = %e, "Could not write {}", RUN_RESULTS_FILE);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::{ColumnType, Value};
    use crate::domain::error::DomainError;
    use crate::domain::project::RetryPolicy;
    use crate::infrastructure::artifacts::ArtifactStore;
    use crate::ports::connector::ColumnSchema;
    use crate::ports::observer::NoopObserver;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// In-memory connector: sources are served from fixtures keyed by file name,
    /// loaded tables are kept for inspection.
    #[derive(Default)]
    struct MockConnector {
        fixtures: HashMap<String, Dataset>,
        views: Mutex<HashMap<String, String>>,
        tables: Mutex<HashMap<String, Dataset>>,
        // Number of extract calls that fail before the source becomes readable.
        flaky_reads: AtomicU32,
        register_calls: AtomicU32,
        load_batches: AtomicU32,
    }

    impl MockConnector {
        fn with_sources(heart_rate: Dataset, steps: Dataset) -> Self {
            let mut fixtures = HashMap::new();
            fixtures.insert("raw_heart_rate.csv".to_string(), heart_rate);
            fixtures.insert("raw_steps.csv".to_string(), steps);
            Self {
                fixtures,
                ..Default::default()
            }
        }

        fn table(&self, name: &str) -> Option<Dataset> {
            self.tables.lock().unwrap().get(name).cloned()
        }
    }

    #[async_trait]
    impl Connector for MockConnector {
        async fn execute(&self, _query: &str) -> Result<(), VitalsError> {
            Ok(())
        }

        async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, VitalsError> {
            let tables = self.tables.lock().unwrap();
            let ds = tables
                .get(table_name)
                .ok_or_else(|| VitalsError::InternalError(format!("no table {table_name}")))?;
            Ok(ds
                .columns()
                .iter()
                .map(|c| ColumnSchema {
                    name: c.clone(),
                    data_type: "VARCHAR".into(),
                    is_nullable: true,
                })
                .collect())
        }

        async fn register_source(&self, name: &str, path: &str) -> Result<(), VitalsError> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            self.views
                .lock()
                .unwrap()
                .insert(name.to_string(), path.to_string());
            Ok(())
        }

        async fn fetch_dataset(&self, table_name: &str) -> Result<Dataset, VitalsError> {
            if self
                .flaky_reads
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(VitalsError::InternalError("transient read error".into()));
            }
            let path = self.views.lock().unwrap().get(table_name).cloned();
            let file = path
                .as_deref()
                .and_then(|p| Path::new(p).file_name())
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.fixtures
                .get(&file)
                .cloned()
                .ok_or_else(|| VitalsError::InternalError(format!("no fixture for {table_name}")))
        }

        async fn load_tables(
            &self,
            tables: &[(&str, &Dataset)],
        ) -> Result<Vec<u64>, VitalsError> {
            self.load_batches.fetch_add(1, Ordering::SeqCst);
            let mut stored = self.tables.lock().unwrap();
            Ok(tables
                .iter()
                .map(|(name, dataset)| {
                    stored.insert(name.to_string(), (*dataset).clone());
                    dataset.len() as u64
                })
                .collect())
        }

        async fn query_scalar(&self, _query: &str) -> Result<u64, VitalsError> {
            Ok(0)
        }

        fn engine_name(&self) -> &str {
            "mock"
        }
    }

    /// Collects event names, to check what the orchestrator reports.
    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl PipelineObserver for RecordingObserver {
        fn record(&self, event: &str, _fields: &[(&str, String)]) {
            self.events.lock().unwrap().push(event.to_string());
        }
    }

    fn text_column(values: &[Option<&str>]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    fn raw_heart_rate() -> Dataset {
        Dataset::from_columns(vec![
            (
                "timestamp",
                text_column(&[
                    Some("2025-01-01 00:00:00"),
                    Some("2025-01-01 00:01:00"),
                    Some("2025-01-01 00:02:00"),
                    Some("bad"),
                ]),
            ),
            (
                "heart_rate",
                text_column(&[Some("80"), Some("300"), Some("90"), Some("85")]),
            ),
        ])
        .unwrap()
    }

    fn raw_steps() -> Dataset {
        Dataset::from_columns(vec![
            (
                "timestamp",
                text_column(&[
                    Some("2025-01-01 00:10:00"),
                    Some("2025-01-01 00:50:00"),
                    Some("2025-01-01 01:05:00"),
                ]),
            ),
            ("steps", text_column(&[Some("10"), Some("-5"), Some("7")])),
        ])
        .unwrap()
    }

    fn config(max_retries: u32) -> ProjectConfig {
        ProjectConfig {
            retry: RetryPolicy {
                max_retries,
                delay_secs: 0,
            },
            ..ProjectConfig::default()
        }
    }

    #[tokio::test]
    async fn test_full_run_loads_cleaned_tables() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sink = ArtifactStore::new(dir.path().join("target"));
        let connector = MockConnector::with_sources(raw_heart_rate(), raw_steps());
        let observer = RecordingObserver::default();

        let result = run_pipeline(dir.path(), &config(0), &connector, &sink, &observer).await?;

        assert!(result.success);
        assert_eq!(result.raw_quality, Some(QualityStatus::Fail));
        assert_eq!(result.clean_quality, Some(QualityStatus::Pass));
        assert_eq!(result.rows.raw_heart_rate, Some(4));
        assert_eq!(result.rows.clean_heart_rate, Some(2));
        assert_eq!(result.rows.clean_steps, Some(2));
        assert!(result.stages.iter().all(|s| s.status == StageStatus::Success));

        let hr = connector.table("heart_rate").expect("heart_rate loaded");
        assert_eq!(hr.columns(), ["timestamp", "heart_rate", "hr_rolling_avg"]);
        assert_eq!(
            hr.column_types(),
            Some(&[ColumnType::Timestamp, ColumnType::Float, ColumnType::Float][..])
        );
        assert_eq!(connector.load_batches.load(Ordering::SeqCst), 1);
        let steps = connector.table("steps").expect("steps loaded");
        let totals: Vec<Option<f64>> = steps.column("steps")?.map(Value::as_number).collect();
        assert_eq!(totals, [Some(10.0), Some(7.0)]);

        for name in ["quality_raw.json", "quality_clean.json", RUN_RESULTS_FILE] {
            assert!(dir.path().join("target").join(name).exists(), "{name} missing");
        }

        let events = observer.events.lock().unwrap();
        assert_eq!(events.first().map(String::as_str), Some("pipeline_started"));
        assert_eq!(events.last().map(String::as_str), Some("pipeline_finished"));
        Ok(())
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sink = ArtifactStore::new(dir.path());
        let connector = MockConnector::with_sources(raw_heart_rate(), raw_steps());
        connector.flaky_reads.store(2, Ordering::SeqCst);
        let observer = RecordingObserver::default();

        let result = run_pipeline(dir.path(), &config(3), &connector, &sink, &observer).await?;

        assert!(result.success);
        assert_eq!(result.stages[0].stage, Stage::Extract);
        assert_eq!(result.stages[0].attempts, 3);
        let retries = observer
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| *e == "stage_retry")
            .count();
        assert_eq!(retries, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_exhausted_retries_fail_the_stage() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sink = ArtifactStore::new(dir.path());
        let connector = MockConnector::with_sources(raw_heart_rate(), raw_steps());
        connector.flaky_reads.store(10, Ordering::SeqCst);

        let err = run_pipeline(dir.path(), &config(1), &connector, &sink, &NoopObserver)
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Extract));
        assert!(matches!(err, VitalsError::StageFailed { attempts: 2, .. }));
        assert!(connector.table("heart_rate").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_guardrail_failure_skips_load() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sink = ArtifactStore::new(dir.path());
        let hr = Dataset::from_columns(vec![
            (
                "timestamp",
                text_column(&[
                    Some("2025-01-01 00:00:00"),
                    Some("2025-01-01 00:01:00"),
                    Some("2025-01-01 00:02:00"),
                ]),
            ),
            ("heart_rate", text_column(&[Some("10"), Some("500"), Some("80")])),
        ])?;
        let connector = MockConnector::with_sources(hr, raw_steps());

        let err = run_pipeline(dir.path(), &config(1), &connector, &sink, &NoopObserver)
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Transform));
        assert_eq!(err.kind(), ErrorKind::ExcessiveDataLoss);
        let VitalsError::StageFailed { source, .. } = &err else {
            panic!("expected a stage failure, got {err}");
        };
        assert!(matches!(
            **source,
            VitalsError::Domain(DomainError::ExcessiveDataLoss {
                retained: 1,
                original: 3,
                ..
            })
        ));
        assert!(connector.table("heart_rate").is_none());
        assert!(connector.table("steps").is_none());

        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join(RUN_RESULTS_FILE))?)?;
        assert_eq!(summary["success"], false);
        assert_eq!(summary["error"]["stage"], "transform");
        assert_eq!(summary["error"]["kind"], "excessive_data_loss");
        assert_eq!(summary["stages"][4]["status"], "skipped");
        Ok(())
    }

    #[tokio::test]
    async fn test_check_only_writes_raw_report() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sink = ArtifactStore::new(dir.path());
        let connector = MockConnector::with_sources(raw_heart_rate(), raw_steps());

        let report =
            run_quality_check(dir.path(), &config(0), &connector, &sink, &NoopObserver).await?;

        assert_eq!(report.status, QualityStatus::Fail);
        assert_eq!(report.heart_rate_checks.invalid_timestamps, 1);
        assert_eq!(report.steps_checks.range.count(), 1);
        assert!(dir.path().join("quality_raw.json").exists());
        assert!(!dir.path().join("quality_clean.json").exists());
        assert!(connector.table("heart_rate").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_transform_yields_typed_tables() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sink = ArtifactStore::new(dir.path());
        let config = config(0);
        let connector = MockConnector::default();
        let pipeline = Pipeline {
            project_dir: dir.path(),
            config: &config,
            connector: &connector,
            sink: &sink,
            observer: &NoopObserver,
            checker: QualityChecker::default(),
        };
        let raw = RawData {
            heart_rate: Dataset::new(vec!["timestamp".into(), "heart_rate".into()], vec![])?,
            steps: raw_steps(),
        };

        let mut result = RunResult::start();
        let clean = pipeline
            .stage(&mut result, Stage::Transform, || {
                future::ready(pipeline.transform(&raw))
            })
            .await?;

        assert!(clean.heart_rate.is_empty());
        assert_eq!(
            clean.heart_rate.column_types().map(<[ColumnType]>::len),
            Some(3)
        );
        assert_eq!(
            clean.steps.column_types(),
            Some(&[ColumnType::Timestamp, ColumnType::Float][..])
        );
        assert_eq!(result.stages.len(), 1);
        assert_eq!(result.stages[0].status, StageStatus::Success);
        Ok(())
    }

    #[test]
    fn test_stage_names() {
        let names: Vec<String> = Stage::ALL.iter().map(Stage::to_string).collect();
        assert_eq!(
            names,
            ["extract", "quality_raw", "transform", "quality_clean", "load"]
        );
    }
}
