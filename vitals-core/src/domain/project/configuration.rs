// src/domain/project/configuration.rs

use crate::domain::rules::ValidationRules;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub sources: SourcePaths,

    /// DuckDB file receiving the cleaned tables (`:memory:` is accepted).
    #[serde(default = "default_database")]
    pub database: String,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(default)]
    pub reports: ReportNames,

    #[serde(default)]
    #[validate(nested)]
    pub rules: ValidationRules,

    #[serde(default)]
    pub retry: RetryPolicy,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "health_analytics".to_string(),
            version: default_version(),
            sources: SourcePaths::default(),
            database: default_database(),
            target_path: default_target_path(),
            reports: ReportNames::default(),
            rules: ValidationRules::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ProjectConfig {
    /// Joins a configured path onto the project directory unless it is already absolute.
    pub fn resolve(&self, project_dir: &Path, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            project_dir.join(p)
        }
    }

    pub fn target_dir(&self, project_dir: &Path) -> PathBuf {
        self.resolve(project_dir, &self.target_path)
    }

    /// Database location as the connector expects it (`:memory:` is kept as is).
    pub fn database_path(&self, project_dir: &Path) -> String {
        if self.database == IN_MEMORY_DATABASE {
            return self.database.clone();
        }
        self.resolve(project_dir, &self.database)
            .to_string_lossy()
            .into_owned()
    }
}

/// Raw CSV inputs, relative to the project directory unless absolute.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourcePaths {
    #[serde(default = "default_heart_rate_source")]
    pub heart_rate: String,
    #[serde(default = "default_steps_source")]
    pub steps: String,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            heart_rate: default_heart_rate_source(),
            steps: default_steps_source(),
        }
    }
}

/// File names of the quality report artifacts, written in the target directory.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportNames {
    #[serde(default = "default_raw_report")]
    pub raw: String,
    #[serde(default = "default_clean_report")]
    pub clean: String,
}

impl Default for ReportNames {
    fn default() -> Self {
        Self {
            raw: default_raw_report(),
            clean: default_clean_report(),
        }
    }
}

/// Stage-level retry budget. `max_retries` counts attempts after the first one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RetryPolicy {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay_secs: default_delay_secs(),
        }
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_database() -> String {
    "db/health.duckdb".to_string()
}
fn default_target_path() -> String {
    "target".to_string()
}
fn default_heart_rate_source() -> String {
    "data/raw_heart_rate.csv".to_string()
}
fn default_steps_source() -> String {
    "data/raw_steps.csv".to_string()
}
fn default_raw_report() -> String {
    "quality_raw.json".to_string()
}
fn default_clean_report() -> String {
    "quality_clean.json".to_string()
}
fn default_max_retries() -> u32 {
    3
}
fn default_delay_secs() -> u64 {
    5
}
