// vitals-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::project::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["vitals_project_conf.yaml", "vitals.yaml"];

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project manifest");

    // 2. Parsing + validation des règles
    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    // 3. Override via variables d'environnement
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

/// Like [`load_project_config`], but falls back to the built-in configuration
/// when the project has no manifest and `allow_defaults` is set.
pub fn load_or_default(
    project_dir: &Path,
    allow_defaults: bool,
) -> Result<ProjectConfig, InfrastructureError> {
    match load_project_config(project_dir) {
        Err(InfrastructureError::ConfigNotFound(_)) if allow_defaults => {
            warn!(dir = ?project_dir, "No manifest found, running with default configuration");
            let mut config = ProjectConfig::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok());
            Ok(config)
        }
        other => other,
    }
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
        .ok_or_else(|| {
            InfrastructureError::ConfigNotFound(format!(
                "{:?} (checked: {:?})",
                root, CONFIG_CANDIDATES
            ))
        })
}

fn apply_env_overrides<F>(config: &mut ProjectConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("VITALS_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = lookup("VITALS_DATABASE") {
        info!(old = ?config.database, new = ?val, "Overriding database via ENV");
        config.database = val;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_loads_first_candidate() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("vitals.yaml"), "name: fallback\n")?;
        fs::write(
            dir.path().join("vitals_project_conf.yaml"),
            "name: primary\nretry:\n  max_retries: 1\n",
        )?;

        let config = load_project_config(dir.path())?;
        assert_eq!(config.name, "primary");
        assert_eq!(config.retry.max_retries, 1);
        Ok(())
    }

    #[test]
    fn test_missing_manifest() -> Result<()> {
        let dir = tempdir()?;
        let res = load_project_config(dir.path());
        assert!(matches!(res, Err(InfrastructureError::ConfigNotFound(_))));

        let strict = load_or_default(dir.path(), false);
        assert!(matches!(strict, Err(InfrastructureError::ConfigNotFound(_))));

        let config = load_or_default(dir.path(), true)?;
        assert_eq!(config.sources.steps, "data/raw_steps.csv");
        Ok(())
    }

    #[test]
    fn test_invalid_rules_are_rejected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("vitals.yaml"),
            "name: demo\nrules:\n  heart_rate_min: 250\n",
        )?;
        let res = load_project_config(dir.path());
        assert!(matches!(res, Err(InfrastructureError::InvalidConfig(_))));
        Ok(())
    }

    #[test]
    fn test_malformed_yaml() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("vitals.yaml"), "name: [unclosed\n")?;
        let res = load_project_config(dir.path());
        assert!(matches!(res, Err(InfrastructureError::YamlError(_))));
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ProjectConfig::default();
        apply_env_overrides(&mut config, |key| match key {
            "VITALS_TARGET_PATH" => Some("/tmp/out".to_string()),
            _ => None,
        });
        assert_eq!(config.target_path, "/tmp/out");
        assert_eq!(config.database, "db/health.duckdb");
    }
}
