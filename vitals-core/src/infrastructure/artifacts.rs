// vitals-core/src/infrastructure/artifacts.rs

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::infrastructure::error::InfrastructureError;
use crate::ports::artifact::ArtifactSink;

/// Run artifacts on disk, under the project's target directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for ArtifactStore {
    fn location(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn write_artifact(&self, name: &str, content: &str) -> Result<PathBuf, InfrastructureError> {
        let path = self.location(name);
        atomic_write(&path, content)?;
        debug!(path = ?path, bytes = content.len(), "Artifact written");
        Ok(path)
    }
}

/// Writes through a temporary sibling file then renames it over `path`,
/// so readers see either the old artifact or the complete new one.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}
