//! Python project layout: root discovery, metadata and artifacts.

use crate::error::{PublishError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Files that mark the root of a Python project
const PROJECT_MARKERS: &[&str] = &["pyproject.toml", "setup.py", "setup.cfg"];

/// Working directory shared by every step of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    working_directory: PathBuf,
}

impl RunContext {
    /// Wrap an already-resolved project root without touching the process cwd
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
        }
    }

    /// Make `root` the process working directory and return the context for it
    pub fn establish(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root)?;
        std::env::set_current_dir(&root)?;
        log::debug!("Working directory set to {}", root.display());
        Ok(Self::new(root))
    }

    /// Project root all steps run in
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Resolve a project-relative path
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.working_directory.join(relative)
    }

    /// Whether version-control metadata is present
    pub fn has_vcs_metadata(&self) -> bool {
        self.join(".git").exists()
    }
}

/// Find the nearest ancestor of `start` (inclusive) that looks like a Python project
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| PROJECT_MARKERS.iter().any(|m| dir.join(m).is_file()))
        .map(Path::to_path_buf)
}

#[derive(Debug, Deserialize)]
struct PyProject {
    project: Option<ProjectTable>,
}

#[derive(Debug, Deserialize)]
struct ProjectTable {
    name: Option<String>,
}

/// Read `[project].name` from `pyproject.toml` in `root`, if there is one
pub fn read_package_name(root: &Path) -> Result<Option<String>> {
    let path = root.join("pyproject.toml");
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let parsed: PyProject = toml::from_str(&content).map_err(|e| PublishError::InvalidArguments {
        reason: format!("Could not parse {}: {}", path.display(), e),
    })?;

    Ok(parsed
        .project
        .and_then(|p| p.name)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty()))
}

/// Files directly inside `dist_dir`, sorted by name
pub fn list_artifacts(dist_dir: &Path) -> Result<Vec<PathBuf>> {
    if !dist_dir.is_dir() {
        return Ok(Vec::new());
    }

    let escaped = glob::Pattern::escape(&dist_dir.to_string_lossy());
    let pattern = format!("{}/*", escaped);
    let entries = glob::glob(&pattern).map_err(|e| PublishError::InvalidArguments {
        reason: format!("Invalid artifact pattern '{}': {}", pattern, e),
    })?;

    let mut artifacts = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PublishError::Io(e.into()))?;
        if path.is_file() {
            artifacts.push(path);
        }
    }
    artifacts.sort();
    Ok(artifacts)
}

/// Remove a directory tree
pub fn remove_dir(path: &Path) -> Result<()> {
    std::fs::remove_dir_all(path).map_err(|e| PublishError::CleanupFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
