//! Command line argument parsing and validation.
//!
//! Every option has a sensible default; with no arguments the tool publishes
//! the Python project enclosing the current directory.

use crate::PublishConfig;
use crate::error::{PublishError, Result};
use crate::project;
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Interpreters tried, in order, when `--python` is not given
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Build, check and upload a Python package
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kodegen_pypi_publish",
    version,
    about = "Build, check and upload a Python package to PyPI or Test PyPI",
    long_about = "Build, check and upload a Python package to PyPI or Test PyPI.

Installs build and twine, cleans old outputs, runs pytest, builds the sdist
and wheel, checks them with twine, then asks where to upload.

Usage:
  kodegen_pypi_publish
  kodegen_pypi_publish --project-root /path/to/project
  kodegen_pypi_publish --python .venv/bin/python"
)]
pub struct Args {
    /// Project root (default: nearest directory with pyproject.toml, setup.py or setup.cfg)
    #[arg(long, value_name = "DIR", env = "KODEGEN_PUBLISH_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Python interpreter used for pip, pytest, build and twine
    #[arg(long, value_name = "PROGRAM", env = "KODEGEN_PUBLISH_PYTHON")]
    pub python: Option<PathBuf>,

    /// Package name shown in install instructions (default: [project].name)
    #[arg(long, value_name = "NAME")]
    pub package_name: Option<String>,

    /// Test directory passed to pytest
    #[arg(long, value_name = "DIR", default_value = "tests")]
    pub tests_dir: PathBuf,

    /// Distribution output directory
    #[arg(long, value_name = "DIR", default_value = "dist")]
    pub dist_dir: PathBuf,

    /// Intermediate build directory
    #[arg(long, value_name = "DIR", default_value = "build")]
    pub build_dir: PathBuf,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(python) = &self.python
            && python.as_os_str().is_empty()
        {
            return Err("--python must not be empty".to_string());
        }

        if let Some(name) = &self.package_name
            && name.trim().is_empty()
        {
            return Err("--package-name must not be empty".to_string());
        }

        for (flag, dir) in [
            ("--tests-dir", &self.tests_dir),
            ("--dist-dir", &self.dist_dir),
            ("--build-dir", &self.build_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(format!("{} must not be empty", flag));
            }
        }

        if self.dist_dir == self.build_dir {
            return Err("--dist-dir and --build-dir must be different directories".to_string());
        }

        Ok(())
    }

    /// Project root to publish, relative to `cwd` when not absolute
    pub fn resolve_project_root(&self, cwd: &Path) -> Option<PathBuf> {
        match &self.project_root {
            Some(root) => Some(cwd.join(root)),
            None => project::find_project_root(cwd),
        }
    }

    /// Build the run configuration for the project at `root`
    pub fn to_config(&self, root: &Path) -> Result<PublishConfig> {
        let package_name = match &self.package_name {
            Some(name) => name.trim().to_string(),
            None => project::read_package_name(root)?
                .or_else(|| {
                    root.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                })
                .ok_or_else(|| PublishError::InvalidArguments {
                    reason: format!(
                        "Could not determine the package name for {}. Use --package-name.",
                        root.display()
                    ),
                })?,
        };

        Ok(PublishConfig {
            python: self.python_program(),
            package_name,
            tests_dir: self.tests_dir.clone(),
            dist_dir: self.dist_dir.clone(),
            build_dir: self.build_dir.clone(),
        })
    }

    fn python_program(&self) -> OsString {
        if let Some(python) = &self.python {
            return python.clone().into_os_string();
        }

        PYTHON_CANDIDATES
            .iter()
            .find_map(|candidate| which::which(candidate).ok())
            .map(PathBuf::into_os_string)
            .unwrap_or_else(|| OsString::from(PYTHON_CANDIDATES[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("kodegen_pypi_publish").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.tests_dir, PathBuf::from("tests"));
        assert_eq!(args.dist_dir, PathBuf::from("dist"));
        assert_eq!(args.build_dir, PathBuf::from("build"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_rejects_same_dist_and_build_dir() {
        let args = parse(&["--dist-dir", "out", "--build-dir", "out"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_package_name() {
        let args = parse(&["--package-name", "  "]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_config_uses_pyproject_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("pyproject.toml"),
            "[project]\nname = \"wati-mcp-server\"\n",
        )
        .expect("write pyproject");

        let config = parse(&["--python", "/opt/python/bin/python3"])
            .to_config(dir.path())
            .expect("config");
        assert_eq!(config.package_name, "wati-mcp-server");
        assert_eq!(config.python, OsString::from("/opt/python/bin/python3"));
    }

    #[test]
    fn test_explicit_package_name_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("pyproject.toml"), "[project]\nname = \"other\"\n")
            .expect("write pyproject");

        let config = parse(&["--package-name", "mine"])
            .to_config(dir.path())
            .expect("config");
        assert_eq!(config.package_name, "mine");
    }

    #[test]
    fn test_package_name_falls_back_to_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("my-package");
        std::fs::create_dir(&root).expect("mkdir");

        let config = parse(&[]).to_config(&root).expect("config");
        assert_eq!(config.package_name, "my-package");
    }

    #[test]
    fn test_explicit_project_root_is_relative_to_cwd() {
        let args = parse(&["--project-root", "pkg"]);
        assert_eq!(
            args.resolve_project_root(Path::new("/work")),
            Some(PathBuf::from("/work/pkg"))
        );
    }
}
