//! Commands for the Python build, test and upload tools.
//!
//! Everything runs as `<python> -m <module>` so pip, pytest, build and twine
//! all come from the same interpreter.

use super::registry::Registry;
use crate::process::ExternalCommand;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Packages needed to build and upload
const BUILD_DEPENDENCIES: &[&str] = &["build", "twine"];

/// Builds the external commands for one interpreter
#[derive(Debug, Clone)]
pub struct Toolchain {
    python: OsString,
    tests_dir: PathBuf,
}

impl Toolchain {
    /// Toolchain for `python`, running tests from `tests_dir`
    pub fn new(python: impl Into<OsString>, tests_dir: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            tests_dir: tests_dir.into(),
        }
    }

    fn module(&self, module: &str) -> ExternalCommand {
        ExternalCommand::new(&self.python).args(["-m", module])
    }

    /// `python -m pip install build twine`
    pub fn install_dependencies(&self) -> ExternalCommand {
        self.module("pip").arg("install").args(BUILD_DEPENDENCIES.iter().copied())
    }

    /// `python -m pytest <tests_dir> -v`
    pub fn run_tests(&self) -> ExternalCommand {
        self.module("pytest")
            .arg(self.tests_dir.as_os_str())
            .arg("-v")
    }

    /// `python -m build`
    pub fn build(&self) -> ExternalCommand {
        self.module("build")
    }

    /// `python -m twine check <artifacts>`
    pub fn check(&self, artifacts: &[PathBuf]) -> ExternalCommand {
        self.module("twine")
            .arg("check")
            .args(artifacts.iter().map(|p| p.as_os_str()))
    }

    /// `python -m twine upload [--repository testpypi] <artifacts>`
    ///
    /// Interactive so twine can ask for credentials.
    pub fn upload(&self, registry: Registry, artifacts: &[PathBuf]) -> ExternalCommand {
        self.module("twine")
            .arg("upload")
            .args(registry.repository_args().iter().copied())
            .args(artifacts.iter().map(|p| p.as_os_str()))
            .interactive()
    }

    /// Interpreter these commands run with
    pub fn python(&self) -> &Path {
        Path::new(&self.python)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolchain() -> Toolchain {
        Toolchain::new("python3", "tests")
    }

    #[test]
    fn test_install_and_test_commands() {
        let tc = toolchain();
        assert_eq!(
            tc.install_dependencies().to_string(),
            "python3 -m pip install build twine"
        );
        assert_eq!(tc.run_tests().to_string(), "python3 -m pytest tests -v");
        assert_eq!(tc.build().to_string(), "python3 -m build");
    }

    #[test]
    fn test_check_receives_every_artifact() {
        let artifacts = vec![
            PathBuf::from("dist/pkg-0.1.0-py3-none-any.whl"),
            PathBuf::from("dist/pkg-0.1.0.tar.gz"),
        ];
        let cmd = toolchain().check(&artifacts);
        assert_eq!(
            cmd.to_string(),
            "python3 -m twine check dist/pkg-0.1.0-py3-none-any.whl dist/pkg-0.1.0.tar.gz"
        );
        assert!(!cmd.interactive);
    }

    #[test]
    fn test_upload_targets_registry() {
        let artifacts = vec![PathBuf::from("dist/pkg-0.1.0.tar.gz")];
        let staging = toolchain().upload(Registry::TestPyPi, &artifacts);
        assert_eq!(
            staging.to_string(),
            "python3 -m twine upload --repository testpypi dist/pkg-0.1.0.tar.gz"
        );
        assert!(staging.interactive);

        let production = toolchain().upload(Registry::PyPi, &artifacts);
        assert_eq!(
            production.to_string(),
            "python3 -m twine upload dist/pkg-0.1.0.tar.gz"
        );
        assert!(!production.has_arg("--repository"));
    }
}
