//! # KODEGEN PyPI Publish
//!
//! Build, check and upload a Python package to PyPI or TestPyPI.
//!
//! The publisher runs a fixed sequence against the project root:
//!
//! 1. Install `build` and `twine` with pip
//! 2. Remove stale `dist/` and `build/` directories (best-effort)
//! 3. Run the test suite; failures can be overridden at a prompt
//! 4. Build the sdist and wheel, then `twine check` them
//! 5. Upload to Test PyPI or PyPI, or print manual upload instructions
//!
//! ## Usage
//!
//! ```bash
//! kodegen_pypi_publish                          # publish the project around the cwd
//! kodegen_pypi_publish --project-root ../pkg    # publish another project
//! kodegen_pypi_publish --python .venv/bin/python
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod error;
pub mod process;
pub mod project;
pub mod publish;

pub use cli::{Args, Console, TerminalConsole};
pub use error::{PublishError, Result};
pub use process::{CommandRunner, ExternalCommand, StepResult, SystemRunner};
pub use project::RunContext;
pub use publish::{MenuChoice, Publisher, Registry};

use std::ffi::OsString;
use std::path::PathBuf;

/// Configuration for a publishing run
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Python interpreter used for pip, pytest, build and twine
    pub python: OsString,
    /// Package name shown in post-upload guidance
    pub package_name: String,
    /// Test directory passed to pytest, relative to the project root
    pub tests_dir: PathBuf,
    /// Distribution output directory, relative to the project root
    pub dist_dir: PathBuf,
    /// Intermediate build directory, relative to the project root
    pub build_dir: PathBuf,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            python: OsString::from("python3"),
            package_name: String::new(),
            tests_dir: PathBuf::from("tests"),
            dist_dir: PathBuf::from("dist"),
            build_dir: PathBuf::from("build"),
        }
    }
}
