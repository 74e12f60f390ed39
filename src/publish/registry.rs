//! Upload targets and the post-build menu.

use crate::error::{PublishError, Result};
use std::fmt;
use std::path::Path;

/// Package index an upload can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    /// test.pypi.org, for trying out the publishing flow
    TestPyPi,
    /// pypi.org
    PyPi,
}

impl Registry {
    /// Both registries, staging first
    pub const ALL: [Registry; 2] = [Registry::TestPyPi, Registry::PyPi];

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            Registry::TestPyPi => "Test PyPI",
            Registry::PyPi => "PyPI",
        }
    }

    /// Arguments that select this registry in `twine upload`
    pub fn repository_args(self) -> &'static [&'static str] {
        match self {
            Registry::TestPyPi => &["--repository", "testpypi"],
            Registry::PyPi => &[],
        }
    }

    /// Project page once the upload has landed
    pub fn project_url(self, package: &str) -> String {
        match self {
            Registry::TestPyPi => format!("https://test.pypi.org/project/{}/", package),
            Registry::PyPi => format!("https://pypi.org/project/{}/", package),
        }
    }

    /// Command a user runs to install the uploaded package
    pub fn install_command(self, package: &str) -> String {
        match self {
            Registry::TestPyPi => format!(
                "pip install --index-url https://test.pypi.org/simple/ {}",
                package
            ),
            Registry::PyPi => format!("pip install {}", package),
        }
    }

    /// Upload command for doing it by hand
    pub fn manual_upload_command(self, dist_dir: &Path) -> String {
        let mut parts = vec!["twine".to_string(), "upload".to_string()];
        parts.extend(self.repository_args().iter().map(|a| a.to_string()));
        parts.push(format!("{}/*", dist_dir.display()));
        parts.join(" ")
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What to do with freshly built artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Upload to the given registry
    Upload(Registry),
    /// Print manual upload instructions and stop
    Manual,
}

impl MenuChoice {
    /// Menu lines, in prompt order
    pub const OPTIONS: [&'static str; 3] = [
        "1. Upload to Test PyPI (recommended for first time)",
        "2. Upload to PyPI (production)",
        "3. Exit (manual upload)",
    ];

    /// Parse the user's answer; surrounding whitespace is ignored
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            "1" => Ok(MenuChoice::Upload(Registry::TestPyPi)),
            "2" => Ok(MenuChoice::Upload(Registry::PyPi)),
            "3" => Ok(MenuChoice::Manual),
            other => Err(PublishError::InvalidMenuChoice {
                input: other.to_string(),
            }),
        }
    }
}
