//! Error types for publishing operations.
//!
//! Every variant carries an actionable message, and `recovery_suggestions`
//! tells the user what to try next.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publishing operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Main error type for all publishing operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// Installing build/upload tooling failed
    #[error("Failed to install build dependencies: {reason}")]
    DependencyInstallFailed {
        /// Diagnostic output from the installer
        reason: String,
    },

    /// Removing a previous output directory failed (never fatal)
    #[error("Failed to remove {}: {reason}", .path.display())]
    CleanupFailed {
        /// Directory that could not be removed
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Test suite failed and the user declined to continue
    #[error("Tests failed and publishing was not confirmed")]
    TestsFailed,

    /// Building the distribution artifacts failed
    #[error("Package build failed: {reason}")]
    BuildFailed {
        /// Diagnostic output from the build tool
        reason: String,
    },

    /// The integrity checker rejected the artifacts
    #[error("Package check failed: {reason}")]
    IntegrityCheckFailed {
        /// Diagnostic output from the checker
        reason: String,
    },

    /// Uploading to a registry failed
    #[error("Upload to {registry} failed: {reason}")]
    UploadFailed {
        /// Registry display name
        registry: String,
        /// Diagnostic output from the upload client
        reason: String,
    },

    /// Menu input outside the accepted set
    #[error("Invalid choice '{input}'. Exiting.")]
    InvalidMenuChoice {
        /// What the user typed
        input: String,
    },

    /// Interrupted by the user
    #[error("Publishing cancelled by user.")]
    Cancelled,

    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything not otherwise classified
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl PublishError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PublishError::DependencyInstallFailed { .. } => vec![
                "Check that the selected Python interpreter has pip: python3 -m pip --version"
                    .to_string(),
                "Pick another interpreter with --python or KODEGEN_PUBLISH_PYTHON".to_string(),
            ],
            PublishError::TestsFailed => vec![
                "Fix the failing tests, or answer 'y' at the prompt to publish anyway".to_string(),
            ],
            PublishError::BuildFailed { .. } => vec![
                "Verify the [build-system] table in pyproject.toml".to_string(),
                "Run the build manually: python3 -m build".to_string(),
            ],
            PublishError::IntegrityCheckFailed { .. } => vec![
                "Inspect the package metadata: python3 -m twine check dist/*".to_string(),
                "Make sure the long description renders (readme and content type)".to_string(),
            ],
            PublishError::UploadFailed { .. } => vec![
                "Check your registry credentials or API token (~/.pypirc)".to_string(),
                "A version can only be uploaded once; bump the version and rebuild".to_string(),
            ],
            PublishError::InvalidMenuChoice { .. } => {
                vec!["Enter 1, 2 or 3 at the menu prompt".to_string()]
            }
            PublishError::Cancelled => Vec::new(),
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Whether the run may continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PublishError::CleanupFailed { .. })
    }
}
