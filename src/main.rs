//! KODEGEN PyPI Publish - build, check and upload a Python package.
//!
//! Exits 0 when publishing completes (or the user chooses a manual upload)
//! and 1 on any failure or interruption.

use kodegen_pypi_publish::cli;
use kodegen_pypi_publish::cli::OutputManager;
use kodegen_pypi_publish::error::PublishError;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(PublishError::Cancelled) => {
            let output = OutputManager::new();
            let _ = output.println("\n\n⏹️  Publishing cancelled by user.");
            process::exit(1);
        }
        Err(e) => {
            let output = OutputManager::new();
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
