//! Release orchestration for a Python package.
//!
//! [`Publisher`] runs the fixed publishing sequence: install tooling, clean
//! old outputs, test, build, check, then upload or print manual instructions.
//! Build-breaking failures abort the run; cleanup is best-effort and a test
//! failure can be overridden by the user.

mod registry;
mod toolchain;

pub use registry::{MenuChoice, Registry};
pub use toolchain::Toolchain;

use crate::PublishConfig;
use crate::cli::Console;
use crate::error::{PublishError, Result};
use crate::process::{CommandRunner, ExternalCommand, StepResult};
use crate::project::{self, RunContext};
use std::path::{Path, PathBuf};

/// Drives one publishing run
pub struct Publisher<'a> {
    ctx: &'a RunContext,
    config: &'a PublishConfig,
    toolchain: Toolchain,
    runner: &'a mut dyn CommandRunner,
    console: &'a mut dyn Console,
}

impl<'a> Publisher<'a> {
    /// Create a publisher for the project at `ctx`
    pub fn new(
        ctx: &'a RunContext,
        config: &'a PublishConfig,
        runner: &'a mut dyn CommandRunner,
        console: &'a mut dyn Console,
    ) -> Self {
        let toolchain = Toolchain::new(&config.python, &config.tests_dir);
        Self {
            ctx,
            config,
            toolchain,
            runner,
            console,
        }
    }

    /// Run the whole sequence and return the process exit code
    pub fn run(&mut self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(e) => {
                log::debug!("Publishing aborted: {:?}", e);
                self.console.error(&e.to_string());

                let suggestions = e.recovery_suggestions();
                if !suggestions.is_empty() {
                    self.console.println("\n💡 Recovery suggestions:");
                    for suggestion in suggestions {
                        self.console.indent(&format!("• {}", suggestion));
                    }
                }
                1
            }
        }
    }

    /// Run the whole sequence, stopping at the first fatal error
    pub fn execute(&mut self) -> Result<()> {
        self.console.section("🚀 Python Package Publishing");
        log::debug!(
            "Project root {}, interpreter {}",
            self.ctx.working_directory().display(),
            self.toolchain.python().display()
        );

        if !self.ctx.has_vcs_metadata() {
            self.console
                .warn("Not in a git repository. Consider initializing git.");
        }

        let install = self.run_step(
            "Installing build dependencies",
            self.toolchain.install_dependencies(),
        );
        if !install.succeeded {
            return Err(PublishError::DependencyInstallFailed {
                reason: install.diagnostic().to_string(),
            });
        }

        let config = self.config;
        self.clean_output_dir(&config.dist_dir, "Cleaning previous builds")?;
        self.clean_output_dir(&config.build_dir, "Cleaning build directory")?;

        self.console.println("\n🧪 Running tests...");
        let tests = self.run_step("Running tests", self.toolchain.run_tests());
        if !tests.succeeded {
            self.console
                .warn("Tests failed. Consider fixing them before publishing.");
            let answer = self.console.prompt("Continue anyway? (y/N): ")?;
            if !confirms(&answer) {
                return Err(PublishError::TestsFailed);
            }
            log::warn!("Continuing with failing tests at user request");
        }

        let build = self.run_step("Building package", self.toolchain.build());
        if !build.succeeded {
            return Err(PublishError::BuildFailed {
                reason: build.diagnostic().to_string(),
            });
        }

        let artifacts = project::list_artifacts(&self.ctx.join(&config.dist_dir))?;
        if artifacts.is_empty() {
            return Err(PublishError::IntegrityCheckFailed {
                reason: format!("no artifacts found in {}", config.dist_dir.display()),
            });
        }

        let check = self.run_step("Checking package", self.toolchain.check(&artifacts));
        if !check.succeeded {
            return Err(PublishError::IntegrityCheckFailed {
                reason: check.diagnostic().to_string(),
            });
        }

        self.console.println("");
        self.console.success("📦 Package built successfully!");
        self.console.println("Files created:");
        for artifact in &artifacts {
            let shown = self.display_path(artifact);
            self.console.indent(&format!("- {}", shown));
        }

        self.console.println("\n🎯 What would you like to do next?");
        for option in MenuChoice::OPTIONS {
            self.console.println(option);
        }
        let answer = self.console.prompt("Enter your choice (1-3): ")?;

        match MenuChoice::parse(&answer)? {
            MenuChoice::Upload(registry) => self.upload(registry, &artifacts),
            MenuChoice::Manual => self.print_manual_instructions(),
        }

        self.console.println("");
        self.console.success("🎉 Publishing process completed!");
        Ok(())
    }

    /// Run one external step, reporting its outcome
    fn run_step(&mut self, description: &str, command: ExternalCommand) -> StepResult {
        self.console.println(&format!("\n🔧 {}...", description));
        let result = self.runner.run(&command, self.ctx.working_directory());

        if result.succeeded {
            self.console
                .success(&format!("{} completed successfully", description));
            let stdout = result.stdout.trim_end();
            if !stdout.is_empty() {
                self.console.println(stdout);
            }
        } else {
            self.console.error(&format!("{} failed:", description));
            let diagnostic = result.diagnostic();
            if !diagnostic.is_empty() {
                self.console.println(diagnostic);
            }
        }
        result
    }

    /// Remove a stale output directory; recoverable failures are only logged
    fn clean_output_dir(&mut self, relative: &Path, description: &str) -> Result<()> {
        let path = self.ctx.join(relative);
        if !path.exists() {
            return Ok(());
        }

        self.console.println(&format!("\n🔧 {}...", description));
        match project::remove_dir(&path) {
            Ok(()) => {
                self.console
                    .success(&format!("{} completed successfully", description));
                Ok(())
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("{}", e);
                self.console.warn(&format!("{} failed: {}", description, e));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Upload and print install guidance; a failed upload is reported, not fatal
    fn upload(&mut self, registry: Registry, artifacts: &[PathBuf]) {
        self.console
            .println(&format!("\n📤 Uploading to {}...", registry));
        self.console
            .println(&format!("You'll need to enter your {} credentials.", registry));

        let result = self.run_step(
            &format!("Uploading to {}", registry),
            self.toolchain.upload(registry, artifacts),
        );
        if !result.succeeded {
            let err = PublishError::UploadFailed {
                registry: registry.to_string(),
                reason: result.diagnostic().to_string(),
            };
            log::warn!("{}", err);
            self.console.warn(&err.to_string());
            return;
        }

        let config = self.config;
        let package = &config.package_name;
        self.console.success("✅ Upload successful!");
        match registry {
            Registry::TestPyPi => {
                self.console.println("You can test install with:");
                self.console.indent(&registry.install_command(package));
            }
            Registry::PyPi => {
                self.console.println("Your package is now available at:");
                self.console.indent(&registry.project_url(package));
                self.console.println("Users can install it with:");
                self.console.indent(&registry.install_command(package));
            }
        }
    }

    fn print_manual_instructions(&mut self) {
        let dist_dir = &self.config.dist_dir;
        self.console.println("\n📋 Manual upload instructions:");
        for registry in Registry::ALL {
            self.console.println(&format!("To upload to {}:", registry));
            self.console.indent(&registry.manual_upload_command(dist_dir));
        }
    }

    /// Path relative to the project root when possible
    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(self.ctx.working_directory())
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Only a single `y` or `Y` confirms
fn confirms(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y")
}
