//! Command line interface for kodegen_pypi_publish.
//!
//! Parses arguments, settles the project root, then runs the publisher on a
//! blocking thread while watching for Ctrl-C.

mod args;
mod console;
mod output;

pub use args::Args;
pub use console::{Console, TerminalConsole};
pub use output::OutputManager;

use crate::error::{PublishError, Result};
use crate::process::SystemRunner;
use crate::project::RunContext;
use crate::publish::Publisher;
use tokio::task::JoinError;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Publish with already-parsed arguments
pub async fn execute(args: Args) -> Result<i32> {
    let output = OutputManager::new();

    if let Err(reason) = args.validate() {
        output.error(&format!("Invalid arguments: {}", reason));
        return Ok(1);
    }

    let cwd = std::env::current_dir()?;
    let root = match args.resolve_project_root(&cwd) {
        Some(root) => root,
        None => {
            let _ = output.warn(&format!(
                "No pyproject.toml, setup.py or setup.cfg found above {}; publishing from there",
                cwd.display()
            ));
            cwd
        }
    };

    let ctx = RunContext::establish(&root)?;
    let config = args.to_config(ctx.working_directory())?;
    log::info!(
        "Publishing '{}' from {}",
        config.package_name,
        ctx.working_directory().display()
    );

    let mut task = tokio::task::spawn_blocking(move || {
        let mut runner = SystemRunner;
        let mut console = TerminalConsole::new();
        Publisher::new(&ctx, &config, &mut runner, &mut console).run()
    });

    let signal = tokio::select! {
        joined = &mut task => return finish(joined),
        signal = tokio::signal::ctrl_c() => signal,
    };

    match signal {
        Ok(()) => Err(PublishError::Cancelled),
        Err(e) => {
            log::warn!("Could not listen for Ctrl-C: {}", e);
            finish(task.await)
        }
    }
}

fn finish(joined: std::result::Result<i32, JoinError>) -> Result<i32> {
    joined.map_err(|e| {
        PublishError::Unexpected(anyhow::Error::new(e).context("publishing task did not complete"))
    })
}
