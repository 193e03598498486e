pub mod cli;
pub mod diagnostics;
pub mod dispatch;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use stackline_app::{App, ensure_config_ready};
use stackline_core::command_runner::SystemCommandRunner;
use stackline_core::config::StacklineConfig;

use crate::cli::{Cli, Command};
use crate::diagnostics::DiagnosticsSession;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let diagnostics = DiagnosticsSession::initialize(cli.diagnostics)?;
    if let Some(path) = diagnostics.path() {
        eprintln!("Diagnostics enabled: {}", path.display());
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    // Doctor reports config problems itself instead of refusing to run.
    let config = match cli.command {
        Some(Command::Doctor) => StacklineConfig::default(),
        None => ensure_config_ready()?,
    };
    let app = App::new(Arc::new(SystemCommandRunner::new()), config, cwd);
    let result = dispatch::run_with_deps(cli, app);

    if let Err(error) = &result {
        tracing::error!(error = %format!("{error:#}"), "stackline exited with an error");
    }
    result
}
