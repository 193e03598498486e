use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use stackline_core::command_runner::CommandRunner;
use stackline_core::config::{StacklineConfig, load_config_or_default, resolve_config_path};
use stackline_core::doctor::{DoctorReport, run_doctor_with_runner};
use stackline_core::git::GitError;
use stackline_core::stack_tool::{StackTool, StackToolError};

mod actions;
mod diff;
mod runtime;
mod stacks;

pub use actions::StackAction;
pub use diff::{DiffError, DiffLoad};
pub use stacks::StackSnapshot;

/// Use-cases the terminal UI drives. Cheap to clone so worker threads can own one.
#[derive(Clone)]
pub struct App {
    runner: Arc<dyn CommandRunner>,
    config: StacklineConfig,
    cwd: PathBuf,
}

impl App {
    pub fn new(runner: Arc<dyn CommandRunner>, config: StacklineConfig, cwd: PathBuf) -> Self {
        Self {
            runner,
            config,
            cwd,
        }
    }

    pub fn config(&self) -> &StacklineConfig {
        &self.config
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn doctor(&self) -> DoctorReport {
        run_doctor_with_runner(&self.cwd, self.runner.as_ref())
    }

    pub(crate) fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub(crate) fn tool(&self) -> StackTool<'_> {
        StackTool::new(
            self.runner.as_ref(),
            &self.config.tool.program,
            Some(&self.cwd),
        )
    }
}

/// Loads `~/.config/stackline/config.toml`, or defaults when it does not exist.
pub fn ensure_config_ready() -> Result<StacklineConfig> {
    let config_path = resolve_config_path().context("failed to resolve config path")?;

    load_config_or_default(&config_path).map_err(|error| {
        anyhow!(
            "invalid config at {}: {error}\nFix the config and retry.",
            config_path.display()
        )
    })
}

/// Status-bar text for a failed use-case: classified tool failures, git's own
/// stderr, or the error chain's top message.
pub fn user_message(error: &anyhow::Error) -> String {
    if let Some(tool_error) = error.downcast_ref::<StackToolError>() {
        return tool_error.user_message();
    }

    if let Some(git_error) = error.downcast_ref::<GitError>() {
        return git_error.detail();
    }

    error.to_string()
}
