//! Adapter for the `gt` branch-stacking CLI.
//!
//! Every mutation goes through this tool; stackline never edits refs itself.

use std::path::Path;

use thiserror::Error;

use crate::command_adapter::{self, LaunchFailure};
use crate::command_runner::{CommandOutput, CommandRunner};
use crate::pr_info::{PrInfo, parse_pr_info};

pub const DEFAULT_PROGRAM: &str = "gt";

const NO_INTERACTIVE: &str = "--no-interactive";

#[derive(Debug, Error)]
pub enum StackToolError {
    #[error("{program} CLI not found: install it and make sure it is on PATH")]
    NotFound { program: String },
    #[error("{program} command failed: {program} {command} (exit {status}) {stderr}")]
    CommandFailed {
        program: String,
        command: String,
        status: i32,
        stderr: String,
    },
    #[error("failed to execute {program}: {message}")]
    Execute { program: String, message: String },
}

impl StackToolError {
    /// Short message for the status bar.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { .. } => self.to_string(),
            Self::CommandFailed { stderr, .. } => classify_failure(stderr),
            Self::Execute { message, .. } => message.clone(),
        }
    }
}

/// Maps raw stderr onto the handful of situations worth rephrasing.
pub fn classify_failure(stderr: &str) -> String {
    if stderr.contains("detached HEAD") {
        return "Detached HEAD: check out a branch first".to_string();
    }

    if stderr.contains("CONFLICT") || stderr.contains("conflict") {
        return "Conflict detected: resolve it and run restack again".to_string();
    }

    stderr.trim().to_string()
}

#[derive(Clone, Copy)]
pub struct StackTool<'a> {
    runner: &'a dyn CommandRunner,
    program: &'a str,
    cwd: Option<&'a Path>,
}

impl<'a> StackTool<'a> {
    pub fn new(runner: &'a dyn CommandRunner, program: &'a str, cwd: Option<&'a Path>) -> Self {
        Self {
            runner,
            program,
            cwd,
        }
    }

    /// Raw `log short` text; parsing is left to [`crate::tree`].
    pub fn log_short(&self) -> Result<String, StackToolError> {
        let output = self.run_checked(&["log", "short", NO_INTERACTIVE])?;
        Ok(output.stdout)
    }

    /// Parent branch as tracked by the tool. `None` when the tool reports nothing.
    pub fn parent(&self, branch: &str) -> Result<Option<String>, StackToolError> {
        let output = self.run_checked(&["parent", "--branch", branch, NO_INTERACTIVE])?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string))
    }

    pub fn pr_info(&self, branch: &str) -> Result<PrInfo, StackToolError> {
        let output = self.run_checked(&["branch", "pr-info", "--branch", branch, NO_INTERACTIVE])?;
        Ok(parse_pr_info(&output.stdout))
    }

    pub fn checkout(&self, branch: &str) -> Result<(), StackToolError> {
        self.run_checked(&["checkout", branch, NO_INTERACTIVE])
            .map(|_| ())
    }

    pub fn submit_stack(&self, branch: &str) -> Result<(), StackToolError> {
        self.run_checked(&["stack", "submit", NO_INTERACTIVE, "--branch", branch])
            .map(|_| ())
    }

    pub fn submit_downstack(&self, branch: &str) -> Result<(), StackToolError> {
        self.run_checked(&["downstack", "submit", NO_INTERACTIVE, "--branch", branch])
            .map(|_| ())
    }

    pub fn restack(&self, branch: &str) -> Result<(), StackToolError> {
        self.run_checked(&["stack", "restack", NO_INTERACTIVE, "--branch", branch])
            .map(|_| ())
    }

    pub fn repo_sync(&self) -> Result<(), StackToolError> {
        self.run_checked(&["repo", "sync", NO_INTERACTIVE])
            .map(|_| ())
    }

    pub fn sync(&self) -> Result<(), StackToolError> {
        self.run_checked(&["sync", "-f", NO_INTERACTIVE]).map(|_| ())
    }

    pub fn open_pr(&self, branch: &str) -> Result<(), StackToolError> {
        self.run_checked(&["pr", branch]).map(|_| ())
    }

    pub fn version(&self) -> Result<String, StackToolError> {
        let output = self.run_checked(&["--version"])?;
        Ok(output.stdout.trim().to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<CommandOutput, StackToolError> {
        let output = command_adapter::run_program(self.runner, self.program, args, self.cwd)
            .map_err(|failure| match failure {
                LaunchFailure::NotFound { program } => StackToolError::NotFound { program },
                LaunchFailure::Other(message) => StackToolError::Execute {
                    program: self.program.to_string(),
                    message,
                },
            })?;

        command_adapter::ensure_success(args, output).map_err(|failure| {
            StackToolError::CommandFailed {
                program: self.program.to_string(),
                command: failure.command,
                status: failure.status,
                stderr: failure.stderr,
            }
        })
    }
}
