use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::command_adapter::{self, LaunchFailure};
use crate::command_runner::{CommandOutput, CommandRunner};
use crate::diff_stat::{DiffStatEntry, parse_diff_stat};

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git command failed: git {command} (exit {status}) {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },
    #[error("failed to execute git command: {0}")]
    Execute(String),
    #[error("failed to parse git output: {0}")]
    Parse(String),
}

impl GitError {
    /// The text a user should see: git's own stderr when it ran and failed.
    pub fn detail(&self) -> String {
        match self {
            Self::CommandFailed { stderr, .. } if !stderr.is_empty() => stderr.clone(),
            other => other.to_string(),
        }
    }
}

pub fn git_dir(cwd: Option<&Path>, runner: &dyn CommandRunner) -> Result<PathBuf, GitError> {
    let output = run_git_checked(runner, &["rev-parse", "--absolute-git-dir"], cwd)?;
    let line = first_non_empty_stdout_line(&output, "git rev-parse returned empty git dir")?;
    Ok(PathBuf::from(line))
}

pub fn diff_stat(
    cwd: Option<&Path>,
    parent: &str,
    branch: &str,
    runner: &dyn CommandRunner,
) -> Result<Vec<DiffStatEntry>, GitError> {
    let range = range(parent, branch);
    let output = run_git_checked(runner, &["diff", "--stat", range.as_str()], cwd)?;
    Ok(parse_diff_stat(&output.stdout))
}

pub fn diff_file(
    cwd: Option<&Path>,
    parent: &str,
    branch: &str,
    path: &str,
    runner: &dyn CommandRunner,
) -> Result<String, GitError> {
    let range = range(parent, branch);
    let args = ["diff", "--color=always", range.as_str(), "--", path];
    let output = run_git_checked(runner, &args, cwd)?;
    Ok(output.stdout)
}

fn range(parent: &str, branch: &str) -> String {
    format!("{parent}...{branch}")
}

fn first_non_empty_stdout_line(output: &CommandOutput, message: &str) -> Result<String, GitError> {
    output
        .stdout
        .lines()
        .next()
        .and_then(|line| {
            let trimmed = line.trim();
            (!trimmed.is_empty()).then_some(trimmed.to_string())
        })
        .ok_or_else(|| GitError::Parse(message.to_string()))
}

fn run_git_checked(
    runner: &dyn CommandRunner,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<CommandOutput, GitError> {
    let output = command_adapter::run_program(runner, "git", args, cwd).map_err(|failure| {
        match failure {
            LaunchFailure::NotFound { program } => {
                GitError::Execute(format!("{program} executable not found in PATH"))
            }
            LaunchFailure::Other(message) => GitError::Execute(message),
        }
    })?;

    command_adapter::ensure_success(args, output).map_err(|failure| GitError::CommandFailed {
        command: failure.command,
        status: failure.status,
        stderr: failure.stderr,
    })
}
