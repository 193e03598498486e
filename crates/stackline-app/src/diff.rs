use anyhow::{Context, Result};
use stackline_core::diff_stat::DiffStatEntry;
use thiserror::Error;

use crate::App;

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("No parent branch (trunk has no diff target)")]
    NoParent { branch: String },
}

/// Files changed on `branch` relative to `parent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLoad {
    pub branch: String,
    pub parent: String,
    pub files: Vec<DiffStatEntry>,
}

impl App {
    /// Resolves the diff base through the stack tool, falling back to the parent
    /// seen in the tree, then lists changed files.
    pub fn load_diff(&self, branch: &str, tree_parent: Option<&str>) -> Result<DiffLoad> {
        let parent = match self.tool().parent(branch) {
            Ok(Some(parent)) => parent,
            Ok(None) | Err(_) => tree_parent
                .map(str::to_string)
                .ok_or_else(|| DiffError::NoParent {
                    branch: branch.to_string(),
                })?,
        };

        let files = stackline_core::git::diff_stat(Some(self.cwd()), &parent, branch, self.runner())
            .with_context(|| format!("failed to list changes of {branch} against {parent}"))?;

        Ok(DiffLoad {
            branch: branch.to_string(),
            parent,
            files,
        })
    }

    /// Colored diff text for one file; `entry` renames resolve to the new path.
    pub fn load_diff_file(&self, parent: &str, branch: &str, entry: &DiffStatEntry) -> Result<String> {
        let path = entry.target_path();
        stackline_core::git::diff_file(Some(self.cwd()), parent, branch, &path, self.runner())
            .with_context(|| format!("failed to load diff for {path}"))
    }
}
