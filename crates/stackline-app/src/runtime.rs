use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::App;

impl App {
    /// Absolute `.git` directory for the working directory. Fails outside a repository.
    pub fn git_dir(&self) -> Result<PathBuf> {
        stackline_core::git::git_dir(Some(self.cwd()), self.runner())
            .context("failed to resolve git directory")
    }
}
