use anyhow::Result;

use crate::App;

/// A repository mutation delegated to the stack tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackAction {
    Checkout { branch: String },
    SubmitStack { branch: String },
    SubmitDownstack { branch: String },
    Restack { branch: String },
    RepoSync,
    Sync,
    OpenPr { branch: String },
}

impl StackAction {
    /// Spinner text while the action runs.
    pub fn running_label(&self) -> String {
        match self {
            Self::Checkout { branch } => format!("Checking out {branch}..."),
            Self::SubmitStack { branch } => format!("Submitting stack ({branch})..."),
            Self::SubmitDownstack { branch } => format!("Submitting downstack ({branch})..."),
            Self::Restack { branch } => format!("Restacking ({branch})..."),
            Self::RepoSync => "Fetching...".to_string(),
            Self::Sync => "Syncing...".to_string(),
            Self::OpenPr { branch } => format!("Opening PR ({branch})..."),
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Self::Checkout { branch } => format!("Checked out {branch}"),
            Self::SubmitStack { .. } => "Stack submitted".to_string(),
            Self::SubmitDownstack { .. } => "Downstack submitted".to_string(),
            Self::Restack { .. } => "Restacked".to_string(),
            Self::RepoSync => "Fetched".to_string(),
            Self::Sync => "Synced".to_string(),
            Self::OpenPr { branch } => format!("Opened PR for {branch}"),
        }
    }

    /// Opening a PR leaves the repository untouched.
    pub fn reloads_on_success(&self) -> bool {
        !matches!(self, Self::OpenPr { .. })
    }

    /// A failed restack can leave branches half-rebased, so the tree is re-read.
    pub fn reloads_on_failure(&self) -> bool {
        matches!(self, Self::Restack { .. })
    }
}

impl App {
    pub fn run_action(&self, action: &StackAction) -> Result<()> {
        let tool = self.tool();
        tracing::info!(?action, "running stack action");

        match action {
            StackAction::Checkout { branch } => tool.checkout(branch)?,
            StackAction::SubmitStack { branch } => tool.submit_stack(branch)?,
            StackAction::SubmitDownstack { branch } => tool.submit_downstack(branch)?,
            StackAction::Restack { branch } => tool.restack(branch)?,
            StackAction::RepoSync => tool.repo_sync()?,
            StackAction::Sync => tool.sync()?,
            StackAction::OpenPr { branch } => tool.open_pr(branch)?,
        }

        Ok(())
    }
}
