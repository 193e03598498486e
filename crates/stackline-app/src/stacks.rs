use std::collections::HashMap;

use anyhow::Result;
use rayon::prelude::*;
use stackline_core::pr_info::PrInfo;
use stackline_core::tree::{BranchNode, parse_log_short};

use crate::App;

/// One parsed `log short` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSnapshot {
    pub roots: Vec<BranchNode>,
}

impl App {
    pub fn load_stacks(&self) -> Result<StackSnapshot> {
        let raw = self.tool().log_short()?;
        let roots = parse_log_short(&raw);
        tracing::debug!(roots = roots.len(), "parsed stack listing");
        Ok(StackSnapshot { roots })
    }

    /// PR lookups for every branch, run in parallel. Branches whose lookup fails
    /// are left out rather than failing the batch.
    pub fn load_pr_infos(&self, branches: &[String]) -> HashMap<String, PrInfo> {
        let tool = self.tool();

        branches
            .par_iter()
            .filter_map(|branch| match tool.pr_info(branch) {
                Ok(info) => Some((branch.clone(), info)),
                Err(error) => {
                    tracing::debug!(%branch, %error, "pr info lookup failed");
                    None
                }
            })
            .collect()
    }
}
