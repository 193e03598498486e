use crate::pr_info::PrInfo;
use crate::tree::BranchNode;

/// One row of the branch list, in the order the stack tool printed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub name: String,
    pub is_current: bool,
    pub annotation: String,
    pub pr: PrInfo,
    pub order: usize,
    pub visual_depth: usize,
}

impl DisplayEntry {
    fn from_node(node: &BranchNode) -> Self {
        Self {
            name: node.name.clone(),
            is_current: node.is_current,
            annotation: node.annotation.clone(),
            pr: node.pr,
            order: node.order,
            visual_depth: node.depth,
        }
    }
}

pub fn flatten(roots: &[BranchNode]) -> Vec<DisplayEntry> {
    let mut entries: Vec<DisplayEntry> = roots
        .iter()
        .flat_map(BranchNode::walk)
        .map(DisplayEntry::from_node)
        .collect();
    entries.sort_by_key(|entry| entry.order);
    entries
}

/// Picks the cursor row after a rebuild: the previously selected branch if it still
/// exists, else the checked-out branch, else the first row.
pub fn resolve_cursor(entries: &[DisplayEntry], previous: Option<&str>) -> usize {
    if let Some(name) = previous
        && let Some(index) = entries.iter().position(|entry| entry.name == name)
    {
        return index;
    }

    entries
        .iter()
        .position(|entry| entry.is_current)
        .unwrap_or(0)
}
