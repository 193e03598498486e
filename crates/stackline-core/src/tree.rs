//! Reconstructs the branch forest from `gt log short` output.
//!
//! The tool prints the top of each stack first and the trunk last, with the
//! marker column encoding nesting:
//!
//! ```text
//! ◯    upgrade_elixir
//! │ ◉  credo
//! │ ◯  add_deps
//! ◯─┘  master
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::pr_info::PrInfo;

pub const CURRENT_MARKER: char = '◉';
pub const OTHER_MARKER: char = '◯';
pub const INDENT_WIDTH: usize = 2;

const CONNECTORS: [char; 8] = ['─', '┘', '│', '├', '└', '┴', '┐', '┌'];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchNode {
    pub name: String,
    pub is_current: bool,
    pub annotation: String,
    pub pr: PrInfo,
    pub depth: usize,
    pub order: usize,
    pub children: Vec<BranchNode>,
}

impl BranchNode {
    /// Pre-order walk over this node and all descendants.
    pub fn walk(&self) -> impl Iterator<Item = &BranchNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub name: String,
    pub depth: usize,
    pub is_current: bool,
    pub annotation: String,
}

/// Extracts the branch entry from one decorated line, or `None` for filler.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let (column, byte_offset, is_current) =
        line.char_indices()
            .enumerate()
            .find_map(|(column, (offset, ch))| match ch {
                CURRENT_MARKER => Some((column, offset, true)),
                OTHER_MARKER => Some((column, offset, false)),
                _ => None,
            })?;

    let rest = &line[byte_offset + CURRENT_MARKER.len_utf8()..];
    let label: String = rest.chars().filter(|ch| !CONNECTORS.contains(ch)).collect();
    let (name, annotation) = extract_annotation(label.trim());

    if name.is_empty() {
        return None;
    }

    Some(ParsedLine {
        name: name.to_string(),
        depth: column / INDENT_WIDTH,
        is_current,
        annotation: annotation.to_string(),
    })
}

/// Splits `name (text)` into `("name", "text")`. Anything else is returned unchanged
/// with an empty annotation, so names containing parentheses survive.
pub fn extract_annotation(label: &str) -> (&str, &str) {
    if label.ends_with(')')
        && let Some(index) = label.rfind(" (")
    {
        return (&label[..index], &label[index + 2..label.len() - 1]);
    }

    (label, "")
}

struct ArenaNode {
    line: ParsedLine,
    order: usize,
    children: Vec<usize>,
}

/// Parses the full listing into a forest. Output with no branch markers yields an
/// empty forest.
pub fn parse_log_short(output: &str) -> Vec<BranchNode> {
    let parsed: Vec<ParsedLine> = output.lines().filter_map(parse_line).collect();
    if parsed.is_empty() {
        return Vec::new();
    }

    let count = parsed.len();
    let mut arena: Vec<ArenaNode> = Vec::with_capacity(count);
    let mut roots: Vec<usize> = Vec::new();
    // depth -> arena index of the most recent node at that depth
    let mut tips: BTreeMap<usize, usize> = BTreeMap::new();
    let mut previous_depth = 0usize;

    for (reversed_index, line) in parsed.into_iter().rev().enumerate() {
        let depth = line.depth;
        let id = arena.len();
        arena.push(ArenaNode {
            line,
            order: count - 1 - reversed_index,
            children: Vec::new(),
        });

        let Some(&root) = roots.first() else {
            roots.push(id);
            tips.insert(depth, id);
            previous_depth = depth;
            continue;
        };

        let preferred = if depth == 0 {
            Some(root)
        } else if depth == previous_depth {
            tips.get(&depth).copied()
        } else if depth > previous_depth {
            tips.get(&(depth - 1)).copied()
        } else {
            tips.retain(|tracked, _| *tracked <= depth);
            tips.get(&(depth - 1)).copied()
        };

        let parent = preferred
            .or_else(|| tips.range(..depth).next_back().map(|(_, tip)| *tip))
            .unwrap_or(root);

        arena[parent].children.push(id);
        tips.insert(depth, id);
        previous_depth = depth;
    }

    into_owned(arena, &roots)
}

// Children always have a larger arena index than their parent, so building from
// the back guarantees every child is finished before its parent needs it.
fn into_owned(arena: Vec<ArenaNode>, roots: &[usize]) -> Vec<BranchNode> {
    let mut built: Vec<Option<BranchNode>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    let mut nodes: Vec<Option<ArenaNode>> = arena.into_iter().map(Some).collect();
    for id in (0..nodes.len()).rev() {
        let Some(node) = nodes[id].take() else {
            continue;
        };

        let children = node
            .children
            .iter()
            .filter_map(|child| built[*child].take())
            .collect();

        built[id] = Some(BranchNode {
            name: node.line.name,
            is_current: node.line.is_current,
            annotation: node.line.annotation,
            pr: PrInfo::default(),
            depth: node.line.depth,
            order: node.order,
            children,
        });
    }

    roots.iter().filter_map(|root| built[*root].take()).collect()
}

/// Finds the parent branch name of `name`. Roots and unknown names have no parent.
pub fn find_parent<'a>(roots: &'a [BranchNode], name: &str) -> Option<&'a str> {
    let mut stack: Vec<&BranchNode> = roots.iter().collect();
    while let Some(node) = stack.pop() {
        if node.children.iter().any(|child| child.name == name) {
            return Some(node.name.as_str());
        }
        stack.extend(node.children.iter());
    }

    None
}

pub fn is_root(roots: &[BranchNode], name: &str) -> bool {
    roots.iter().any(|root| root.name == name)
}

pub fn branch_names(roots: &[BranchNode]) -> Vec<String> {
    roots
        .iter()
        .flat_map(BranchNode::walk)
        .map(|node| node.name.clone())
        .collect()
}

/// Sets PR info on an already-built forest by branch name. Branches missing
/// from `infos` are reset to no PR.
pub fn apply_pr_info(roots: &mut [BranchNode], infos: &HashMap<String, PrInfo>) {
    let mut stack: Vec<&mut BranchNode> = roots.iter_mut().collect();
    while let Some(node) = stack.pop() {
        node.pr = infos.get(&node.name).copied().unwrap_or_default();
        stack.extend(node.children.iter_mut());
    }
}
