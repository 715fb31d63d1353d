//! Tree Views
//!
//! Read-only renderings of a display tree, used for debug logging and for
//! asserting on tree shape.

use crate::host::{NodeCollection, TestNode};
use crate::types::ItemId;

/// Render labels as an indented outline, two spaces per level
pub fn render_tree<N: TestNode>(roots: &[N]) -> String {
    let mut lines = Vec::new();
    for (depth, node) in walk(roots) {
        lines.push(format!("{}{}", "  ".repeat(depth), node.label()));
    }
    lines.join("\n")
}

/// Depth-first (depth, id) listing of the tree
pub fn collect_ids<N: TestNode>(roots: &[N]) -> Vec<(usize, ItemId)> {
    walk(roots)
        .into_iter()
        .map(|(depth, node)| (depth, node.id().clone()))
        .collect()
}

fn walk<N: TestNode>(roots: &[N]) -> Vec<(usize, N)> {
    let mut out = Vec::new();
    let mut stack: Vec<(usize, N)> = roots.iter().rev().map(|n| (0, n.clone())).collect();
    while let Some((depth, node)) = stack.pop() {
        let children = node.children().nodes();
        stack.extend(children.into_iter().rev().map(|c| (depth + 1, c)));
        out.push((depth, node));
    }
    out
}
