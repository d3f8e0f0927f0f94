#![forbid(unsafe_code)]

//! Flatten a nested tree into its visible rows.
//!
//! Hierarchy is expressed by indentation only, so the renderer works on a
//! flat list: pre-order, children right after their parent at `depth + 1`,
//! and only beneath nodes whose `expand` flag is set. A collapsed subtree
//! contributes exactly one row.
//!
//! Rows borrow from the tree and are rebuilt on every pass; nothing is
//! cached because `expand` may change between renders.

use crate::node::Node;

/// One visible row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow<'a> {
    pub node: &'a Node,
    /// Nesting level, 0 for roots.
    pub depth: usize,
}

impl<'a> FlatRow<'a> {
    /// Correlation key of the row's node.
    #[must_use]
    pub fn value(&self) -> &'a str {
        self.node.value()
    }
}

/// Visible rows of `tree` in render order.
#[must_use]
pub fn flatten(tree: &[Node]) -> Vec<FlatRow<'_>> {
    let mut out = Vec::with_capacity(tree.len());
    push_rows(tree, 0, &mut out);
    out
}

fn push_rows<'a>(nodes: &'a [Node], depth: usize, out: &mut Vec<FlatRow<'a>>) {
    for node in nodes {
        out.push(FlatRow { node, depth });
        if node.is_expanded() {
            push_rows(node.children(), depth + 1, out);
        }
    }
}

/// Number of rows [`flatten`] would produce, without allocating.
#[must_use]
pub fn visible_row_count(tree: &[Node]) -> usize {
    tree.iter()
        .map(|node| {
            1 + if node.is_expanded() {
                visible_row_count(node.children())
            } else {
                0
            }
        })
        .sum()
}
