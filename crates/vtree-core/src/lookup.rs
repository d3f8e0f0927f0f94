#![forbid(unsafe_code)]

//! Depth-first queries over a whole tree.
//!
//! All lookups walk collapsed subtrees too: collapsing hides rows from the
//! flattened output, it does not remove nodes.

use crate::node::{Checked, Node};

/// Find the first node (pre-order) whose `value` equals `value`.
#[must_use]
pub fn find_by_value<'a>(tree: &'a [Node], value: &str) -> Option<&'a Node> {
    for node in tree {
        if node.value() == value {
            return Some(node);
        }
        if let Some(found) = find_by_value(node.children(), value) {
            return Some(found);
        }
    }
    None
}

/// Mutable variant of [`find_by_value`].
pub fn find_by_value_mut<'a>(tree: &'a mut [Node], value: &str) -> Option<&'a mut Node> {
    for node in tree {
        if node.value() == value {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut()
            && let Some(found) = find_by_value_mut(children, value)
        {
            return Some(found);
        }
    }
    None
}

/// Total number of nodes, expanded or not.
#[must_use]
pub fn node_count(tree: &[Node]) -> usize {
    tree.iter().map(Node::subtree_len).sum()
}

/// Every node in state `status`, in pre-order.
#[must_use]
pub fn collect_checked(tree: &[Node], status: Checked) -> Vec<&Node> {
    fn walk<'a>(nodes: &'a [Node], status: Checked, out: &mut Vec<&'a Node>) {
        for node in nodes {
            if node.checked() == status {
                out.push(node);
            }
            walk(node.children(), status, out);
        }
    }

    let mut out = Vec::new();
    walk(tree, status, &mut out);
    out
}
