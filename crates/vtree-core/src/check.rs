#![forbid(unsafe_code)]

//! Tri-state checked propagation.
//!
//! Two passes keep a tree consistent after a click:
//!
//! - [`set_subtree_checked`] pushes a state down to every descendant.
//! - [`recompute_ancestors`] rebuilds every internal node's state bottom-up
//!   from its direct children.
//!
//! # Rule
//!
//! Each child weighs 1 if `All`, ½ if `Half`, 0 if `None`. A parent whose
//! children sum to 0 is `None`, one whose sum equals its child count is `All`,
//! anything in between is `Half`. Weights are kept in half-units so the
//! comparison is exact.
//!
//! The recomputation always covers the entire tree rather than the clicked
//! path. Clicks arrive at user rate, so O(tree) per toggle is acceptable.

use crate::lookup::find_by_value_mut;
use crate::node::{Checked, Node};

/// Set `status` on `node` and every descendant.
pub fn set_subtree_checked(node: &mut Node, status: Checked) {
    node.set_checked(status);
    if let Some(children) = node.children_mut() {
        for child in children {
            set_subtree_checked(child, status);
        }
    }
}

/// Recompute the state of every internal node from its children.
///
/// Nodes with an empty `children` sequence keep whatever state they have.
pub fn recompute_ancestors(tree: &mut [Node]) {
    recompute_level(tree);
}

/// Recompute `nodes` and return their summed weight in half-units.
fn recompute_level(nodes: &mut [Node]) -> usize {
    let mut sum = 0;
    for node in nodes.iter_mut() {
        if let Some(children) = node.children_mut()
            && !children.is_empty()
        {
            let len = children.len();
            let child_sum = recompute_level(children);
            node.set_checked(state_for(child_sum, len));
        }
        sum += node.checked().half_units();
    }
    sum
}

/// Map a half-unit sum over `len` children to a state.
fn state_for(half_units: usize, len: usize) -> Checked {
    if half_units == 0 {
        Checked::None
    } else if half_units == len * Checked::All.half_units() {
        Checked::All
    } else {
        Checked::Half
    }
}

/// Toggle the node identified by `value` the way a direct click does.
///
/// The node flips between `All` and `None`, the new state cascades to its
/// descendants, and the whole tree is recomputed. Returns the node's new
/// state, or `None` when no node carries `value`.
pub fn toggle_checked(tree: &mut [Node], value: &str) -> Option<Checked> {
    let node = find_by_value_mut(tree, value)?;
    let next = node.checked().toggled();
    set_subtree_checked(node, next);
    recompute_ancestors(tree);
    crate::debug!(
        target: crate::logging::TARGET_MODEL,
        value,
        checked = next.as_str(),
        "toggled checked"
    );
    Some(next)
}
