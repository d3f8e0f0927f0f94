#![forbid(unsafe_code)]

//! Synthetic tree generation.

use vtree::Node;

/// `roots` roots, each with `depth` levels of `fanout` children below it.
///
/// Values are dotted index paths (`"3.0.12"`), so they are unique. Internal
/// nodes start expanded.
#[must_use]
pub fn synthetic_tree(roots: usize, fanout: usize, depth: usize) -> Vec<Node> {
    (0..roots)
        .map(|r| build(r.to_string(), fanout, depth))
        .collect()
}

fn build(path: String, fanout: usize, depth: usize) -> Node {
    let title = format!("Item {path}");
    if depth == 0 {
        return Node::new(path, title);
    }
    let children = (0..fanout)
        .map(|i| build(format!("{path}.{i}"), fanout, depth - 1))
        .collect();
    Node::new(path, title)
        .with_expand(true)
        .with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_and_values() {
        let tree = synthetic_tree(2, 3, 2);
        assert_eq!(vtree::node_count(&tree), 2 * (1 + 3 + 9));
        assert_eq!(vtree::visible_row_count(&tree), 26);
        assert!(vtree::find_by_value(&tree, "1.2.0").is_some_and(Node::is_leaf));
        assert!(tree[0].is_expanded());
    }

    #[test]
    fn zero_depth_gives_leaf_roots() {
        let tree = synthetic_tree(5, 10, 0);
        assert!(tree.iter().all(Node::is_leaf));
    }
}
