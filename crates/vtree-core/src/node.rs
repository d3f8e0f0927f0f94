#![forbid(unsafe_code)]

//! Tree nodes and their tri-state checked flag.
//!
//! A tree is a plain `Vec<Node>` of roots owned by the application. The
//! widget borrows it mutably and flips `checked` / `expand` in place, so the
//! application sees every interaction once the borrow ends.
//!
//! # Example
//!
//! ```
//! use vtree_core::node::{Checked, Node};
//!
//! let tree = vec![
//!     Node::new("src", "src")
//!         .with_expand(true)
//!         .child(Node::new("src/main.rs", "main.rs"))
//!         .child(Node::new("src/lib.rs", "lib.rs")),
//!     Node::new("Cargo.toml", "Cargo.toml").with_checked(Checked::All),
//! ];
//!
//! assert_eq!(tree[0].children().len(), 2);
//! assert!(tree[1].is_leaf());
//! ```

/// Tri-state checkbox value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Checked {
    /// Nothing in this subtree is checked.
    #[default]
    None,
    /// Some, but not all, of this subtree is checked.
    Half,
    /// The whole subtree is checked.
    All,
}

impl Checked {
    /// Stable lowercase name, used in CSS class names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Half => "half",
            Self::All => "all",
        }
    }

    /// Weight of this state in half-units (`All` = 2, `Half` = 1, `None` = 0).
    #[must_use]
    pub const fn half_units(self) -> usize {
        match self {
            Self::None => 0,
            Self::Half => 1,
            Self::All => 2,
        }
    }

    /// State reached by a direct click: `All` becomes `None`, anything else
    /// becomes `All`. A click never lands on `Half`.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::All => Self::None,
            Self::None | Self::Half => Self::All,
        }
    }
}

impl core::fmt::Display for Checked {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the tree.
///
/// `children == None` marks a leaf. `Some(vec![])` is an internal node that
/// happens to have no children; check propagation treats it like a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    value: String,
    title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    checked: Checked,
    #[cfg_attr(feature = "serde", serde(default))]
    expand: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub(crate) children: Option<Vec<Node>>,
}

impl Node {
    /// Create a collapsed, unchecked leaf.
    #[must_use]
    pub fn new(value: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            title: title.into(),
            checked: Checked::None,
            expand: false,
            children: None,
        }
    }

    /// Append a child, turning this node into an internal node.
    #[must_use]
    pub fn child(mut self, node: Node) -> Self {
        self.children.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<Node>) -> Self {
        self.children = Some(nodes);
        self
    }

    /// Set the initial checked state.
    #[must_use]
    pub fn with_checked(mut self, checked: Checked) -> Self {
        self.checked = checked;
        self
    }

    /// Set whether the node starts expanded.
    #[must_use]
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Correlation key, unique across the tree.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn checked(&self) -> Checked {
        self.checked
    }

    pub fn set_checked(&mut self, checked: Checked) {
        self.checked = checked;
    }

    /// Whether the node is expanded. Meaningless on leaves.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expand
    }

    pub fn set_expand(&mut self, expand: bool) {
        self.expand = expand;
    }

    /// Flip `expand`. Leaves are left untouched; returns whether anything
    /// changed.
    pub fn toggle_expand(&mut self) -> bool {
        if self.is_leaf() {
            return false;
        }
        self.expand = !self.expand;
        true
    }

    /// Whether this node has no `children` sequence at all.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Children, or an empty slice for leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Mutable children, or `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.children.as_mut()
    }

    /// Number of nodes in this subtree, including `self` and collapsed
    /// descendants.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(Node::subtree_len).sum::<usize>()
    }
}
