#![forbid(unsafe_code)]

//! Hit testing over the materialized window.
//!
//! A host that only knows pointer coordinates can resolve them here instead
//! of inspecting markup. Horizontally a row is laid out as
//!
//! ```text
//! | indent (depth * indent) | icon | checkbox (multiple only) | body ... |
//! ```
//!
//! Vertically, `y` is measured in content coordinates (scroll offset plus
//! the offset inside the viewport). Points over a spacer hit nothing.

use vtree_core::event::{Hit, RowPart};
use vtree_core::flatten::FlatRow;

use crate::markup::DEFAULT_INDENT;
use crate::viewport::Window;

/// Default icon width in px.
pub const DEFAULT_ICON_WIDTH: u32 = 16;
/// Default checkbox width in px.
pub const DEFAULT_CHECKBOX_WIDTH: u32 = 16;

/// Horizontal layout of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGeometry {
    pub indent: u32,
    pub icon_width: u32,
    pub checkbox_width: u32,
    /// Whether the checkbox column is present.
    pub multiple: bool,
}

impl Default for RowGeometry {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            icon_width: DEFAULT_ICON_WIDTH,
            checkbox_width: DEFAULT_CHECKBOX_WIDTH,
            multiple: false,
        }
    }
}

impl RowGeometry {
    #[must_use]
    pub fn new(indent: u32, multiple: bool) -> Self {
        Self {
            indent,
            multiple,
            ..Self::default()
        }
    }

    /// Which part of a row at `depth` lies under horizontal offset `x`.
    #[must_use]
    pub fn part_at(&self, row: &FlatRow<'_>, x: u64) -> RowPart {
        let indent_end = row.depth as u64 * u64::from(self.indent);
        if x < indent_end {
            return RowPart::Indent;
        }
        let icon_end = indent_end + u64::from(self.icon_width);
        if x < icon_end {
            return if row.node.is_leaf() {
                RowPart::LeafIcon
            } else {
                RowPart::ExpandIcon
            };
        }
        if self.multiple && x < icon_end + u64::from(self.checkbox_width) {
            return RowPart::Checkbox;
        }
        RowPart::Body
    }
}

/// Resolve a point in content coordinates to a row and row part.
///
/// `rows` is the full flattened list the window was computed over.
#[must_use]
pub fn hit_test(
    window: &Window,
    rows: &[FlatRow<'_>],
    geometry: &RowGeometry,
    x: u64,
    y: u64,
) -> Option<Hit> {
    let index = window.row_at(y)?;
    let row = rows.get(index)?;
    Some(Hit::new(index, geometry.part_at(row, x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportConfig;
    use vtree_core::flatten::flatten;
    use vtree_core::node::Node;

    fn tree() -> Vec<Node> {
        vec![
            Node::new("p", "Parent")
                .with_expand(true)
                .child(Node::new("c", "Child")),
            Node::new("l", "Leaf"),
        ]
    }

    #[test]
    fn parts_across_a_root_row() {
        let tree = tree();
        let rows = flatten(&tree);
        let geo = RowGeometry::new(20, true);
        assert_eq!(geo.part_at(&rows[0], 0), RowPart::ExpandIcon);
        assert_eq!(geo.part_at(&rows[0], 15), RowPart::ExpandIcon);
        assert_eq!(geo.part_at(&rows[0], 16), RowPart::Checkbox);
        assert_eq!(geo.part_at(&rows[0], 31), RowPart::Checkbox);
        assert_eq!(geo.part_at(&rows[0], 32), RowPart::Body);
    }

    #[test]
    fn nested_row_starts_with_indent() {
        let tree = tree();
        let rows = flatten(&tree);
        let geo = RowGeometry::default();
        assert_eq!(rows[1].value(), "c");
        assert_eq!(geo.part_at(&rows[1], 5), RowPart::Indent);
        assert_eq!(geo.part_at(&rows[1], 20), RowPart::LeafIcon);
        // no checkbox column in single mode
        assert_eq!(geo.part_at(&rows[1], 36), RowPart::Body);
    }

    #[test]
    fn hit_test_uses_window_rows() {
        let tree = tree();
        let rows = flatten(&tree);
        let window = ViewportConfig::default().compute(rows.len(), 0);
        let geo = RowGeometry::default();
        assert_eq!(
            hit_test(&window, &rows, &geo, 100, 0),
            Some(Hit::new(0, RowPart::Body))
        );
        assert_eq!(
            hit_test(&window, &rows, &geo, 0, 2 * 26 + 1),
            Some(Hit::new(2, RowPart::LeafIcon))
        );
        assert_eq!(hit_test(&window, &rows, &geo, 0, 3 * 26), None);
    }

    #[test]
    fn spacer_hits_nothing() {
        let tree: Vec<Node> = (0..1000).map(|i| Node::new(format!("n{i}"), "r")).collect();
        let rows = flatten(&tree);
        let window = ViewportConfig::default().compute(rows.len(), 2600);
        let geo = RowGeometry::default();
        assert_eq!(hit_test(&window, &rows, &geo, 50, 100), None);
        // the leading spacer is 2300 px, so row 88 is drawn from there
        assert_eq!(
            hit_test(&window, &rows, &geo, 50, 2300),
            Some(Hit::new(88, RowPart::Body))
        );
        assert_eq!(
            hit_test(&window, &rows, &geo, 50, 2600),
            Some(Hit::new(99, RowPart::Body))
        );
    }
}
