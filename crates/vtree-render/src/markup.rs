#![forbid(unsafe_code)]

//! HTML assembly for the materialized window.
//!
//! Rows are emitted flat; depth is expressed by an indent span of
//! `depth * indent` px. The class names are the widget's styling contract:
//!
//! | Element | Classes |
//! |---------|---------|
//! | row | `tree-item checked-{none,half,all}`, `value` attribute = node value |
//! | indent | `tree-item-indent` |
//! | internal node icon | `icon icon-node icon-node-{open,close}` |
//! | leaf icon | `icon icon-leaf` |
//! | checkbox (multiple mode) | `icon icon-check-{none,half,all}` |
//!
//! Titles and values are HTML-escaped. Zero-height spacers are omitted.

use std::fmt::Write as _;

use v_htmlescape::escape;
use vtree_core::flatten::FlatRow;

use crate::viewport::Window;

/// Default indent per depth level in px.
pub const DEFAULT_INDENT: u32 = 20;

/// Rough per-row byte estimate used to size the output buffer.
const ROW_BYTES_HINT: usize = 192;

/// Row rendering settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMarkup {
    /// Indent per depth level in px.
    pub indent: u32,
    /// Render the checkbox icon.
    pub multiple: bool,
}

impl Default for RowMarkup {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            multiple: false,
        }
    }
}

impl RowMarkup {
    #[must_use]
    pub const fn new(indent: u32, multiple: bool) -> Self {
        Self { indent, multiple }
    }

    /// Append one row's markup to `out`.
    pub fn write_row(&self, out: &mut String, row: &FlatRow<'_>) {
        let node = row.node;
        let checked = node.checked().as_str();
        let indent_px = row.depth as u64 * u64::from(self.indent);

        // Writing into a String cannot fail.
        let _ = write!(
            out,
            r#"<div class="tree-item checked-{checked}" value="{}">"#,
            escape(node.value())
        );
        let _ = write!(
            out,
            r#"<span class="tree-item-indent" style="width: {indent_px}px"></span>"#
        );
        if node.is_leaf() {
            out.push_str(r#"<span class="icon icon-leaf"></span>"#);
        } else {
            let status = if node.is_expanded() { "open" } else { "close" };
            let _ = write!(out, r#"<span class="icon icon-node icon-node-{status}"></span>"#);
        }
        if self.multiple {
            let _ = write!(out, r#"<span class="icon icon-check-{checked}"></span>"#);
        }
        let _ = write!(out, "{}</div>", escape(node.title()));
    }

    /// Markup for `window` over the full flattened `rows`.
    ///
    /// Rows outside `window.range` are never touched, so the cost follows
    /// the window size rather than the tree size.
    #[must_use]
    pub fn render(&self, rows: &[FlatRow<'_>], window: &Window) -> String {
        let end = window.range.end.min(rows.len());
        let start = window.range.start.min(end);
        let slice = &rows[start..end];

        let mut out = String::with_capacity(slice.len() * ROW_BYTES_HINT + 64);
        write_spacer(&mut out, window.before_height);
        for row in slice {
            self.write_row(&mut out, row);
        }
        write_spacer(&mut out, window.after_height);
        out
    }
}

/// Append a spacer of `height` px, or nothing when `height` is zero.
pub fn write_spacer(out: &mut String, height: u64) {
    if height == 0 {
        return;
    }
    let _ = write!(out, r#"<div style="height: {height}px"></div>"#);
}
