#![forbid(unsafe_code)]

//! Structured hit results.
//!
//! Hosts translate a pointer interaction into a [`Hit`]: which flattened row
//! was hit and which part of that row. The router only ever looks at these
//! values, never at markup or selectors.

/// Sub-element of a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowPart {
    /// Title text or row background.
    #[default]
    Body,
    /// Depth indentation in front of the icon.
    Indent,
    /// Open/close icon of an internal node.
    ExpandIcon,
    /// Placeholder icon of a leaf.
    LeafIcon,
    /// Checkbox icon, present in `multiple` mode.
    Checkbox,
}

impl RowPart {
    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Indent => "indent",
            Self::ExpandIcon => "expand_icon",
            Self::LeafIcon => "leaf_icon",
            Self::Checkbox => "checkbox",
        }
    }
}

/// A pointer interaction resolved to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hit {
    /// Index into the flattened row list (not the materialized slice).
    pub row: usize,
    pub part: RowPart,
}

impl Hit {
    #[must_use]
    pub const fn new(row: usize, part: RowPart) -> Self {
        Self { row, part }
    }
}
