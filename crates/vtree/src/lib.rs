#![forbid(unsafe_code)]

//! vtree public facade crate.
//!
//! Re-exports the tree model, windowing, runtime, and widget crates and
//! offers [`create_tree`] plus a prelude for day-to-day usage.
//!
//! ```
//! use vtree::prelude::*;
//!
//! let mut tree: Vec<Node> = (0..1000).map(|i| Node::new(format!("n{i}"), "row")).collect();
//! let view = create_tree(MemoryHost::new(), &mut tree, TreeOptions::default())?;
//! assert_eq!(view.window().len(), 34);
//! # Ok::<(), vtree::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use vtree_core::{
    Checked, FlatRow, Hit, Node, RowPart, collect_checked, find_by_value, find_by_value_mut,
    flatten, node_count, recompute_ancestors, set_subtree_checked, toggle_checked,
    visible_row_count,
};

// --- Render re-exports -----------------------------------------------------

pub use vtree_render::{RowGeometry, RowMarkup, ViewportConfig, Window, hit_test};

// --- Runtime re-exports ----------------------------------------------------

pub use vtree_runtime::{
    Host, HostOutputs, MemoryHost, MemoryHostError, RenderReason, RenderScheduler,
    ScheduleAction, SchedulerConfig, SchedulerStats, ScrollGate,
};

// --- Widget re-exports -----------------------------------------------------

pub use vtree_widgets::{Action, ChangeCallback, OptionsPatch, TreeOptions, TreeView};

/// Attach a tree widget to `host` and render it once.
///
/// The widget borrows `tree` mutably until [`TreeView::destroy`].
pub fn create_tree<'t, H: Host>(
    host: H,
    tree: &'t mut Vec<Node>,
    options: TreeOptions,
) -> std::result::Result<TreeView<'t, H>, H::Error> {
    TreeView::create(host, tree, options)
}

/// Parse a tree from the JSON shape the widget's markup mirrors:
/// `[{"value", "title", "checked", "expand", "children"}]`.
#[cfg(feature = "serde")]
pub fn tree_from_json(json: &str) -> Result<Vec<Node>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a tree from a JSON reader.
#[cfg(feature = "serde")]
pub fn tree_from_reader(reader: impl std::io::Read) -> Result<Vec<Node>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse options (`indent`, `height`, `lineHeight`, `maxLine`, `multiple`,
/// `debounceMs`). Missing keys keep their defaults.
#[cfg(feature = "serde")]
pub fn options_from_json(json: &str) -> Result<TreeOptions> {
    Ok(serde_json::from_str(json)?)
}

// --- Errors ---------------------------------------------------------------

/// Top-level error type for vtree apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while loading tree data.
    Io(std::io::Error),
    /// Malformed tree or options JSON.
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
    /// Host failure with message.
    Host(String),
}

impl Error {
    /// Wrap any host error.
    pub fn host(err: impl fmt::Display) -> Self {
        Self::Host(err.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            #[cfg(feature = "serde")]
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::Host(msg) => write!(f, "host: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            #[cfg(feature = "serde")]
            Self::Json(err) => Some(err),
            Self::Host(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<MemoryHostError> for Error {
    fn from(err: MemoryHostError) -> Self {
        Self::host(err)
    }
}

/// Standard result type for vtree APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Checked, Error, Hit, Host, MemoryHost, Node, OptionsPatch, Result, RowPart, TreeOptions,
        TreeView, create_tree,
    };

    pub use crate::{core, render, runtime, widgets};
}

pub use vtree_core as core;
pub use vtree_render as render;
pub use vtree_runtime as runtime;
pub use vtree_widgets as widgets;
