#![forbid(unsafe_code)]

//! Widget options and shallow option patches.
//!
//! [`TreeOptions`] holds the plain settings. [`OptionsPatch`] carries the
//! fields a caller wants to change, plus the two things that cannot live in
//! plain options: a replacement tree borrow and the change callback.
//!
//! With the `serde` feature, options use the original widget's keys:
//!
//! ```json
//! { "indent": 20, "height": 300, "lineHeight": 26, "maxLine": 300,
//!   "multiple": false, "debounceMs": 50 }
//! ```

use std::fmt;
use std::time::Duration;

use vtree_core::node::Node;
use vtree_render::hit::RowGeometry;
use vtree_render::markup::{DEFAULT_INDENT, RowMarkup};
use vtree_render::viewport::{
    DEFAULT_CONTAINER_HEIGHT, DEFAULT_MAX_LINE, DEFAULT_ROW_HEIGHT, ViewportConfig,
};
use vtree_runtime::scheduler::{DEFAULT_DEBOUNCE, SchedulerConfig};

/// Callback invoked with a node after its checked state was toggled.
pub type ChangeCallback<'t> = Box<dyn FnMut(&Node) + 't>;

/// Tree widget options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct TreeOptions {
    /// Indent per depth level in px.
    pub indent: u32,
    /// Container max height in px. Also the scroll buffer.
    pub height: u32,
    /// Fixed row height in px.
    pub line_height: u32,
    /// Row count at which windowing starts.
    pub max_line: usize,
    /// Show tri-state checkboxes.
    pub multiple: bool,
    /// Quiet period before a scroll render.
    #[cfg_attr(feature = "serde", serde(rename = "debounceMs", with = "millis"))]
    pub debounce: Duration,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            height: DEFAULT_CONTAINER_HEIGHT,
            line_height: DEFAULT_ROW_HEIGHT,
            max_line: DEFAULT_MAX_LINE,
            multiple: false,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl TreeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: u32) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_line_height(mut self, line_height: u32) -> Self {
        self.line_height = line_height;
        self
    }

    #[must_use]
    pub fn with_max_line(mut self, max_line: usize) -> Self {
        self.max_line = max_line;
        self
    }

    #[must_use]
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportConfig {
        ViewportConfig::new(self.line_height, self.height).with_max_line(self.max_line)
    }

    #[must_use]
    pub fn markup(&self) -> RowMarkup {
        RowMarkup::new(self.indent, self.multiple)
    }

    #[must_use]
    pub fn geometry(&self) -> RowGeometry {
        RowGeometry::new(self.indent, self.multiple)
    }

    #[must_use]
    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig::default().with_delay(self.debounce)
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Fields to change on a live widget. Unset fields keep their value.
#[derive(Default)]
pub struct OptionsPatch<'t> {
    pub tree: Option<&'t mut Vec<Node>>,
    pub indent: Option<u32>,
    pub height: Option<u32>,
    pub line_height: Option<u32>,
    pub max_line: Option<usize>,
    pub multiple: Option<bool>,
    pub debounce: Option<Duration>,
    pub on_change: Option<ChangeCallback<'t>>,
}

impl<'t> OptionsPatch<'t> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the borrowed tree.
    #[must_use]
    pub fn tree(mut self, tree: &'t mut Vec<Node>) -> Self {
        self.tree = Some(tree);
        self
    }

    #[must_use]
    pub fn indent(mut self, indent: u32) -> Self {
        self.indent = Some(indent);
        self
    }

    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn line_height(mut self, line_height: u32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    #[must_use]
    pub fn max_line(mut self, max_line: usize) -> Self {
        self.max_line = Some(max_line);
        self
    }

    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = Some(multiple);
        self
    }

    #[must_use]
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = Some(debounce);
        self
    }

    /// Replace the change callback.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&Node) + 't) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Merge the plain fields into `options`.
    pub fn apply_to(&self, options: &mut TreeOptions) {
        if let Some(indent) = self.indent {
            options.indent = indent;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(line_height) = self.line_height {
            options.line_height = line_height;
        }
        if let Some(max_line) = self.max_line {
            options.max_line = max_line;
        }
        if let Some(multiple) = self.multiple {
            options.multiple = multiple;
        }
        if let Some(debounce) = self.debounce {
            options.debounce = debounce;
        }
    }
}

impl fmt::Debug for OptionsPatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsPatch")
            .field("tree", &self.tree.as_ref().map(|t| t.len()))
            .field("indent", &self.indent)
            .field("height", &self.height)
            .field("line_height", &self.line_height)
            .field("max_line", &self.max_line)
            .field("multiple", &self.multiple)
            .field("debounce", &self.debounce)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
