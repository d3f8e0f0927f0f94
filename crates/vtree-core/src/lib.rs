#![forbid(unsafe_code)]

//! Core: tree model, lookup, tri-state check propagation, and row flattening.

pub mod check;
pub mod event;
pub mod flatten;
pub mod logging;
pub mod lookup;
pub mod node;

pub use check::{recompute_ancestors, set_subtree_checked, toggle_checked};
pub use event::{Hit, RowPart};
pub use flatten::{FlatRow, flatten, visible_row_count};
pub use lookup::{collect_checked, find_by_value, find_by_value_mut, node_count};
pub use node::{Checked, Node};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
