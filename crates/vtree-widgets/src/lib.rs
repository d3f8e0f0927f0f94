#![forbid(unsafe_code)]

//! The virtualized tree widget.
//!
//! [`TreeView`] renders a borrowed `Vec<Node>` into a [`Host`] container,
//! materializing only the rows around the viewport once the visible row
//! count reaches `max_line`.
//!
//! [`Host`]: vtree_runtime::Host

pub mod options;
pub mod router;
pub mod tree_view;

pub use options::{ChangeCallback, OptionsPatch, TreeOptions};
pub use router::{Action, route};
pub use tree_view::TreeView;
