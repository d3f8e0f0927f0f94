#![forbid(unsafe_code)]

//! Render: viewport windowing, HTML row markup, and pointer hit geometry.
//!
//! Everything here is a pure function of the flattened rows, the options,
//! and the scroll offset. Scheduling and host output live in `vtree-runtime`.

pub mod hit;
pub mod markup;
pub mod viewport;

pub use hit::{RowGeometry, hit_test};
pub use markup::{RowMarkup, write_spacer};
pub use viewport::{ViewportConfig, Window};
