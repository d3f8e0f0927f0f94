#![forbid(unsafe_code)]

//! Feature-gated logging facade.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported at
//! the crate root, so call sites write `vtree_core::debug!(..)` or
//! `crate::trace!(..)` no matter which build they are in. Without the
//! feature the same names expand to nothing and span macros hand back a
//! [`NoopSpan`], keeping the hot render path free of logging cost.
//!
//! Targets used across the workspace are collected here so subscribers can
//! filter on them (`RUST_LOG=vtree::render=debug`).

/// Target for tree mutations (check propagation, expand toggles).
pub const TARGET_MODEL: &str = "vtree::model";
/// Target for flatten/window/markup passes.
pub const TARGET_RENDER: &str = "vtree::render";
/// Target for scheduler decisions.
pub const TARGET_SCHEDULE: &str = "vtree::schedule";
/// Target for routed interactions.
pub const TARGET_INPUT: &str = "vtree::input";

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, trace_span, warn};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan) when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan) when tracing is disabled.
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Stand-in for `tracing::Span` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span. The guard does nothing.
    #[must_use]
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;

#[cfg(test)]
mod tests {
    #[test]
    fn span_macros_enter_without_panicking() {
        let span = crate::debug_span!("vtree.test", rows = 3);
        let _guard = span.enter();
        crate::debug!(target: "vtree::model", value = "a", "inside span");
    }

    #[test]
    fn targets_share_prefix() {
        for target in [
            super::TARGET_MODEL,
            super::TARGET_RENDER,
            super::TARGET_SCHEDULE,
            super::TARGET_INPUT,
        ] {
            assert!(target.starts_with("vtree::"), "{target}");
        }
    }
}
