#![forbid(unsafe_code)]

//! Scroll threshold gate.
//!
//! Small scroll movements stay inside the buffer screens already
//! materialized around the viewport, so re-rendering for them is wasted work.
//! The gate accepts an offset only once it has moved at least a quarter of the
//! container height away from the last accepted offset.

/// Tracks the last accepted scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollGate {
    last_accepted: u32,
    container_height: u32,
}

impl ScrollGate {
    #[must_use]
    pub const fn new(container_height: u32) -> Self {
        Self {
            last_accepted: 0,
            container_height,
        }
    }

    #[must_use]
    pub const fn last_accepted(&self) -> u32 {
        self.last_accepted
    }

    #[must_use]
    pub const fn container_height(&self) -> u32 {
        self.container_height
    }

    pub fn set_container_height(&mut self, container_height: u32) {
        self.container_height = container_height;
    }

    /// Whether `scroll_top` is far enough from the last accepted offset.
    #[must_use]
    pub fn passes(&self, scroll_top: u32) -> bool {
        let delta = u64::from(scroll_top.abs_diff(self.last_accepted));
        4 * delta >= u64::from(self.container_height)
    }

    /// Offer a new offset. Accepted offsets become the new reference point.
    pub fn offer(&mut self, scroll_top: u32) -> bool {
        let accepted = self.passes(scroll_top);
        if accepted {
            self.last_accepted = scroll_top;
        }
        accepted
    }

    /// Force the reference point, e.g. after a programmatic scroll.
    pub fn reset(&mut self, scroll_top: u32) {
        self.last_accepted = scroll_top;
    }
}
