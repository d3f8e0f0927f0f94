#![forbid(unsafe_code)]

//! Viewport window calculation for fixed-height rows.
//!
//! Given the flattened row count and the current scroll offset, decide which
//! contiguous slice of rows to materialize and how tall the spacers above
//! and below it must be so the scrollbar keeps its full extent.
//!
//! # Policy
//!
//! - Fewer than `max_line` rows: no windowing. Everything is materialized
//!   and the host scrolls natively.
//! - Otherwise the window spans three screens: one buffer screen above the
//!   viewport, the viewport, one buffer screen below.
//!
//! ```text
//! before = max(scroll_top - buffer, 0)          buffer = container height
//! start  = floor(before / row_height)
//! count  = min(floor(3 * container / row_height), N - start)
//! after  = total - before - count * row_height
//! ```
//!
//! When the window reaches the last row, `before` is capped at
//! `total - count * row_height` so the spacers never overshoot the list.
//!
//! # Invariants
//!
//! - `before + count * row_height + after == total` for every input.
//! - For `scroll_top` in `[0, total - container]` and a container at least
//!   three rows tall, every row intersecting the viewport is materialized.
//!
//! Fixed row heights make offset → index O(1); variable heights would need a
//! prefix-sum index instead.

use std::ops::Range;

/// Default row height in px.
pub const DEFAULT_ROW_HEIGHT: u32 = 26;
/// Default viewport height in px.
pub const DEFAULT_CONTAINER_HEIGHT: u32 = 300;
/// Default row count below which windowing is bypassed.
pub const DEFAULT_MAX_LINE: usize = 300;

/// Inputs of the window calculation that do not change while scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    /// Fixed height of every row, in px. Zero is treated as 1.
    pub row_height: u32,
    /// Viewport height in px. Also the buffer kept above and below.
    pub container_height: u32,
    /// Row count threshold for windowing.
    pub max_line: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            max_line: DEFAULT_MAX_LINE,
        }
    }
}

impl ViewportConfig {
    #[must_use]
    pub const fn new(row_height: u32, container_height: u32) -> Self {
        Self {
            row_height,
            container_height,
            max_line: DEFAULT_MAX_LINE,
        }
    }

    #[must_use]
    pub const fn with_max_line(mut self, max_line: usize) -> Self {
        self.max_line = max_line;
        self
    }

    /// Row height used in arithmetic (never zero).
    #[must_use]
    pub fn row_px(&self) -> u64 {
        u64::from(self.row_height.max(1))
    }

    /// Space kept materialized above and below the viewport.
    #[must_use]
    pub const fn buffer_height(&self) -> u32 {
        self.container_height
    }

    /// Rows materialized in a windowed pass before clipping at the end.
    #[must_use]
    pub fn window_len(&self) -> usize {
        let rows = 3 * u64::from(self.container_height) / self.row_px();
        usize::try_from(rows).unwrap_or(usize::MAX)
    }

    /// Whether `row_count` rows are rendered through a window.
    #[must_use]
    pub fn is_virtualized(&self, row_count: usize) -> bool {
        row_count >= self.max_line
    }

    /// Compute the window for `row_count` rows at `scroll_top`.
    #[must_use]
    pub fn compute(&self, row_count: usize, scroll_top: u32) -> Window {
        let row = self.row_px();
        let total = row_count as u64 * row;

        if !self.is_virtualized(row_count) {
            return Window {
                range: 0..row_count,
                before_height: 0,
                after_height: 0,
                total_height: total,
                row_height: row,
                virtualized: false,
            };
        }

        let wanted = u64::from(scroll_top)
            .saturating_sub(u64::from(self.buffer_height()))
            .min(total);
        // wanted <= total, so start <= row_count
        let start = (wanted / row) as usize;
        let count = self.window_len().min(row_count - start);
        let materialized = count as u64 * row;
        // Only shrinks when the window touches the end of the list, and never
        // below start * row, so start stays consistent with the spacer.
        let before = wanted.min(total - materialized);
        let after = total - before - materialized;

        vtree_core::trace!(
            target: vtree_core::logging::TARGET_RENDER,
            row_count,
            scroll_top,
            start,
            count,
            before,
            after,
            "window computed"
        );

        Window {
            range: start..start + count,
            before_height: before,
            after_height: after,
            total_height: total,
            row_height: row,
            virtualized: true,
        }
    }
}

/// Slice of flattened rows to materialize, with spacer sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Flattened row indices to materialize.
    pub range: Range<usize>,
    /// Leading spacer height in px.
    pub before_height: u64,
    /// Trailing spacer height in px.
    pub after_height: u64,
    /// Height of all rows in px.
    pub total_height: u64,
    /// Row height the window was computed with.
    pub row_height: u64,
    /// Whether windowing was applied.
    pub virtualized: bool,
}

impl Window {
    /// Number of materialized rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Height of the materialized rows in px.
    #[must_use]
    pub fn materialized_height(&self) -> u64 {
        self.len() as u64 * self.row_height
    }

    /// Whether flattened row `index` is materialized.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }

    /// Flattened index of the materialized row drawn at content offset `y`.
    ///
    /// Returns `None` over a spacer or past the last row. Materialized rows
    /// start right after the leading spacer.
    #[must_use]
    pub fn row_at(&self, y: u64) -> Option<usize> {
        let offset = y.checked_sub(self.before_height)?;
        let index = self.range.start + usize::try_from(offset / self.row_height).ok()?;
        self.contains(index).then_some(index)
    }
}
