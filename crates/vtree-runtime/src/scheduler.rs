//! Render scheduling: immediate renders and a trailing-edge debounce.
//!
//! The scheduler never renders by itself. It answers "render now?" and the
//! caller performs the render, which keeps it usable from any host loop.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use vtree_runtime::scheduler::{RenderReason, RenderScheduler, ScheduleAction, SchedulerConfig};
//!
//! let mut scheduler = RenderScheduler::new(SchedulerConfig::default());
//! let t0 = Instant::now();
//!
//! // Scroll events arm (and re-arm) the deadline.
//! scheduler.request_debounced_at(RenderReason::Scroll, t0);
//! scheduler.request_debounced_at(RenderReason::Scroll, t0 + Duration::from_millis(20));
//! assert_eq!(scheduler.tick_at(t0 + Duration::from_millis(60)), ScheduleAction::None);
//!
//! // Quiet for a full delay after the last request: render once.
//! let action = scheduler.tick_at(t0 + Duration::from_millis(70));
//! assert!(action.should_render());
//! ```
//!
//! # Invariants
//!
//! - **Latest wins**: a debounced request replaces the pending deadline, so a
//!   burst fires once, `delay` after its last request.
//! - **Immediate cancels**: an immediate request drops the pending deadline;
//!   the synchronous render already shows the latest state.
//! - **Deterministic**: every time-dependent method has an `_at(now)` form,
//!   so identical request sequences yield identical decisions.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `delay = 0` | Fires on the first tick at or after the request |
//! | `now` earlier than the request | Treated as zero elapsed time |
//! | `now + delay` not representable | Deadline is never reached; only an immediate request or `cancel` clears it |
//! | Tick with nothing pending | Returns [`ScheduleAction::None`] |

#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

use vtree_core::logging::TARGET_SCHEDULE;

/// Default debounce delay.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

#[inline]
fn duration_since_or_zero(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier).unwrap_or(Duration::ZERO)
}

/// Scheduler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Quiet period after the last debounced request before rendering.
    pub delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DEBOUNCE,
        }
    }
}

impl SchedulerConfig {
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// What triggered a render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderReason {
    /// Widget construction.
    Create,
    /// Options were replaced.
    Options,
    /// A node's checked status was toggled.
    ToggleChecked,
    /// A node was expanded or collapsed.
    ToggleExpand,
    /// The scroll offset moved past the gate.
    Scroll,
    /// The host asked for a render.
    Explicit,
}

impl RenderReason {
    /// Stable string representation for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Options => "options",
            Self::ToggleChecked => "toggle_checked",
            Self::ToggleExpand => "toggle_expand",
            Self::Scroll => "scroll",
            Self::Explicit => "explicit",
        }
    }
}

/// Decision returned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    /// Nothing to do.
    None,
    /// Render now.
    Render {
        reason: RenderReason,
        /// Time between the first coalesced request and this render.
        /// Zero for immediate renders.
        waited: Duration,
        /// Number of requests folded into this render.
        coalesced: u32,
    },
}

impl ScheduleAction {
    #[must_use]
    pub const fn should_render(&self) -> bool {
        matches!(self, Self::Render { .. })
    }

    #[must_use]
    pub const fn reason(&self) -> Option<RenderReason> {
        match self {
            Self::None => None,
            Self::Render { reason, .. } => Some(*reason),
        }
    }
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Immediate render requests.
    pub immediate: u64,
    /// Debounced render requests.
    pub debounced_requests: u64,
    /// Debounced requests that replaced a pending deadline.
    pub superseded: u64,
    /// Debounced renders that fired.
    pub fired: u64,
    /// Pending deadlines dropped by an immediate render or [`RenderScheduler::cancel`].
    pub cancelled: u64,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    reason: RenderReason,
    /// `None` when `now + delay` overflows the clock.
    deadline: Option<Instant>,
    first_request: Instant,
    coalesced: u32,
}

/// Immediate + debounced render scheduler.
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    config: SchedulerConfig,
    pending: Option<Pending>,
    stats: SchedulerStats,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl RenderScheduler {
    #[must_use]
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            pending: None,
            stats: SchedulerStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Change the delay. A pending deadline keeps its old value.
    pub fn set_delay(&mut self, delay: Duration) {
        self.config.delay = delay;
    }

    /// Request a synchronous render.
    ///
    /// Always returns [`ScheduleAction::Render`]; any pending debounced
    /// render is dropped.
    pub fn request_immediate(&mut self, reason: RenderReason) -> ScheduleAction {
        self.stats.immediate += 1;
        if let Some(pending) = self.pending.take() {
            self.stats.cancelled += 1;
            tracing::trace!(
                target: TARGET_SCHEDULE,
                reason = reason.as_str(),
                dropped = pending.reason.as_str(),
                "immediate render dropped pending deadline"
            );
        }
        ScheduleAction::Render {
            reason,
            waited: Duration::ZERO,
            coalesced: 1,
        }
    }

    /// Request a debounced render.
    pub fn request_debounced(&mut self, reason: RenderReason) {
        self.request_debounced_at(reason, Instant::now());
    }

    /// Request a debounced render at a specific time (for testing).
    ///
    /// (Re)arms the deadline to `now + delay`.
    pub fn request_debounced_at(&mut self, reason: RenderReason, now: Instant) {
        self.stats.debounced_requests += 1;
        let deadline = now.checked_add(self.config.delay);
        match self.pending.as_mut() {
            Some(pending) => {
                self.stats.superseded += 1;
                pending.reason = reason;
                pending.deadline = deadline;
                pending.coalesced += 1;
            }
            None => {
                self.pending = Some(Pending {
                    reason,
                    deadline,
                    first_request: now,
                    coalesced: 1,
                });
            }
        }
        tracing::trace!(
            target: TARGET_SCHEDULE,
            reason = reason.as_str(),
            delay_ms = self.config.delay.as_millis() as u64,
            "debounced render armed"
        );
    }

    /// Tick the scheduler (call from the host loop or timer).
    pub fn tick(&mut self) -> ScheduleAction {
        self.tick_at(Instant::now())
    }

    /// Tick at a specific time (for testing).
    ///
    /// Fires the pending render once its deadline has passed.
    pub fn tick_at(&mut self, now: Instant) -> ScheduleAction {
        let Some(pending) = self.pending else {
            return ScheduleAction::None;
        };
        match pending.deadline {
            Some(deadline) if now >= deadline => {}
            _ => return ScheduleAction::None,
        }

        self.pending = None;
        self.stats.fired += 1;
        let waited = duration_since_or_zero(now, pending.first_request);
        tracing::debug!(
            target: TARGET_SCHEDULE,
            reason = pending.reason.as_str(),
            coalesced = pending.coalesced,
            waited_ms = waited.as_millis() as u64,
            "debounced render fired"
        );
        ScheduleAction::Render {
            reason: pending.reason,
            waited,
            coalesced: pending.coalesced,
        }
    }

    /// Time until the pending render should fire, if any.
    #[must_use]
    pub fn time_until_render(&self, now: Instant) -> Option<Duration> {
        let pending = self.pending?;
        Some(
            pending
                .deadline
                .map_or(Duration::MAX, |d| d.saturating_duration_since(now)),
        )
    }

    /// Check if a debounced render is pending.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending render. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let had = self.pending.take().is_some();
        if had {
            self.stats.cancelled += 1;
        }
        had
    }

    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
