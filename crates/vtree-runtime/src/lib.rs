#![forbid(unsafe_code)]

//! Runtime: render scheduling, scroll gating, and the host boundary.

pub mod host;
pub mod scheduler;
pub mod scroll_gate;

pub use host::{Host, HostOutputs, MemoryHost, MemoryHostError};
pub use scheduler::{
    DEFAULT_DEBOUNCE, RenderReason, RenderScheduler, ScheduleAction, SchedulerConfig,
    SchedulerStats,
};
pub use scroll_gate::ScrollGate;
