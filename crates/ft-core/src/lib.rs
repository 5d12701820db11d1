//! Core analytics logic for the focus tracker.
//!
//! This crate turns raw, time-stamped focus/distraction events and task
//! records into derived statistics: rolling trends, peak-hour detection,
//! distraction-cost projections, streak/status classification, and
//! day-bucketed sparkline series.
//!
//! Every function here is pure: records arrive already fetched and scoped
//! by the storage layer, `now` is always an explicit parameter, and the
//! same inputs always produce the same output.

pub mod bucket;
pub mod delay;
pub mod kind;
pub mod rank;
pub mod reduce;
pub mod score;
pub mod series;
pub mod summary;
pub mod trend;
pub mod types;

pub use delay::{DelayPattern, delay_patterns};
pub use kind::{EventKind, Impact, TaskResolution, TaskStatus, UnknownVariant};
pub use rank::{DistractionSource, PeakHour, TopDistraction};
pub use reduce::{EventFold, HourCounts, HourMinutes, LabelTotals, PeriodSplit, StatCounts};
pub use score::{StreakImpact, SystemStatus};
pub use summary::{
    AnalyticsSummary, DashboardStats, DistractionCost, LiveStoppages, StatsSummary, WeeklyReport,
};
pub use trend::{TrendDirection, trend};
pub use types::{ActivityEvent, Task};
