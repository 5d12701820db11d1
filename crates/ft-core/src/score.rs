//! Derived-score formulas: focus/productivity scores, session averages,
//! streak and status classification, and distraction-cost math.
//!
//! Every function is a pure formula over already-reduced totals, with
//! division-by-zero replaced by an explicit zero result.

use serde::Serialize;

use crate::bucket;

/// Default hourly rate for cost projections, in currency units.
pub const DEFAULT_HOURLY_RATE: f64 = 25.0;

/// Streak classification over the trailing recent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakImpact {
    StrongMomentum,
    MixedPattern,
    HighDrag,
    NoRecentActivity,
}

impl StreakImpact {
    /// Narrative phrase shown in summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongMomentum => "strong focus momentum",
            Self::MixedPattern => "mixed focus pattern",
            Self::HighDrag => "high distraction drag",
            Self::NoRecentActivity => "no recent activity",
        }
    }
}

/// Overall status light derived from the focus score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Stable,
    Warning,
    Critical,
}

impl SystemStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Focus share of total minutes as an integer percentage, clamped to
/// `0..=100`. Zero when nothing was logged.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn focus_score(focus_minutes: u64, total_minutes: u64) -> u8 {
    if total_minutes == 0 {
        return 0;
    }
    let score = (focus_minutes as f64 / total_minutes as f64 * 100.0).round();
    score.clamp(0.0, 100.0) as u8
}

/// Per-day productivity score: same formula as [`focus_score`], applied to
/// one day bucket's focus and distraction minutes.
#[must_use]
pub fn productivity_score(focus_minutes: u64, distraction_minutes: u64) -> u8 {
    focus_score(focus_minutes, focus_minutes + distraction_minutes)
}

/// Average focus session length in minutes, rounded to 1 decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn avg_session_minutes(focus_minutes: u64, focus_count: u32) -> f64 {
    if focus_count == 0 {
        return 0.0;
    }
    bucket::round_to(focus_minutes as f64 / f64::from(focus_count), 1)
}

/// Raw focus ratio in `[0, 1]`, unrounded. Feeds narrative thresholds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn focus_ratio(focus_minutes: u64, total_minutes: u64) -> f64 {
    if total_minutes == 0 {
        return 0.0;
    }
    focus_minutes as f64 / total_minutes as f64
}

/// Classifies the trailing window by its distraction ratio.
///
/// Thresholds: ratio at most 0.20 is strong momentum, at most 0.45 is a
/// mixed pattern, above that is drag. No activity at all gets its own
/// class rather than a zero ratio.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn streak_impact(recent_focus_minutes: u64, recent_distraction_minutes: u64) -> StreakImpact {
    let total = recent_focus_minutes + recent_distraction_minutes;
    if total == 0 {
        return StreakImpact::NoRecentActivity;
    }
    let ratio = recent_distraction_minutes as f64 / total as f64;
    if ratio <= 0.20 {
        StreakImpact::StrongMomentum
    } else if ratio <= 0.45 {
        StreakImpact::MixedPattern
    } else {
        StreakImpact::HighDrag
    }
}

/// Status light: no data and a mid-range score both land on `Warning`.
///
/// The conflation is deliberate, an empty week and a mediocre one both
/// warrant attention without being critical.
#[must_use]
pub fn system_status(total_minutes: u64, focus_score: u8) -> SystemStatus {
    if total_minutes == 0 {
        return SystemStatus::Warning;
    }
    if focus_score >= 70 {
        SystemStatus::Stable
    } else if focus_score >= 45 {
        SystemStatus::Warning
    } else {
        SystemStatus::Critical
    }
}

/// Daily cost of distraction time at `hourly_rate`, rounded to cents.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn daily_cost(distraction_minutes: u64, period_days: u32, hourly_rate: f64) -> f64 {
    if period_days == 0 {
        return 0.0;
    }
    let hours_per_day = distraction_minutes as f64 / 60.0 / f64::from(period_days);
    bucket::round_to(hours_per_day * hourly_rate, 2)
}

/// Yearly projection of a daily cost, rounded to cents.
#[must_use]
pub fn annual_projection(daily_cost: f64) -> f64 {
    bucket::round_to(daily_cost * 365.0, 2)
}

/// Impact of one distraction event on a 0..=100 scale.
///
/// Linear in minutes, saturating at a 30-minute stoppage.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn impact_score(minutes: u32) -> u8 {
    let raw = (f64::from(minutes) / 30.0 * 100.0).round();
    raw.min(100.0) as u8
}
