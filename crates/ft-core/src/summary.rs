//! The six top-level aggregations, each a pure function of
//! `(records, now, params)`.
//!
//! Record lists arrive already scoped to one user and one time window by
//! the storage layer; every function here re-checks day indices
//! defensively but performs no I/O and captures no clock.

use chrono::TimeZone;
use serde::Serialize;

use crate::bucket::{self, DAY_MS};
use crate::delay::{self, DelayPattern};
use crate::rank::{self, DistractionSource, PeakHour, TopDistraction};
use crate::reduce::{self, StatCounts};
use crate::score::{self, StreakImpact, SystemStatus};
use crate::series;
use crate::trend::{self, TrendDirection};
use crate::types::{ActivityEvent, Task};

const DEFAULT_WINDOW_DAYS: usize = 7;
const MAX_REPORT_DAYS: u32 = 30;
const STOPPAGE_CAP: usize = 6;

/// Procrastination-analyzer summary over the trailing week.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub top_distraction: Option<String>,
    pub top_distractions: Vec<TopDistraction>,
    pub top_distraction_trend: TrendDirection,
    pub peak_hours: Vec<u8>,
    pub peak_hours_trend: TrendDirection,
    pub streak_impact: StreakImpact,
    pub system_status: SystemStatus,
    pub analyzing_label: String,
    pub counts: StatCounts,
    pub focus_score: u8,
    pub completed_sessions: u32,
    pub avg_session_minutes: f64,
    pub distractions: u32,
    pub delay_patterns: Vec<DelayPattern>,
    /// Active tasks sorted by due date, soonest first.
    pub active_tasks: Vec<Task>,
}

/// Builds the procrastination-analyzer summary.
///
/// `events` must cover the trailing 7-day window ending at `now`;
/// `active_tasks` is the user's active task list. The trend comparison
/// splits the last 48 hours at the 24-hour mark.
#[must_use]
pub fn stats_summary(events: &[ActivityEvent], active_tasks: &[Task], now: i64) -> StatsSummary {
    let recent_start = now - DAY_MS;
    let last_period_start = now - 2 * DAY_MS;

    let fold = reduce::fold_events(events, recent_start);
    let split = reduce::split_periods(events, last_period_start, recent_start, now);

    let top_distractions = rank::top_distractions(&fold.distraction_labels, 3);
    let top_distraction = top_distractions.first().map(|t| t.label.clone());

    let top_distraction_trend = top_distraction.as_ref().map_or(TrendDirection::Flat, |label| {
        trend::trend(
            split.current_distraction_minutes.minutes_for(label),
            split.previous_distraction_minutes.minutes_for(label),
        )
    });

    let peak_hours_trend = trend::trend(
        split.current_hour_counts.max_count(),
        split.previous_hour_counts.max_count(),
    );

    let focus_score = score::focus_score(fold.counts.focus_minutes, fold.counts.total_minutes);

    let mut active_tasks = active_tasks.to_vec();
    active_tasks.sort_by_key(|task| task.due_date);

    StatsSummary {
        analyzing_label: top_distraction
            .clone()
            .unwrap_or_else(|| "all sessions".to_string()),
        top_distraction,
        peak_hours: rank::busiest_hours(&fold.hour_counts),
        top_distractions,
        top_distraction_trend,
        peak_hours_trend,
        streak_impact: score::streak_impact(
            fold.recent_focus_minutes,
            fold.recent_distraction_minutes,
        ),
        system_status: score::system_status(fold.counts.total_minutes, focus_score),
        focus_score,
        completed_sessions: fold.counts.focus_count,
        avg_session_minutes: score::avg_session_minutes(
            fold.counts.focus_minutes,
            fold.counts.focus_count,
        ),
        distractions: fold.counts.distraction_count,
        counts: fold.counts,
        delay_patterns: delay::delay_patterns(&active_tasks, now),
        active_tasks,
    }
}

/// One day of the weekly focus trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyFocusDay {
    /// Start of the day, epoch ms.
    pub date: i64,
    /// Three-letter weekday label.
    pub day: String,
    pub focus_minutes: u64,
    /// Focus minutes as hours, 1 decimal.
    pub focus_hours: f64,
    /// Per-day focus score, 0 on empty days.
    pub focus_score: u8,
}

/// One narrative insight shown on the analytics panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub title: String,
    pub text: String,
}

/// Analytics-panel summary over the trailing week.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub weekly_focus_trend: Vec<WeeklyFocusDay>,
    pub distraction_sources: Vec<DistractionSource>,
    pub peak_performance_hours: Vec<PeakHour>,
    pub ai_insights: Vec<Insight>,
}

/// Builds the analytics summary for the 7 calendar days starting at
/// `window_start` (normally today's local midnight minus six days).
///
/// Events whose day index falls outside the window contribute nothing,
/// not even to the flat totals.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn analytics_summary<Tz: TimeZone>(
    events: &[ActivityEvent],
    window_start: i64,
    tz: &Tz,
) -> AnalyticsSummary {
    let mut daily_focus = [0_u64; DEFAULT_WINDOW_DAYS];
    let mut daily_total = [0_u64; DEFAULT_WINDOW_DAYS];
    let mut distraction_labels = reduce::LabelTotals::default();
    let mut focus_by_hour = reduce::HourMinutes::default();

    let mut focus_minutes = 0_u64;
    let mut distraction_minutes = 0_u64;
    let mut focus_sessions = 0_u32;
    let mut distraction_sessions = 0_u32;

    for event in events {
        let index = bucket::day_index(event.created_at, window_start);
        let Ok(index) = usize::try_from(index) else {
            continue;
        };
        if index >= DEFAULT_WINDOW_DAYS {
            continue;
        }

        let minutes = u64::from(event.minutes);
        daily_total[index] += minutes;

        if event.is_focus() {
            daily_focus[index] += minutes;
            focus_minutes += minutes;
            focus_sessions += 1;
            focus_by_hour.add(event.hour(), minutes);
        } else {
            distraction_minutes += minutes;
            distraction_sessions += 1;
            distraction_labels.add(&event.label, minutes);
        }
    }

    let weekly_focus_trend = (0..DEFAULT_WINDOW_DAYS)
        .map(|index| {
            let date = window_start + i64::try_from(index).unwrap_or(0) * DAY_MS;
            #[allow(clippy::cast_precision_loss)]
            let focus_hours = bucket::round_to(daily_focus[index] as f64 / 60.0, 1);
            WeeklyFocusDay {
                date,
                day: bucket::day_label(date, tz).to_string(),
                focus_minutes: daily_focus[index],
                focus_hours,
                focus_score: score::focus_score(daily_focus[index], daily_total[index]),
            }
        })
        .collect();

    let distraction_sources = rank::distraction_sources(&distraction_labels);
    let peak_performance_hours = rank::peak_performance_hours(&focus_by_hour);

    let ai_insights = build_insights(
        focus_minutes,
        distraction_minutes,
        focus_sessions,
        distraction_sessions,
        distraction_sources.first(),
    );

    AnalyticsSummary {
        weekly_focus_trend,
        distraction_sources,
        peak_performance_hours,
        ai_insights,
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn build_insights(
    focus_minutes: u64,
    distraction_minutes: u64,
    focus_sessions: u32,
    distraction_sessions: u32,
    top_distraction: Option<&DistractionSource>,
) -> Vec<Insight> {
    let total_minutes = focus_minutes + distraction_minutes;
    let focus_ratio = score::focus_ratio(focus_minutes, total_minutes);
    let total_sessions = focus_sessions + distraction_sessions;
    let session_ratio = if total_sessions > 0 {
        f64::from(distraction_sessions) / f64::from(total_sessions)
    } else {
        0.0
    };

    let focus_balance = if total_minutes == 0 {
        "Log focus sessions to see how your attention is split.".to_string()
    } else {
        let advice = if focus_ratio >= 0.7 {
            "Keep protecting those deep work blocks."
        } else if focus_ratio >= 0.5 {
            "Aim to reduce low-value interruptions."
        } else {
            "Consider setting stricter boundaries for focus time."
        };
        format!(
            "Focus time is {}% of your tracked work. {advice}",
            (focus_ratio * 100.0).round() as u32
        )
    };

    let context_switching = if total_sessions == 0 {
        "Track distractions to understand context switches.".to_string()
    } else {
        let advice = if session_ratio <= 0.25 {
            "You are maintaining strong continuity."
        } else if session_ratio <= 0.5 {
            "Try batching quick checks to cut switches."
        } else {
            "High switching suggests your focus is getting fragmented."
        };
        format!(
            "Distractions account for {}% of sessions. {advice}",
            (session_ratio * 100.0).round() as u32
        )
    };

    let top_distraction_text = top_distraction.map_or_else(
        || "No dominant distraction source yet. Keep logging to spot patterns.".to_string(),
        |source| {
            format!(
                "{} drives {}% of distraction time. Consider muting it during focus blocks.",
                source.label, source.percentage
            )
        },
    );

    vec![
        Insight {
            title: "Focus balance".to_string(),
            text: focus_balance,
        },
        Insight {
            title: "Context switching".to_string(),
            text: context_switching,
        },
        Insight {
            title: "Top distraction".to_string(),
            text: top_distraction_text,
        },
    ]
}

/// Dashboard scalars plus four parallel 7-day sparklines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub focus_minutes: u64,
    pub distraction_count: u64,
    pub tasks_completed: u64,
    pub productivity_score: u8,
    pub focus_minutes_sparkline: Vec<u64>,
    pub distraction_count_sparkline: Vec<u64>,
    pub tasks_completed_sparkline: Vec<u64>,
    pub productivity_score_sparkline: Vec<u8>,
}

/// Builds the dashboard stats for the 7 calendar days starting at
/// `window_start`. `done_tasks` must be the user's done tasks; they bucket
/// by creation day since no completion timestamp exists.
#[must_use]
pub fn dashboard_stats(
    events: &[ActivityEvent],
    done_tasks: &[Task],
    window_start: i64,
) -> DashboardStats {
    let days = DEFAULT_WINDOW_DAYS;
    let focus_sparkline = series::focus_minutes_by_day(events, window_start, days);
    let distraction_minutes = series::distraction_minutes_by_day(events, window_start, days);
    let distraction_sparkline = series::distraction_counts_by_day(events, window_start, days);
    let tasks_sparkline = series::tasks_completed_by_day(done_tasks, window_start, days);
    let productivity_sparkline = series::productivity_by_day(&focus_sparkline, &distraction_minutes);

    let focus_minutes: u64 = focus_sparkline.iter().sum();
    let distraction_total: u64 = distraction_minutes.iter().sum();

    DashboardStats {
        focus_minutes,
        distraction_count: distraction_sparkline.iter().sum(),
        tasks_completed: tasks_sparkline.iter().sum(),
        productivity_score: score::focus_score(focus_minutes, focus_minutes + distraction_total),
        focus_minutes_sparkline: focus_sparkline,
        distraction_count_sparkline: distraction_sparkline,
        tasks_completed_sparkline: tasks_sparkline,
        productivity_score_sparkline: productivity_sparkline,
    }
}

/// Aggregate header of a weekly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReportSummary {
    pub start_date: i64,
    pub end_date: i64,
    pub days: u32,
    pub focus_minutes: u64,
    pub distraction_minutes: u64,
    pub total_minutes: u64,
    pub focus_score: u8,
}

/// One exportable per-day row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReportRow {
    pub date: i64,
    pub focus_minutes: u64,
    pub distraction_minutes: u64,
}

/// Per-day export rows plus their aggregate summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReport {
    pub summary: WeeklyReportSummary,
    pub csv_rows: Vec<WeeklyReportRow>,
}

/// Builds an N-day report ending on the day that starts at `today_start`.
///
/// `days` is clamped to `1..=30`; the window covers `days` calendar days
/// with the last one being today.
#[must_use]
pub fn weekly_report(events: &[ActivityEvent], today_start: i64, days: u32) -> WeeklyReport {
    let days = days.clamp(1, MAX_REPORT_DAYS);
    let start_date = today_start - i64::from(days - 1) * DAY_MS;
    let day_count = days as usize;

    let focus_by_day = series::focus_minutes_by_day(events, start_date, day_count);
    let distraction_by_day = series::distraction_minutes_by_day(events, start_date, day_count);

    let csv_rows: Vec<_> = (0..day_count)
        .map(|index| WeeklyReportRow {
            date: start_date + i64::try_from(index).unwrap_or(0) * DAY_MS,
            focus_minutes: focus_by_day[index],
            distraction_minutes: distraction_by_day[index],
        })
        .collect();

    let focus_minutes: u64 = focus_by_day.iter().sum();
    let distraction_minutes: u64 = distraction_by_day.iter().sum();
    let total_minutes = focus_minutes + distraction_minutes;

    WeeklyReport {
        summary: WeeklyReportSummary {
            start_date,
            end_date: today_start,
            days,
            focus_minutes,
            distraction_minutes,
            total_minutes,
            focus_score: score::focus_score(focus_minutes, total_minutes),
        },
        csv_rows,
    }
}

/// Projected cost of distraction time over a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistractionCost {
    pub total_distraction_minutes: u64,
    pub hourly_rate: f64,
    pub daily_cost: f64,
    pub annual_projection: f64,
    /// One distraction event counts as one context switch.
    pub context_switches: u32,
}

/// Prices the distraction minutes in `events` at `hourly_rate`
/// (default 25) spread over `period_days`.
#[must_use]
pub fn distraction_cost(
    events: &[ActivityEvent],
    hourly_rate: Option<f64>,
    period_days: u32,
) -> DistractionCost {
    let mut total_distraction_minutes = 0_u64;
    let mut context_switches = 0_u32;
    for event in events {
        if event.is_distraction() {
            total_distraction_minutes += u64::from(event.minutes);
            context_switches += 1;
        }
    }

    let hourly_rate = hourly_rate.unwrap_or(score::DEFAULT_HOURLY_RATE);
    let daily_cost = score::daily_cost(total_distraction_minutes, period_days, hourly_rate);

    DistractionCost {
        total_distraction_minutes,
        hourly_rate,
        daily_cost,
        annual_projection: score::annual_projection(daily_cost),
        context_switches,
    }
}

/// One recent distraction with its impact score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stoppage {
    pub label: String,
    pub minutes: u32,
    pub impact_score: u8,
    pub created_at: i64,
}

/// The most recent distractions and the window they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveStoppages {
    pub stoppages: Vec<Stoppage>,
    pub since: i64,
}

/// Picks the newest distractions out of `recent_events`, capped at six.
///
/// `recent_events` must already be newest-first and bounded to the
/// trailing 24 hours starting at `since`.
#[must_use]
pub fn live_stoppages(recent_events: &[ActivityEvent], since: i64) -> LiveStoppages {
    let stoppages = recent_events
        .iter()
        .filter(|event| event.is_distraction())
        .take(STOPPAGE_CAP)
        .map(|event| Stoppage {
            label: event.label.clone(),
            minutes: event.minutes,
            impact_score: score::impact_score(event.minutes),
            created_at: event.created_at,
        })
        .collect();

    LiveStoppages { stoppages, since }
}
