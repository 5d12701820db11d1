//! Domain enums as the single source of truth for storage strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for unrecognized enum strings read from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field}: {value}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// What kind of activity an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Intentional, productive time.
    Focus,
    /// An interruption or context switch.
    Distraction,
}

impl EventKind {
    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Distraction => "distraction",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(Self::Focus),
            "distraction" => Ok(Self::Distraction),
            _ => Err(UnknownVariant::new("event kind", s)),
        }
    }
}

/// How much a task matters if it slips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

impl Impact {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Impact {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(UnknownVariant::new("impact", s)),
        }
    }
}

/// Stored task status.
///
/// `Overdue` is a legacy stored variant produced by resolving a task as
/// not completed. Overdue-ness relative to a given instant is a *computed*
/// predicate (see [`crate::types::Task::is_overdue`]); both representations
/// appear in real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Done,
    Overdue,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Done => "done",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "done" => Ok(Self::Done),
            "overdue" => Ok(Self::Overdue),
            _ => Err(UnknownVariant::new("task status", s)),
        }
    }
}

/// How a task was resolved by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskResolution {
    Completed,
    NotCompleted,
}

impl TaskResolution {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::NotCompleted => "not_completed",
        }
    }

    /// The stored status a resolution maps to.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self {
            Self::Completed => TaskStatus::Done,
            Self::NotCompleted => TaskStatus::Overdue,
        }
    }
}

impl fmt::Display for TaskResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskResolution {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            "not_completed" => Ok(Self::NotCompleted),
            _ => Err(UnknownVariant::new("task resolution", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_roundtrip() {
        for kind in [EventKind::Focus, EventKind::Distraction] {
            let parsed: EventKind = kind.as_str().parse().expect("should parse");
            assert_eq!(parsed, kind);
        }
        assert!("idle".parse::<EventKind>().is_err());
    }

    #[test]
    fn impact_roundtrip() {
        for impact in [
            Impact::Low,
            Impact::Medium,
            Impact::High,
            Impact::Critical,
        ] {
            let parsed: Impact = impact.as_str().parse().expect("should parse");
            assert_eq!(parsed, impact);
        }
    }

    #[test]
    fn task_status_roundtrip() {
        for status in [TaskStatus::Active, TaskStatus::Done, TaskStatus::Overdue] {
            let parsed: TaskStatus = status.as_str().parse().expect("should parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn resolution_maps_to_status() {
        assert_eq!(TaskResolution::Completed.status(), TaskStatus::Done);
        assert_eq!(TaskResolution::NotCompleted.status(), TaskStatus::Overdue);
    }

    #[test]
    fn serde_uses_storage_strings() {
        let json = serde_json::to_string(&EventKind::Distraction).unwrap();
        assert_eq!(json, "\"distraction\"");
        let json = serde_json::to_string(&TaskResolution::NotCompleted).unwrap();
        assert_eq!(json, "\"not_completed\"");
    }

    #[test]
    fn unknown_variant_message() {
        let err = "banana".parse::<Impact>().unwrap_err();
        assert_eq!(err.to_string(), "unknown impact: banana");
    }
}
