//! Scheduled time block record.
//!
//! # Invariants
//! - `title` is non-empty after trimming.
//! - `from_time < to_time` by lexicographic comparison of `HH:MM` strings.
//! - `date` carries no time-of-day; grouping is by calendar date only.

use crate::model::record_id::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Work/personal category of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Work,
    Personal,
}

impl TaskKind {
    pub fn from_is_work(is_work: bool) -> Self {
        if is_work {
            Self::Work
        } else {
            Self::Personal
        }
    }

    pub fn is_work(self) -> bool {
        matches!(self, Self::Work)
    }

    /// Display label shown next to a task.
    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
        }
    }
}

/// A timed activity on one calendar day.
///
/// Serialized with camelCase field names so stores written by earlier
/// front ends stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub from_time: String,
    pub to_time: String,
    pub is_work: bool,
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        TaskKind::from_is_work(self.is_work)
    }

    /// `HH:MM - HH:MM` span used by the day view.
    pub fn time_span(&self) -> String {
        format!("{} - {}", self.from_time, self.to_time)
    }
}

/// Parses a persisted task date.
///
/// Accepts a bare `YYYY-MM-DD` date or an ISO-8601 date-time whose first ten
/// characters are the date (`2024-03-05T14:30:00.000Z`). The date component
/// is taken as written; no timezone conversion happens, so a `...Z` value is
/// grouped under its UTC day even where the writer's local day differed.
/// Timezones are not modelled.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10)?;
    let rest = &trimmed[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

mod calendar_date {
    use super::parse_calendar_date;
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid calendar date `{raw}`")))
    }
}
