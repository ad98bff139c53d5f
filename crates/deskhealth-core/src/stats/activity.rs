//! Per-day activity counters.
//!
//! The log maps a local calendar date to that day's counters. Entries are
//! created lazily by the mutators and never removed.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Counters for a single calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyLog {
    pub exercises_completed: u32,
    pub minutes_focused: u32,
}

/// A day and its counters, as listed by [`ActivityLog::last_days`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub log: DailyLog,
}

/// Date-keyed activity history, serialized as `{"YYYY-MM-DD": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    days: BTreeMap<NaiveDate, DailyLog>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.days.get(&date)
    }

    /// The counters for `date`, zero when nothing was logged.
    pub fn day(&self, date: NaiveDate) -> DailyLog {
        self.days.get(&date).copied().unwrap_or_default()
    }

    /// All logged days in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &DailyLog)> {
        self.days.iter().map(|(d, l)| (*d, l))
    }

    /// Record one completed exercise on `date`.
    pub fn log_exercise(&mut self, date: NaiveDate) -> DailyLog {
        let entry = self.days.entry(date).or_default();
        entry.exercises_completed = entry.exercises_completed.saturating_add(1);
        *entry
    }

    /// Add focused minutes to `date`.
    pub fn log_focus_time(&mut self, date: NaiveDate, minutes: u32) -> DailyLog {
        let entry = self.days.entry(date).or_default();
        entry.minutes_focused = entry.minutes_focused.saturating_add(minutes);
        *entry
    }

    /// The `n` days ending at `today`, oldest first, zero-filled.
    pub fn last_days(&self, today: NaiveDate, n: u32) -> Vec<DayEntry> {
        (0..n)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back as u64)))
            .map(|date| DayEntry {
                date,
                log: self.day(date),
            })
            .collect()
    }

    pub fn total_exercises(&self) -> u64 {
        self.days.values().map(|l| l.exercises_completed as u64).sum()
    }

    pub fn total_minutes_focused(&self) -> u64 {
        self.days.values().map(|l| l.minutes_focused as u64).sum()
    }
}

/// Return `log` with one exercise added on `today`.
pub fn log_exercise(mut log: ActivityLog, today: NaiveDate) -> ActivityLog {
    log.log_exercise(today);
    log
}

/// Return `log` with `minutes` of focus added on `today`.
pub fn log_focus_time(mut log: ActivityLog, today: NaiveDate, minutes: u32) -> ActivityLog {
    log.log_focus_time(today, minutes);
    log
}
