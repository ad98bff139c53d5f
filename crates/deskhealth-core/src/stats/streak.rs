//! Streak derivation.
//!
//! A streak day is a logged day with at least one exercise or at least an
//! hour of focus. Streaks are runs of streak days one day apart; the
//! current streak only counts while its last day is today or yesterday.

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::activity::{ActivityLog, DailyLog};

/// Minimum exercises for a streak day.
pub const STREAK_MIN_EXERCISES: u32 = 1;
/// Minimum focused minutes for a streak day.
pub const STREAK_MIN_FOCUS_MINUTES: u32 = 60;

const DAY_MS: i64 = 86_400_000;
const HOUR_MS: i64 = 3_600_000;

/// How the distance between two streak days is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayGap {
    /// Milliseconds between local midnights, rounded up to whole days.
    ///
    /// A day that gains an hour at a DST change reads as a two-day gap and
    /// breaks the streak.
    #[default]
    ElapsedMillis,
    /// Plain calendar-day difference.
    Calendar,
}

/// Derived statistics; never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    pub today: DailyLog,
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Whether `log` has a qualifying entry for `date`.
pub fn is_streak_day(log: &ActivityLog, date: NaiveDate) -> bool {
    log.get(date).is_some_and(qualifies)
}

fn qualifies(day: &DailyLog) -> bool {
    day.exercises_completed >= STREAK_MIN_EXERCISES
        || day.minutes_focused >= STREAK_MIN_FOCUS_MINUTES
}

/// Streak calculator bound to a time zone for midnight conversion.
#[derive(Debug, Clone)]
pub struct ActivityStats<Tz: TimeZone = Local> {
    tz: Tz,
    gap: DayGap,
}

impl ActivityStats<Local> {
    pub fn new() -> Self {
        Self::with_zone(Local, DayGap::default())
    }
}

impl Default for ActivityStats<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> ActivityStats<Tz> {
    pub fn with_zone(tz: Tz, gap: DayGap) -> Self {
        Self { tz, gap }
    }

    /// Recompute today's counters and both streaks from the full log.
    pub fn recompute(&self, log: &ActivityLog, today: NaiveDate) -> StreakStats {
        let days: Vec<NaiveDate> = log
            .iter()
            .filter(|(_, day)| qualifies(day))
            .map(|(date, _)| date)
            .collect();

        let mut stats = StreakStats {
            today: log.day(today),
            ..StreakStats::default()
        };
        let Some(&last) = days.last() else {
            return stats;
        };

        let mut current_sequence = 1u32;
        let mut max_sequence = 1u32;
        for pair in days.windows(2) {
            if self.days_between(pair[0], pair[1]) == 1 {
                current_sequence += 1;
            } else {
                max_sequence = max_sequence.max(current_sequence);
                current_sequence = 1;
            }
        }
        max_sequence = max_sequence.max(current_sequence);

        stats.best_streak = max_sequence;
        let yesterday = today.pred_opt();
        if last == today || Some(last) == yesterday {
            stats.current_streak = current_sequence;
        }
        stats
    }

    fn days_between(&self, earlier: NaiveDate, later: NaiveDate) -> i64 {
        match self.gap {
            DayGap::Calendar => (later - earlier).num_days().abs(),
            DayGap::ElapsedMillis => {
                let diff = (self.midnight_ms(later) - self.midnight_ms(earlier)).abs();
                // Ceiling division; diff is non-negative.
                (diff + DAY_MS - 1) / DAY_MS
            }
        }
    }

    fn midnight_ms(&self, date: NaiveDate) -> i64 {
        let naive = date.and_time(chrono::NaiveTime::MIN);
        match self.tz.from_local_datetime(&naive) {
            chrono::LocalResult::Single(dt) => dt.timestamp_millis(),
            chrono::LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
            // Midnight skipped by a DST jump: read it with the offset in
            // force an hour earlier, landing on the first instant after the gap.
            chrono::LocalResult::None => self
                .tz
                .from_local_datetime(&(naive - chrono::Duration::hours(1)))
                .earliest()
                .map(|dt| dt.timestamp_millis() + HOUR_MS)
                .unwrap_or_else(|| naive.and_utc().timestamp_millis()),
        }
    }
}

/// Recompute using the local time zone and the default gap measurement.
pub fn recompute(log: &ActivityLog, today: NaiveDate) -> StreakStats {
    ActivityStats::new().recompute(log, today)
}
