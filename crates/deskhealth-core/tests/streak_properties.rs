//! Streak derivation against whole logs.

use chrono::{FixedOffset, NaiveDate, Utc};
use deskhealth_core::stats::{log_exercise, log_focus_time};
use deskhealth_core::{ActivityLog, ActivityStats, DailyLog, DayGap};
use proptest::prelude::*;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn utc() -> ActivityStats<Utc> {
    ActivityStats::with_zone(Utc, DayGap::ElapsedMillis)
}

#[test]
fn gap_breaks_the_current_run() {
    let mut log = ActivityLog::new();
    for d in ["2024-01-01", "2024-01-02", "2024-01-04"] {
        log = log_exercise(log, date(d));
    }
    let stats = utc().recompute(&log, date("2024-01-04"));
    assert_eq!(stats.best_streak, 2);
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.today.exercises_completed, 1);
}

#[test]
fn empty_log_is_all_zero() {
    let stats = utc().recompute(&ActivityLog::new(), date("2024-06-01"));
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.best_streak, 0);
    assert_eq!(stats.today, DailyLog::default());
}

#[test]
fn an_hour_of_focus_counts_as_a_streak_day() {
    let today = date("2024-03-10");
    let log = log_focus_time(ActivityLog::new(), today, 45);
    assert_eq!(utc().recompute(&log, today).current_streak, 0);

    let log = log_focus_time(log, today, 15);
    let stats = utc().recompute(&log, today);
    assert_eq!(stats.today.minutes_focused, 60);
    assert_eq!(stats.current_streak, 1);
}

#[test]
fn streak_ending_yesterday_is_still_current() {
    let mut log = ActivityLog::new();
    for d in ["2024-05-01", "2024-05-02", "2024-05-03"] {
        log = log_exercise(log, date(d));
    }
    assert_eq!(utc().recompute(&log, date("2024-05-04")).current_streak, 3);
    assert_eq!(utc().recompute(&log, date("2024-05-05")).current_streak, 0);
    assert_eq!(utc().recompute(&log, date("2024-05-05")).best_streak, 3);
}

#[test]
fn log_persists_as_date_keyed_json() {
    let log = log_focus_time(log_exercise(ActivityLog::new(), date("2024-01-02")), date("2024-01-02"), 5);
    let json = serde_json::to_value(&log).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"2024-01-02": {"exercisesCompleted": 1, "minutesFocused": 5}})
    );
}

proptest! {
    #[test]
    fn consecutive_days_form_one_streak(start in 0i64..3000, len in 1u32..40) {
        let first = date("2018-01-01") + chrono::Duration::days(start);
        let mut log = ActivityLog::new();
        for i in 0..len {
            log = log_exercise(log, first + chrono::Duration::days(i as i64));
        }
        let last = first + chrono::Duration::days(len as i64 - 1);

        for stats in [
            utc().recompute(&log, last),
            ActivityStats::with_zone(FixedOffset::east_opt(9 * 3600).unwrap(), DayGap::Calendar)
                .recompute(&log, last),
        ] {
            prop_assert_eq!(stats.best_streak, len);
            prop_assert_eq!(stats.current_streak, len);
        }
    }

    #[test]
    fn best_streak_bounds_current(days in proptest::collection::btree_set(0i64..60, 0..30)) {
        let base = date("2024-01-01");
        let mut log = ActivityLog::new();
        for d in &days {
            log = log_exercise(log, base + chrono::Duration::days(*d));
        }
        let stats = utc().recompute(&log, base + chrono::Duration::days(60));
        prop_assert!(stats.current_streak <= stats.best_streak);
        prop_assert!(stats.best_streak as usize <= days.len());
    }
}
