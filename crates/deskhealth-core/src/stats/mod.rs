//! Activity tracking for Desk Health.
//!
//! This module holds the date-keyed activity log and the streak statistics
//! derived from it.

mod activity;
mod streak;

pub use activity::{log_exercise, log_focus_time, ActivityLog, DailyLog, DayEntry};
pub use streak::{
    is_streak_day, recompute, ActivityStats, DayGap, StreakStats, STREAK_MIN_EXERCISES,
    STREAK_MIN_FOCUS_MINUTES,
};
