use chrono::Local;
use clap::Subcommand;
use deskhealth_core::storage::load_log_or_default;
use deskhealth_core::{ActivityStats, Database};
use serde_json::json;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's counters and streaks
    Today,
    /// Current and best streak, with all-time totals
    Streak,
    /// Per-day counters for recent days
    History {
        /// Number of days, ending today
        #[arg(long, default_value = "7")]
        days: u32,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let db = Database::open()?;
    let log = load_log_or_default(&db);
    let today = super::today();
    let stats = ActivityStats::with_zone(Local, config.stats.day_gap).recompute(&log, today);

    match action {
        StatsAction::Today => super::print_json(&stats)?,
        StatsAction::Streak => super::print_json(&json!({
            "current_streak": stats.current_streak,
            "best_streak": stats.best_streak,
            "total_exercises": log.total_exercises(),
            "total_minutes_focused": log.total_minutes_focused(),
        }))?,
        StatsAction::History { days } => super::print_json(&log.last_days(today, days))?,
    }
    Ok(())
}
