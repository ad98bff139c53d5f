use chrono::Local;
use clap::Subcommand;
use deskhealth_core::{ScheduleEngine, TimeOfDay};
use serde_json::json;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show whether a time falls off duty or inside the meal window
    Check {
        /// Local time as HH:MM (defaults to now)
        #[arg(long)]
        at: Option<TimeOfDay>,
    },
    /// Print the configured windows
    Show,
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let settings = config.schedule_settings();

    match action {
        ScheduleAction::Check { at } => {
            let now = at.unwrap_or_else(|| TimeOfDay::of(&Local::now()));
            let engine = ScheduleEngine::new(settings);
            let off_duty = engine.is_off_duty_at(now);
            let meal_time = config.meal_schedule.enabled && engine.is_meal_time_at(now);
            super::print_json(&json!({
                "at": now,
                "off_duty": off_duty,
                "meal_time": meal_time && !off_duty,
            }))?;
        }
        ScheduleAction::Show => {
            super::print_json(&json!({
                "work": settings.work_window,
                "meal": settings.meal_window,
                "meal_enabled": settings.meal_enabled,
                "work_duration_min": config.timer.work_duration_min,
                "meal_duration_min": config.timer.meal_duration_min,
            }))?;
        }
    }
    Ok(())
}
