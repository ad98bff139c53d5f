use clap::Subcommand;
use deskhealth_core::storage::load_log_or_default;
use deskhealth_core::{Database, LogStore};

#[derive(Subcommand)]
pub enum LogAction {
    /// Count one completed exercise for today
    Exercise,
    /// Add focused minutes to today
    Focus {
        /// Minutes to add
        minutes: u32,
    },
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut log = load_log_or_default(&db);
    let today = super::today();

    let day = match action {
        LogAction::Exercise => log.log_exercise(today),
        LogAction::Focus { minutes } => log.log_focus_time(today, minutes),
    };
    db.save_log(&log)?;
    tracing::info!(%today, "activity logged");
    super::print_json(&day)
}
