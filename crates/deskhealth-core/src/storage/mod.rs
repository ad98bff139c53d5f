mod config;
pub mod database;
pub mod store;

pub use config::{
    Config, MealScheduleConfig, NotificationsConfig, StatsConfig, TimerConfig, WorkScheduleConfig,
};
pub use database::Database;
pub use store::{
    load_config_or_default, load_log_or_default, CatalogStore, ConfigFile, ConfigStore,
    KeyValueStore, LogStore, MemoryStore,
};

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Returns `~/.config/deskhealth[-dev]/` based on DESKHEALTH_ENV.
///
/// Set DESKHEALTH_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DESKHEALTH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("deskhealth-dev")
    } else {
        base_dir.join("deskhealth")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| CoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
