pub mod config;
pub mod exercise;
pub mod log;
pub mod run;
pub mod schedule;
pub mod stats;

use chrono::{Local, NaiveDate};
use deskhealth_core::storage::load_config_or_default;
use deskhealth_core::{Config, ConfigFile};

/// Configuration from the data directory. An invalid file is reported and
/// replaced by defaults.
pub(crate) fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let file = ConfigFile::default_location()?;
    Ok(load_config_or_default(&file))
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
