use clap::Subcommand;
use deskhealth_core::{Config, ConfigFile, ConfigStore};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.work_duration_min", "meal_schedule.start")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Check the config file without changing it
    Validate,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let file = ConfigFile::default_location()?;
    match action {
        ConfigAction::Get { key } => {
            let config = super::load_config()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = file.load_config()?;
            config.set(&key, &value)?;
            file.save_config(&config)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = super::load_config()?;
            super::print_json(&config)?;
        }
        ConfigAction::Reset => {
            file.save_config(&Config::default())?;
            println!("config reset to defaults");
        }
        ConfigAction::Validate => {
            file.load_config()?;
            println!("{}: ok", file.path().display());
        }
    }
    Ok(())
}
