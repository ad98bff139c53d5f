//! Persistence seams.
//!
//! Core logic only ever sees in-memory values. Loading and saving go through
//! these traits so the desktop shell, the CLI and tests can each supply their
//! own backing store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::Config;
use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::exercises::ExerciseCatalog;
use crate::stats::ActivityLog;

/// Keys under which values are persisted.
pub mod keys {
    pub const PROGRESS: &str = "deskHealthv1_progress";
    pub const CUSTOM_EXERCISES: &str = "customExercises";
    pub const EXERCISE_STATES: &str = "exerciseStates";
    pub const EXERCISE_ORDER: &str = "exerciseOrder";
    pub const LAST_EXERCISE_ID: &str = "lastExerciseId";
}

/// String key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store for tests and for running without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Decode the JSON stored at `key`.
///
/// # Errors
/// `PersistenceRead` when a value exists but does not decode; store errors
/// are passed through.
pub fn read_json<T: DeserializeOwned, S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| CoreError::PersistenceRead {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Like [`read_json`], but a value that fails to decode is logged and
/// replaced by `T::default()`.
pub fn read_json_or_default<T: DeserializeOwned + Default, S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<T> {
    match read_json(store, key) {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(CoreError::PersistenceRead { key, message }) => {
            tracing::warn!(%key, %message, "discarding unreadable stored value");
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

pub fn write_json<T: Serialize + ?Sized, S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<()> {
    store.set(key, &serde_json::to_string(value)?)
}

/// Persistence of the activity log.
pub trait LogStore {
    fn load_log(&self) -> Result<ActivityLog>;
    fn save_log(&self, log: &ActivityLog) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> LogStore for S {
    fn load_log(&self) -> Result<ActivityLog> {
        Ok(read_json(self, keys::PROGRESS)?.unwrap_or_default())
    }

    fn save_log(&self, log: &ActivityLog) -> Result<()> {
        write_json(self, keys::PROGRESS, log)
    }
}

/// Load the activity log, starting from empty when it cannot be read.
pub fn load_log_or_default<S: LogStore + ?Sized>(store: &S) -> ActivityLog {
    store.load_log().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "activity log unreadable, starting empty");
        ActivityLog::default()
    })
}

/// Persistence of the exercise catalogue and rotation pointer.
pub trait CatalogStore {
    fn load_catalog(&self) -> Result<ExerciseCatalog>;
    fn save_catalog(&self, catalog: &ExerciseCatalog) -> Result<()>;
    fn load_last_exercise(&self) -> Result<Option<String>>;
    fn save_last_exercise(&self, id: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> CatalogStore for S {
    /// Each part is decoded on its own; one corrupt part does not discard the
    /// others.
    fn load_catalog(&self) -> Result<ExerciseCatalog> {
        Ok(ExerciseCatalog {
            custom: read_json_or_default(self, keys::CUSTOM_EXERCISES)?,
            states: read_json_or_default(self, keys::EXERCISE_STATES)?,
            order: read_json_or_default(self, keys::EXERCISE_ORDER)?,
        })
    }

    fn save_catalog(&self, catalog: &ExerciseCatalog) -> Result<()> {
        write_json(self, keys::CUSTOM_EXERCISES, &catalog.custom)?;
        write_json(self, keys::EXERCISE_STATES, &catalog.states)?;
        write_json(self, keys::EXERCISE_ORDER, &catalog.order)
    }

    fn load_last_exercise(&self) -> Result<Option<String>> {
        Ok(self.get(keys::LAST_EXERCISE_ID)?.filter(|id| !id.is_empty()))
    }

    fn save_last_exercise(&self, id: &str) -> Result<()> {
        self.set(keys::LAST_EXERCISE_ID, id)
    }
}

/// Persistence of the application configuration.
pub trait ConfigStore {
    fn load_config(&self) -> Result<Config>;
    fn save_config(&self, config: &Config) -> Result<()>;
}

/// Load configuration, falling back to defaults when it is unreadable or
/// invalid.
pub fn load_config_or_default<S: ConfigStore + ?Sized>(store: &S) -> Config {
    store.load_config().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "configuration rejected, using defaults");
        Config::default()
    })
}

/// `config.toml` on disk.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file inside the application data directory.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Config::path_in(&data_dir()?)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for ConfigFile {
    /// A missing file is created with defaults.
    fn load_config(&self) -> Result<Config> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Config::from_toml(&content).map_err(|e| {
                CoreError::Config(ConfigError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Config::default();
                self.save_config(&cfg)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        let content = config.to_toml()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content).map_err(|e| {
            CoreError::Config(ConfigError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn log_round_trips_through_kv() {
        let store = MemoryStore::new();
        assert!(store.load_log().unwrap().is_empty());

        let mut log = ActivityLog::new();
        log.log_exercise(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        store.save_log(&log).unwrap();
        assert_eq!(store.load_log().unwrap(), log);
    }

    #[test]
    fn corrupt_log_is_an_error_but_recoverable() {
        let store = MemoryStore::new();
        store.set(keys::PROGRESS, "{not json").unwrap();
        assert!(matches!(
            store.load_log(),
            Err(CoreError::PersistenceRead { .. })
        ));
        assert!(load_log_or_default(&store).is_empty());
    }

    #[test]
    fn catalog_parts_degrade_independently() {
        let store = MemoryStore::new();
        store.set(keys::EXERCISE_ORDER, r#"["2","1"]"#).unwrap();
        store.set(keys::EXERCISE_STATES, "garbage").unwrap();
        let catalog = store.load_catalog().unwrap();
        assert_eq!(catalog.order, vec!["2".to_string(), "1".to_string()]);
        assert!(catalog.states.is_empty());
    }

    #[test]
    fn catalog_and_pointer_round_trip() {
        let store = MemoryStore::new();
        let mut catalog = ExerciseCatalog::new();
        catalog.toggle_enabled("3").unwrap();
        store.save_catalog(&catalog).unwrap();
        store.save_last_exercise("4").unwrap();

        assert_eq!(store.load_catalog().unwrap(), catalog);
        assert_eq!(store.load_last_exercise().unwrap().as_deref(), Some("4"));
    }

    #[test]
    fn config_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("nested").join("config.toml"));
        let cfg = file.load_config().unwrap();
        assert_eq!(cfg, Config::default());
        assert!(file.path().exists());
    }

    #[test]
    fn invalid_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[work_schedule]\nstart = \"18:00\"\nend = \"09:00\"\n").unwrap();
        let file = ConfigFile::new(&path);
        assert!(file.load_config().is_err());
        assert_eq!(load_config_or_default(&file), Config::default());
    }

    #[test]
    fn saved_config_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("config.toml"));
        let mut cfg = Config::default();
        cfg.set("timer.work_duration_min", "25").unwrap();
        file.save_config(&cfg).unwrap();
        assert_eq!(file.load_config().unwrap().timer.work_duration_min, 25);
    }
}
