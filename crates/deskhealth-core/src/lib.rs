//! # Desk Health Core Library
//!
//! This library provides the core logic of Desk Health, a work-session
//! wellness timer that alternates focused Work sessions with short exercise
//! breaks, schedules a daily meal break and suspends itself outside working
//! hours. The `deskhealth` CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Schedule**: pure decisions from a local time of day and the current
//!   mode to off-duty, auto-start and meal transitions
//! - **Timer**: a countdown driven by the caller's one-second `tick()`, with
//!   completion delivered through a channel
//! - **Stats**: a date-keyed activity log and streaks derived from it
//! - **Exercises**: the built-in and custom catalogue plus the rotation
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`ScheduleEngine`]: work window and meal window evaluation
//! - [`CountdownTimer`]: session countdown
//! - [`ActivityStats`]: streak derivation
//! - [`DeskSession`]: applies ticks, schedule polls and user actions

pub mod error;
pub mod events;
pub mod exercises;
pub mod notify;
pub mod schedule;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::Event;
pub use exercises::{Category, Exercise, ExerciseCatalog, ExerciseUpdate, NewExercise};
pub use notify::{Notifier, NullNotifier};
pub use schedule::{ScheduleEngine, ScheduleSettings, ScheduleState, TimeOfDay, TimeWindow, Transition};
pub use session::DeskSession;
pub use state::{Mode, RunState};
pub use stats::{ActivityLog, ActivityStats, DailyLog, DayGap, StreakStats};
pub use storage::{CatalogStore, Config, ConfigFile, ConfigStore, Database, KeyValueStore, LogStore, MemoryStore};
pub use timer::{Completion, CountdownTimer};
