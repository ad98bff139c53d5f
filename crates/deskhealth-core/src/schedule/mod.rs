//! Work/meal windows and the engine that turns wall-clock time into mode
//! transitions.

mod engine;
mod time_of_day;

pub use engine::{evaluate, Evaluation, ScheduleEngine, ScheduleSettings, ScheduleState, Transition};
pub use time_of_day::{TimeOfDay, TimeWindow};
