use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::exercises::Exercise;
use crate::state::{Mode, RunState};
use crate::stats::DailyLog;

/// Every state change in the session produces an Event.
///
/// Timestamps are local wall-clock readings, the same clock the schedule
/// windows are expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        time_left_secs: u32,
        at: NaiveDateTime,
    },
    TimerPaused {
        mode: Mode,
        time_left_secs: u32,
        at: NaiveDateTime,
    },
    TimerReset {
        mode: Mode,
        duration_secs: u32,
        at: NaiveDateTime,
    },
    TimerCompleted {
        mode: Mode,
        at: NaiveDateTime,
    },
    ModeChanged {
        from: Mode,
        to: Mode,
        duration_secs: u32,
        active: bool,
        at: NaiveDateTime,
    },
    /// The work window closed; the countdown is suspended.
    WentOffDuty {
        at: NaiveDateTime,
    },
    /// The work window opened and a Work session started on its own.
    WorkAutoStarted {
        duration_secs: u32,
        at: NaiveDateTime,
    },
    /// The meal window opened while on duty.
    MealStarted {
        duration_secs: u32,
        at: NaiveDateTime,
    },
    /// A Work session finished. `exercise` is the rotation's pick, or `None`
    /// when every exercise is disabled and one has to be chosen by hand.
    ExerciseDue {
        exercise: Option<Exercise>,
        at: NaiveDateTime,
    },
    ExerciseCompleted {
        exercise_id: String,
        today: DailyLog,
        at: NaiveDateTime,
    },
    FocusLogged {
        minutes: u32,
        today: DailyLog,
        at: NaiveDateTime,
    },
    StateSnapshot {
        state: RunState,
        current_exercise: Option<Exercise>,
        upcoming_exercise: Option<Exercise>,
        awaiting_selection: bool,
        at: NaiveDateTime,
    },
}
