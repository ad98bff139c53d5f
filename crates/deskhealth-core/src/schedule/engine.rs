//! Schedule engine.
//!
//! Decides, from the local wall clock and the configured windows, whether the
//! user is on duty, whether a meal break should begin, and whether a Work
//! session should auto-resume. Every check is a pure function of
//! `(now, settings, state)` returning the next state; nothing here touches
//! timers or storage.
//!
//! ## Transitions
//!
//! ```text
//! off-duty check (every 10s)   on-duty -> off-duty      : pause
//!                              off-duty -> on-duty edge : WORK, work duration, active
//! meal check (every 30s)       inside meal window, not MEAL, on duty
//!                                                       : MEAL, meal duration, active
//! ```
//!
//! The on-duty auto-start is edge-triggered through `previous_off_duty`,
//! which the caller threads from one evaluation to the next. The meal check
//! is level-triggered and only guarded by `mode != MEAL`, so a session forced
//! back to WORK while the meal window is still open re-enters MEAL on the
//! next meal check.

use serde::{Deserialize, Serialize};

use super::time_of_day::{TimeOfDay, TimeWindow};
use crate::state::{Mode, RunState};

/// Inputs the engine reads from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    pub work_window: TimeWindow,
    pub meal_window: TimeWindow,
    pub meal_enabled: bool,
    pub work_duration_secs: u32,
    pub meal_duration_secs: u32,
}

/// The slice of session state the engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleState {
    pub mode: Mode,
    pub is_off_duty: bool,
    pub is_active: bool,
    pub current_duration_secs: u32,
    /// Off-duty flag computed by the previous off-duty check.
    pub previous_off_duty: bool,
}

impl ScheduleState {
    pub fn from_run(run: &RunState, previous_off_duty: bool) -> Self {
        Self {
            mode: run.mode,
            is_off_duty: run.is_off_duty,
            is_active: run.is_active,
            current_duration_secs: run.current_duration_secs,
            previous_off_duty,
        }
    }

    /// Copy the engine-owned fields back onto a run state.
    pub fn apply_to(&self, run: &mut RunState) {
        run.mode = self.mode;
        run.is_off_duty = self.is_off_duty;
        run.is_active = self.is_active;
        run.current_duration_secs = self.current_duration_secs;
    }
}

/// A mode change caused by the schedule rather than by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// The clock left the work window.
    WentOffDuty,
    /// The clock entered the work window; a fresh Work session started.
    WorkAutoStarted,
    /// The meal window opened while on duty.
    MealStarted,
}

/// Result of a combined evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub state: ScheduleState,
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    settings: ScheduleSettings,
}

impl ScheduleEngine {
    pub fn new(settings: ScheduleSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ScheduleSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ScheduleSettings) {
        self.settings = settings;
    }

    /// True when `now` falls outside `[work start, work end)`.
    pub fn is_off_duty_at(&self, now: TimeOfDay) -> bool {
        !self.settings.work_window.contains(now.minutes())
    }

    /// True when `now` falls inside `[meal start, meal end)`.
    pub fn is_meal_time_at(&self, now: TimeOfDay) -> bool {
        self.settings.meal_window.contains(now.minutes())
    }

    /// Off-duty check.
    pub fn check_off_duty(
        &self,
        now: TimeOfDay,
        state: ScheduleState,
    ) -> (ScheduleState, Option<Transition>) {
        let off_duty = self.is_off_duty_at(now);
        let mut next = state;
        let mut transition = None;

        if off_duty {
            next.is_off_duty = true;
            next.is_active = false;
            if !state.previous_off_duty {
                transition = Some(Transition::WentOffDuty);
            }
        } else {
            next.is_off_duty = false;
            if state.previous_off_duty {
                next.mode = Mode::Work;
                next.current_duration_secs = self.settings.work_duration_secs;
                next.is_active = true;
                transition = Some(Transition::WorkAutoStarted);
            }
        }

        next.previous_off_duty = off_duty;
        (next, transition)
    }

    /// Meal check. A no-op when the meal schedule is disabled.
    pub fn check_meal(
        &self,
        now: TimeOfDay,
        state: ScheduleState,
    ) -> (ScheduleState, Option<Transition>) {
        if !self.settings.meal_enabled {
            return (state, None);
        }
        if self.is_meal_time_at(now) && state.mode != Mode::Meal && !state.is_off_duty {
            let next = ScheduleState {
                mode: Mode::Meal,
                current_duration_secs: self.settings.meal_duration_secs,
                is_active: true,
                ..state
            };
            return (next, Some(Transition::MealStarted));
        }
        (state, None)
    }

    /// Both checks for one instant, off-duty first so the meal check sees the
    /// fresh off-duty flag.
    pub fn evaluate(&self, now: TimeOfDay, state: ScheduleState) -> Evaluation {
        let mut transitions = Vec::new();
        let (state, t) = self.check_off_duty(now, state);
        transitions.extend(t);
        let (state, t) = self.check_meal(now, state);
        transitions.extend(t);
        Evaluation { state, transitions }
    }
}

/// Free-function form of [`ScheduleEngine::evaluate`].
pub fn evaluate(now: TimeOfDay, settings: &ScheduleSettings, state: ScheduleState) -> Evaluation {
    ScheduleEngine::new(settings.clone()).evaluate(now, state)
}
