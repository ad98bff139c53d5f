//! Session controller.
//!
//! Ties the schedule engine, the countdown, the exercise rotation and the
//! activity log together, and applies user actions to them. It is driven
//! from a single loop:
//!
//! ```text
//! every 1s   tick(now)              countdown + focus logging
//!            process_completions()  countdowns the tick just finished
//! every 10s  check_off_duty(now)
//! every 30s  check_meal(now)        after check_off_duty when both are due
//! ```
//!
//! All methods take the local wall-clock reading as `now`, which keeps the
//! controller deterministic under test.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::exercises::{Exercise, ExerciseCatalog};
use crate::notify::Notifier;
use crate::schedule::{ScheduleEngine, ScheduleState, TimeOfDay, Transition};
use crate::state::{Mode, RunState};
use crate::stats::{ActivityLog, ActivityStats, StreakStats};
use crate::storage::{load_log_or_default, CatalogStore, Config, LogStore};
use crate::timer::{CompletionReceiver, CountdownTimer};

/// Active Work seconds that make up one logged focus minute.
const FOCUS_LOG_SECS: u32 = 60;

pub struct DeskSession<S, N> {
    config: Config,
    engine: ScheduleEngine,
    stats: ActivityStats,
    run: RunState,
    previous_off_duty: bool,
    timer: CountdownTimer,
    completions: CompletionReceiver,
    log: ActivityLog,
    catalog: ExerciseCatalog,
    last_exercise_id: Option<String>,
    current_exercise: Option<Exercise>,
    awaiting_selection: bool,
    /// Active Work seconds not yet logged as focus time.
    unlogged_work_secs: u32,
    store: S,
    notifier: N,
}

impl<S, N> DeskSession<S, N>
where
    S: LogStore + CatalogStore,
    N: Notifier,
{
    /// Build a session from persisted state. Unreadable state is replaced
    /// with defaults.
    pub fn new(config: Config, store: S, notifier: N) -> Self {
        let log = load_log_or_default(&store);
        let catalog = store.load_catalog().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "exercise catalogue unreadable, using built-ins");
            ExerciseCatalog::default()
        });
        let last_exercise_id = store.load_last_exercise().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "rotation pointer unreadable");
            None
        });

        let run = RunState::new(config.work_duration_secs());
        let (timer, completions) = CountdownTimer::new(run.current_duration_secs);
        Self {
            engine: ScheduleEngine::new(config.schedule_settings()),
            stats: ActivityStats::with_zone(chrono::Local, config.stats.day_gap),
            config,
            run,
            previous_off_duty: false,
            timer,
            completions,
            log,
            catalog,
            last_exercise_id,
            current_exercise: None,
            awaiting_selection: false,
            unlogged_work_secs: 0,
            store,
            notifier,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        RunState {
            time_left_secs: self.timer.time_left_secs(),
            ..self.run.clone()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.current_exercise.as_ref()
    }

    /// Whether a Work session ended with nothing enabled to rotate to.
    pub fn awaiting_selection(&self) -> bool {
        self.awaiting_selection
    }

    /// Next exercise the rotation will offer.
    pub fn upcoming_exercise(&self) -> Option<Exercise> {
        self.catalog.upcoming(self.last_exercise_id.as_deref())
    }

    pub fn stats(&self, today: NaiveDate) -> StreakStats {
        self.stats.recompute(&self.log, today)
    }

    pub fn snapshot(&self, now: NaiveDateTime) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            current_exercise: self.current_exercise.clone(),
            upcoming_exercise: self.upcoming_exercise(),
            awaiting_selection: self.awaiting_selection,
            at: now,
        }
    }

    // ── Clock-driven ─────────────────────────────────────────────────

    /// One-second tick.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = Vec::new();
        if !self.timer.tick() {
            return events;
        }
        self.run.time_left_secs = self.timer.time_left_secs();

        if self.run.mode == Mode::Work {
            self.unlogged_work_secs += 1;
            if self.unlogged_work_secs >= FOCUS_LOG_SECS {
                self.unlogged_work_secs -= FOCUS_LOG_SECS;
                let today = self.log.log_focus_time(now.date(), 1);
                self.persist_log();
                events.push(Event::FocusLogged {
                    minutes: 1,
                    today,
                    at: now,
                });
            }
        }
        events
    }

    /// Handle countdowns that reached zero since the last call.
    ///
    /// A completion whose run was replaced by a reset in the meantime is
    /// dropped.
    pub fn process_completions(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(completion) = self.completions.try_recv() {
            if completion.run_id != self.timer.run_id() {
                tracing::debug!(run_id = completion.run_id, "dropping stale completion");
                continue;
            }
            events.extend(self.complete(now));
        }
        events
    }

    /// Off-duty check (10s cadence).
    pub fn check_off_duty(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let state = ScheduleState::from_run(&self.run, self.previous_off_duty);
        let (next, transition) = self.engine.check_off_duty(TimeOfDay::of(&now), state);
        self.apply_schedule(next, transition, now)
    }

    /// Meal check (30s cadence).
    pub fn check_meal(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let state = ScheduleState::from_run(&self.run, self.previous_off_duty);
        let (next, transition) = self.engine.check_meal(TimeOfDay::of(&now), state);
        self.apply_schedule(next, transition, now)
    }

    // ── User actions ─────────────────────────────────────────────────

    /// Start or pause the countdown.
    pub fn toggle_timer(&mut self, now: NaiveDateTime) -> Event {
        self.run.is_active = !self.run.is_active;
        self.sync_timer();
        let time_left_secs = self.timer.time_left_secs();
        if self.run.is_active {
            Event::TimerStarted {
                mode: self.run.mode,
                time_left_secs,
                at: now,
            }
        } else {
            Event::TimerPaused {
                mode: self.run.mode,
                time_left_secs,
                at: now,
            }
        }
    }

    /// Stop and rewind the countdown to the current session length.
    pub fn reset(&mut self, now: NaiveDateTime) -> Event {
        self.run.is_active = false;
        self.load_duration(self.run.current_duration_secs);
        self.sync_timer();
        Event::TimerReset {
            mode: self.run.mode,
            duration_secs: self.run.current_duration_secs,
            at: now,
        }
    }

    /// Enter Meal mode, or leave it for a paused Work session.
    pub fn toggle_meal_mode(&mut self, now: NaiveDateTime) -> Event {
        if self.run.mode != Mode::Meal {
            self.current_exercise = None;
            self.awaiting_selection = false;
            self.switch_mode(Mode::Meal, self.config.meal_duration_secs(), true, now)
        } else {
            self.switch_mode(Mode::Work, self.config.work_duration_secs(), false, now)
        }
    }

    /// Pick the exercise for this break by hand.
    pub fn select_exercise(&mut self, id: &str, now: NaiveDateTime) -> Result<Event> {
        let exercise = self
            .catalog
            .find(id)
            .ok_or_else(|| ValidationError::ExerciseNotFound(id.to_string()))?;
        self.awaiting_selection = false;
        self.current_exercise = Some(exercise.clone());
        let from = self.run.mode;
        self.run.mode = Mode::Exercise;
        self.sync_timer();
        tracing::info!(exercise = %exercise.name, "exercise selected");
        Ok(Event::ModeChanged {
            from,
            to: Mode::Exercise,
            duration_secs: self.run.current_duration_secs,
            active: self.run.is_active,
            at: now,
        })
    }

    /// Finish the current exercise: log it, advance the rotation and go back
    /// to Work.
    pub fn exercise_done(&mut self, now: NaiveDateTime) -> Result<Vec<Event>> {
        let exercise = self
            .current_exercise
            .take()
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "exercise".into(),
                message: "no exercise in progress".into(),
            })?;

        let today = self.log.log_exercise(now.date());
        self.persist_log();
        if let Err(e) = self.store.save_last_exercise(&exercise.id) {
            tracing::warn!(error = %e, "failed to persist rotation pointer");
        }
        self.last_exercise_id = Some(exercise.id.clone());
        tracing::info!(exercise = %exercise.name, "exercise completed");

        let resume = !self.run.is_off_duty;
        let mode_event = self.switch_mode(Mode::Work, self.config.work_duration_secs(), resume, now);
        Ok(vec![
            Event::ExerciseCompleted {
                exercise_id: exercise.id,
                today,
                at: now,
            },
            mode_event,
        ])
    }

    /// Swap in new settings. The countdown is paused, and rewound when the
    /// current mode's length changed.
    pub fn apply_config(&mut self, config: Config) -> Result<()> {
        config.validate()?;
        let duration = match self.run.mode {
            Mode::Work => Some(config.work_duration_secs()),
            Mode::Meal => Some(config.meal_duration_secs()),
            Mode::Exercise => None,
        };

        self.engine.set_settings(config.schedule_settings());
        self.stats = ActivityStats::with_zone(chrono::Local, config.stats.day_gap);
        self.config = config;
        self.run.is_active = false;
        if let Some(duration) = duration {
            if duration != self.run.current_duration_secs {
                self.run.current_duration_secs = duration;
                self.load_duration(duration);
            }
        }
        self.sync_timer();
        Ok(())
    }

    /// Replace the catalogue, e.g. after it was edited elsewhere.
    pub fn set_catalog(&mut self, catalog: ExerciseCatalog) {
        self.catalog = catalog;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mode = self.run.mode;
        self.run.is_active = false;
        self.sync_timer();
        tracing::info!(%mode, "countdown completed");

        let mut events = vec![Event::TimerCompleted { mode, at: now }];
        if self.config.notifications.pop_to_front {
            self.notifier.focus_window();
        }

        match mode {
            Mode::Work => {
                let upcoming = self.upcoming_exercise();
                let body = match &upcoming {
                    Some(ex) => format!("Time for: {}", ex.name),
                    None => "Select an exercise to get moving.".to_string(),
                };
                self.notify("Time to Move!", &body);
                match &upcoming {
                    Some(ex) => {
                        self.current_exercise = Some(ex.clone());
                        self.run.mode = Mode::Exercise;
                    }
                    None => self.awaiting_selection = true,
                }
                events.push(Event::ExerciseDue {
                    exercise: upcoming,
                    at: now,
                });
            }
            Mode::Meal => {
                self.notify("Break Over", "Back to work! Focus timer starting.");
                events.push(self.switch_mode(
                    Mode::Work,
                    self.config.work_duration_secs(),
                    true,
                    now,
                ));
            }
            Mode::Exercise => {}
        }
        events
    }

    fn apply_schedule(
        &mut self,
        next: ScheduleState,
        transition: Option<Transition>,
        now: NaiveDateTime,
    ) -> Vec<Event> {
        next.apply_to(&mut self.run);
        self.previous_off_duty = next.previous_off_duty;

        let mut events = Vec::new();
        match transition {
            Some(Transition::WentOffDuty) => {
                tracing::info!("off duty");
                events.push(Event::WentOffDuty { at: now });
            }
            Some(Transition::WorkAutoStarted) => {
                tracing::info!("work window opened, starting work session");
                self.current_exercise = None;
                self.awaiting_selection = false;
                self.load_duration(next.current_duration_secs);
                self.notify("Work Started", "Focus timer started automatically.");
                events.push(Event::WorkAutoStarted {
                    duration_secs: next.current_duration_secs,
                    at: now,
                });
            }
            Some(Transition::MealStarted) => {
                tracing::info!("meal window opened");
                self.current_exercise = None;
                self.awaiting_selection = false;
                self.load_duration(next.current_duration_secs);
                self.notify("Meal Time!", "Time for your meal break.");
                events.push(Event::MealStarted {
                    duration_secs: next.current_duration_secs,
                    at: now,
                });
            }
            None => {}
        }
        self.sync_timer();
        events
    }

    fn switch_mode(&mut self, to: Mode, duration_secs: u32, active: bool, now: NaiveDateTime) -> Event {
        let from = self.run.mode;
        self.run.mode = to;
        self.run.current_duration_secs = duration_secs;
        self.run.is_active = active;
        self.load_duration(duration_secs);
        self.sync_timer();
        tracing::info!(%from, %to, active, "mode changed");
        Event::ModeChanged {
            from,
            to,
            duration_secs,
            active,
            at: now,
        }
    }

    fn load_duration(&mut self, duration_secs: u32) {
        self.timer.reset(duration_secs);
        self.run.time_left_secs = duration_secs;
    }

    /// Push the run state's active flag into the countdown. Partial focus
    /// minutes are dropped whenever Work stops ticking.
    fn sync_timer(&mut self) {
        self.timer.set_active(self.run.is_active);
        if !self.run.is_active || self.run.mode != Mode::Work {
            self.unlogged_work_secs = 0;
        }
        self.run.time_left_secs = self.timer.time_left_secs();
    }

    /// Every notification, "Work Started" included, is subject to
    /// `notifications.enabled`.
    fn notify(&self, title: &str, body: &str) {
        if self.config.notifications.enabled {
            self.notifier.notify(title, body);
        }
    }

    fn persist_log(&self) {
        if let Err(e) = self.store.save_log(&self.log) {
            tracing::warn!(error = %e, "failed to persist activity log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::storage::MemoryStore;

    fn at(hm: &str) -> NaiveDateTime {
        format!("2024-05-06T{hm}:00").parse().unwrap()
    }

    fn short_config() -> Config {
        let mut cfg = Config::default();
        cfg.timer.work_duration_min = 1;
        cfg.timer.meal_duration_min = 2;
        cfg
    }

    fn session(notifier: &RecordingNotifier) -> DeskSession<MemoryStore, &RecordingNotifier> {
        DeskSession::new(short_config(), MemoryStore::new(), notifier)
    }

    fn run_seconds<S: LogStore + CatalogStore, N: Notifier>(
        s: &mut DeskSession<S, N>,
        secs: u32,
        now: NaiveDateTime,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..secs {
            events.extend(s.process_completions(now));
            events.extend(s.tick(now));
        }
        events.extend(s.process_completions(now));
        events
    }

    #[test]
    fn starts_paused_in_work() {
        let n = RecordingNotifier::new();
        let s = session(&n);
        let state = s.state();
        assert_eq!(state.mode, Mode::Work);
        assert!(!state.is_active);
        assert_eq!(state.time_left_secs, 60);
        assert_eq!(s.upcoming_exercise().unwrap().id, "1");
    }

    #[test]
    fn finished_work_session_moves_to_next_exercise() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        s.toggle_timer(at("10:00"));

        let events = run_seconds(&mut s, 60, at("10:01"));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::TimerCompleted { mode: Mode::Work, .. })));
        assert_eq!(s.state().mode, Mode::Exercise);
        assert!(!s.state().is_active);
        assert_eq!(s.current_exercise().unwrap().id, "1");
        assert_eq!(n.titles(), vec!["Time to Move!".to_string()]);
        assert_eq!(n.sent()[0].body, "Time for: Neck Rolls");
        assert_eq!(n.focus_requests(), 1);
        // One full minute of Work was logged.
        assert_eq!(s.log().day(at("10:01").date()).minutes_focused, 1);
    }

    #[test]
    fn completion_is_handled_on_the_following_pass() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        s.toggle_timer(at("10:00"));
        for _ in 0..60 {
            s.tick(at("10:00"));
        }
        // The final tick only queued the completion.
        assert_eq!(s.state().mode, Mode::Work);
        assert!(n.sent().is_empty());
        let events = s.process_completions(at("10:01"));
        assert_eq!(events.len(), 2);
        assert_eq!(s.state().mode, Mode::Exercise);
    }

    #[test]
    fn reset_between_final_tick_and_processing_drops_completion() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        s.toggle_timer(at("10:00"));
        for _ in 0..60 {
            s.tick(at("10:00"));
        }
        s.reset(at("10:01"));
        assert!(s.process_completions(at("10:01")).is_empty());
        assert_eq!(s.state().mode, Mode::Work);
        assert_eq!(s.state().time_left_secs, 60);
    }

    #[test]
    fn exercise_done_logs_and_rotates() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        s.toggle_timer(at("10:00"));
        run_seconds(&mut s, 60, at("10:01"));

        let events = s.exercise_done(at("10:03")).unwrap();
        assert!(matches!(events[0], Event::ExerciseCompleted { ref exercise_id, .. } if exercise_id == "1"));
        assert_eq!(s.state().mode, Mode::Work);
        assert!(s.state().is_active);
        assert_eq!(s.state().time_left_secs, 60);
        assert_eq!(s.upcoming_exercise().unwrap().id, "2");
        assert_eq!(s.stats(at("10:03").date()).current_streak, 1);
        assert_eq!(s.store.load_last_exercise().unwrap().as_deref(), Some("1"));
        assert_eq!(s.store.load_log().unwrap().day(at("10:03").date()).exercises_completed, 1);

        assert!(s.exercise_done(at("10:04")).is_err());
    }

    #[test]
    fn no_enabled_exercise_requests_selection() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        let mut catalog = ExerciseCatalog::new();
        for ex in catalog.all() {
            catalog.toggle_enabled(&ex.id).unwrap();
        }
        s.set_catalog(catalog);
        s.toggle_timer(at("10:00"));
        let events = run_seconds(&mut s, 60, at("10:01"));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ExerciseDue { exercise: None, .. })));
        assert!(s.awaiting_selection());
        assert_eq!(s.state().mode, Mode::Work);
        assert_eq!(n.sent()[0].body, "Select an exercise to get moving.");

        s.select_exercise("5", at("10:02")).unwrap();
        assert_eq!(s.state().mode, Mode::Exercise);
        assert!(!s.awaiting_selection());
        assert!(s.select_exercise("missing", at("10:02")).is_err());
    }

    #[test]
    fn meal_completion_restarts_work() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        s.toggle_meal_mode(at("12:00"));
        assert_eq!(s.state().mode, Mode::Meal);
        assert!(s.state().is_active);
        assert_eq!(s.state().time_left_secs, 120);

        let events = run_seconds(&mut s, 120, at("12:02"));
        assert!(!events.iter().any(|e| matches!(e, Event::FocusLogged { .. })));
        assert_eq!(s.state().mode, Mode::Work);
        assert!(s.state().is_active);
        assert_eq!(s.state().time_left_secs, 60);
        assert_eq!(n.titles(), vec!["Break Over".to_string()]);
    }

    #[test]
    fn cancelling_meal_mode_pauses_work() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        s.toggle_meal_mode(at("12:00"));
        s.toggle_meal_mode(at("12:05"));
        let state = s.state();
        assert_eq!(state.mode, Mode::Work);
        assert!(!state.is_active);
        assert_eq!(state.current_duration_secs, 60);
    }

    #[test]
    fn schedule_polls_drive_off_duty_and_auto_start() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        s.toggle_timer(at("16:59"));
        assert!(s.check_off_duty(at("16:59")).is_empty());

        let events = s.check_off_duty(at("17:00"));
        assert!(matches!(events[..], [Event::WentOffDuty { .. }]));
        assert!(s.state().is_off_duty);
        assert!(!s.state().is_active);

        let events = s.check_off_duty(at("09:00"));
        assert!(matches!(events[..], [Event::WorkAutoStarted { duration_secs: 60, .. }]));
        assert!(s.state().is_active);
        assert_eq!(n.titles(), vec!["Work Started".to_string()]);
        assert!(s.check_off_duty(at("09:00")).is_empty());
    }

    #[test]
    fn meal_poll_enters_meal_with_full_duration() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        s.toggle_timer(at("11:59"));
        s.tick(at("11:59"));
        s.check_off_duty(at("12:30"));
        let events = s.check_meal(at("12:30"));
        assert!(matches!(events[..], [Event::MealStarted { duration_secs: 120, .. }]));
        let state = s.state();
        assert_eq!(state.mode, Mode::Meal);
        assert_eq!(state.time_left_secs, 120);
        assert!(state.is_active);
        assert!(s.check_meal(at("12:31")).is_empty());
    }

    #[test]
    fn meal_window_before_work_hours_stays_off_duty() {
        let n = RecordingNotifier::new();
        let mut cfg = short_config();
        cfg.set("work_schedule.start", "13:00").unwrap();
        let mut s = DeskSession::new(cfg, MemoryStore::new(), &n);

        s.check_off_duty(at("12:30"));
        assert!(s.check_meal(at("12:30")).is_empty());
        let state = s.state();
        assert_eq!(state.mode, Mode::Work);
        assert!(state.is_off_duty);
        assert!(!state.is_active);
        assert!(n.sent().is_empty());
    }

    #[test]
    fn notifications_can_be_silenced() {
        let n = RecordingNotifier::new();
        let mut cfg = short_config();
        cfg.notifications.enabled = false;
        cfg.notifications.pop_to_front = false;
        let mut s = DeskSession::new(cfg, MemoryStore::new(), &n);
        s.check_off_duty(at("08:00"));
        s.check_off_duty(at("09:00"));
        assert!(s.state().is_active);
        assert!(n.sent().is_empty());
        run_seconds(&mut s, 60, at("09:01"));
        assert_eq!(n.focus_requests(), 0);
    }

    #[test]
    fn pausing_drops_partial_focus_minutes() {
        let n = RecordingNotifier::new();
        let mut cfg = short_config();
        cfg.timer.work_duration_min = 5;
        let mut s = DeskSession::new(cfg, MemoryStore::new(), &n);
        s.toggle_timer(at("10:00"));
        run_seconds(&mut s, 59, at("10:00"));
        s.toggle_timer(at("10:01"));
        s.toggle_timer(at("10:01"));
        run_seconds(&mut s, 59, at("10:01"));
        assert_eq!(s.log().day(at("10:00").date()).minutes_focused, 0);
        let events = run_seconds(&mut s, 1, at("10:02"));
        assert!(events.iter().any(|e| matches!(e, Event::FocusLogged { minutes: 1, .. })));
    }

    #[test]
    fn apply_config_pauses_and_resizes() {
        let n = RecordingNotifier::new();
        let mut s = session(&n);
        s.toggle_timer(at("10:00"));
        s.tick(at("10:00"));

        let mut cfg = short_config();
        cfg.timer.work_duration_min = 3;
        s.apply_config(cfg).unwrap();
        let state = s.state();
        assert!(!state.is_active);
        assert_eq!(state.current_duration_secs, 180);
        assert_eq!(state.time_left_secs, 180);

        let mut bad = short_config();
        bad.timer.meal_duration_min = 0;
        assert!(s.apply_config(bad).is_err());
        assert_eq!(s.config().timer.work_duration_min, 3);
    }

    #[test]
    fn snapshot_reports_state_and_rotation() {
        let n = RecordingNotifier::new();
        let s = session(&n);
        match s.snapshot(at("10:00")) {
            Event::StateSnapshot {
                state,
                upcoming_exercise,
                current_exercise,
                awaiting_selection,
                ..
            } => {
                assert_eq!(state.mode, Mode::Work);
                assert_eq!(upcoming_exercise.unwrap().id, "1");
                assert!(current_exercise.is_none());
                assert!(!awaiting_selection);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
