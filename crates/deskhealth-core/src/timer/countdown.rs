//! Countdown timer.
//!
//! Counts a remaining-seconds value down by one per `tick()` while active.
//! There is no internal thread: the caller drives `tick()` once per second.
//!
//! Completion is not a callback. The tick that reaches zero pushes a
//! [`Completion`] onto a channel and returns; whoever owns the receiver
//! handles it on its next pass, after the tick's state change is finished.
//!
//! ## Usage
//!
//! ```ignore
//! let (mut timer, mut completions) = CountdownTimer::new(5);
//! timer.start();
//! for _ in 0..5 {
//!     timer.tick();
//! }
//! assert!(completions.try_recv().is_ok());
//! ```

use tokio::sync::mpsc;

/// Sent once when a run reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Run that finished; compare with [`CountdownTimer::run_id`] to detect a
    /// completion that was overtaken by a reset.
    pub run_id: u64,
}

pub type CompletionReceiver = mpsc::UnboundedReceiver<Completion>;

#[derive(Debug)]
pub struct CountdownTimer {
    duration_secs: u32,
    time_left_secs: u32,
    active: bool,
    /// Set once the current run has emitted its completion.
    completed: bool,
    run_id: u64,
    completions: mpsc::UnboundedSender<Completion>,
}

impl CountdownTimer {
    /// Create a paused timer holding `duration_secs`, together with the
    /// receiving end of its completion channel.
    pub fn new(duration_secs: u32) -> (Self, CompletionReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = Self {
            duration_secs,
            time_left_secs: duration_secs,
            active: false,
            completed: false,
            run_id: 0,
            completions: tx,
        };
        (timer, rx)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.set_active(true);
    }

    /// Stop ticking; the remaining time is preserved.
    pub fn pause(&mut self) {
        self.set_active(false);
    }

    /// Going from inactive to active re-arms the completion latch.
    pub fn set_active(&mut self, active: bool) {
        if active && !self.active {
            self.completed = false;
        }
        self.active = active;
    }

    /// Load a new duration. Leaves the active flag alone.
    pub fn reset(&mut self, duration_secs: u32) {
        self.duration_secs = duration_secs;
        self.time_left_secs = duration_secs;
        self.completed = false;
        self.run_id += 1;
    }

    /// Advance one second. Returns whether the counter moved.
    pub fn tick(&mut self) -> bool {
        if !self.active || self.time_left_secs == 0 {
            return false;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        tracing::trace!(time_left = self.time_left_secs, "countdown tick");

        if self.time_left_secs == 0 && !self.completed {
            self.completed = true;
            let completion = Completion { run_id: self.run_id };
            if self.completions.send(completion).is_err() {
                tracing::debug!("completion receiver dropped");
            }
        }
        true
    }
}
