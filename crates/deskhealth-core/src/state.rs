use serde::{Deserialize, Serialize};

/// Kind of session the countdown is currently measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Work,
    Meal,
    Exercise,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Work => "WORK",
            Mode::Meal => "MEAL",
            Mode::Exercise => "EXERCISE",
        };
        f.write_str(s)
    }
}

/// The live session state.
///
/// Only the schedule engine and explicit user actions change it. The
/// countdown owns the authoritative `time_left_secs`; the copy here is
/// refreshed whenever a snapshot is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub mode: Mode,
    pub is_off_duty: bool,
    pub is_active: bool,
    pub current_duration_secs: u32,
    pub time_left_secs: u32,
}

impl RunState {
    /// Process-start state: a paused, full-length Work session.
    pub fn new(work_duration_secs: u32) -> Self {
        Self {
            mode: Mode::Work,
            is_off_duty: false,
            is_active: false,
            current_duration_secs: work_duration_secs,
            time_left_secs: work_duration_secs,
        }
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        if self.current_duration_secs == 0 {
            return 0.0;
        }
        1.0 - (self.time_left_secs as f64 / self.current_duration_secs as f64)
    }
}
