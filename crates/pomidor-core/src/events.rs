use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::timer::TimerMode;

/// Every state change in the system produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// An interval counted down to zero.
    TimerCompleted {
        mode: TimerMode,
        duration_min: f64,
        at: DateTime<Utc>,
    },
    /// A completed interval was appended to the session log.
    SessionRecorded { session: Session },
    /// The engine moved into the next interval after a completion.
    ModeChanged {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    /// User skipped ahead; no session was recorded.
    TimerSkipped {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    /// User jumped directly to a mode.
    ModeSelected { mode: TimerMode, at: DateTime<Utc> },
    TimerReset { mode: TimerMode, at: DateTime<Utc> },
    /// The next interval will start on its own after a one-tick delay.
    AutoStartScheduled { mode: TimerMode, at: DateTime<Utc> },
    StateSnapshot {
        mode: TimerMode,
        remaining: String,
        time_left_secs: u64,
        total_secs: u64,
        is_running: bool,
        progress: f64,
        completed_pomodoros: u64,
        at: DateTime<Utc>,
    },
}
