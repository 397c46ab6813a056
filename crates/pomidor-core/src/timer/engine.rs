//! Timer state machine.
//!
//! The engine counts in whole seconds and holds no clock of its own -- the
//! caller (normally the countdown runner) invokes `tick()` once per elapsed
//! second while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle-at-duration -> Running -> (Paused | Expired)
//! ```
//!
//! `reset()` re-enters Idle-at-duration for a (possibly different) mode and
//! is the only way out of the expired state.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::sequencer::TimerMode;
use crate::events::Event;

/// Reported by [`TimerEngine::tick`] exactly once when an interval reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// The mode that just finished.
    pub mode: TimerMode,
    /// Full duration of the finished interval, in seconds.
    pub total_secs: u64,
}

/// Core timer state machine.
///
/// Invariant: `time_left_secs <= total_secs`; `total_secs` is the
/// settings-derived duration for `mode` at the moment of the last reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    mode: TimerMode,
    time_left_secs: u64,
    total_secs: u64,
    is_running: bool,
}

impl TimerEngine {
    /// Create an engine idle at the full duration for `mode`.
    pub fn new(mode: TimerMode, duration_secs: u64) -> Self {
        Self {
            mode,
            time_left_secs: duration_secs,
            total_secs: duration_secs,
            is_running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// 0.0 .. 1.0 fraction of the current interval already elapsed.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        let elapsed = self.total_secs.saturating_sub(self.time_left_secs);
        (elapsed as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }

    /// Remaining time rendered as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format_mmss(self.time_left_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Re-enter the idle state for `mode` at its full duration.
    ///
    /// Entry point for every mode change; always leaves the timer stopped.
    pub fn reset(&mut self, mode: TimerMode, duration_secs: u64) {
        self.mode = mode;
        self.time_left_secs = duration_secs;
        self.total_secs = duration_secs;
        self.is_running = false;
    }

    /// Begin counting down. No-op when already running or already at zero.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running || self.time_left_secs == 0 {
            return None;
        }
        self.is_running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting down, keeping the remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `Some(Completion)` exactly once per interval, on the tick
    /// that reaches zero; the running flag is cleared at that point so a
    /// late or duplicate tick can never report the same interval twice.
    pub fn tick(&mut self) -> Option<Completion> {
        if !self.is_running || self.time_left_secs == 0 {
            return None;
        }
        self.time_left_secs -= 1;
        if self.time_left_secs == 0 {
            self.is_running = false;
            return Some(Completion {
                mode: self.mode,
                total_secs: self.total_secs,
            });
        }
        None
    }
}

/// Render seconds as `MM:SS`: minutes zero-padded to two digits and
/// unbounded above, seconds always two digits.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
