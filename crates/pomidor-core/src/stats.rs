//! Aggregates over the session log.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::timer::TimerMode;

/// Session statistics: today (since UTC midnight), the trailing week, and
/// all time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total_sessions: u64,
    pub completed_pomodoros: u64,
    pub total_focus_min: f64,
    pub today_pomodoros: u64,
    pub today_focus_min: f64,
    pub week_pomodoros: u64,
}

impl Stats {
    /// Compute aggregates over `sessions`. `now` is passed in so callers
    /// (and tests) control the reference point.
    pub fn compute(sessions: &[Session], completed_pomodoros: u64, now: DateTime<Utc>) -> Self {
        let today_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let week_start = now - Duration::days(7);

        let mut stats = Stats {
            total_sessions: sessions.len() as u64,
            completed_pomodoros,
            ..Stats::default()
        };

        for session in sessions {
            if session.kind != TimerMode::Work {
                continue;
            }
            stats.total_focus_min += session.duration_min;
            if session.completed_at >= today_start {
                stats.today_pomodoros += 1;
                stats.today_focus_min += session.duration_min;
            }
            if session.completed_at >= week_start {
                stats.week_pomodoros += 1;
            }
        }
        stats
    }
}
