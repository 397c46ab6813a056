use serde::{Deserialize, Serialize};

/// The three interval kinds a Pomodoro cycle alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Work",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, TimerMode::ShortBreak | TimerMode::LongBreak)
    }
}

/// Compute the mode that follows `current`.
///
/// `completed_pomodoros` must be the counter value from *before* the
/// just-finished work session is recorded; a long break is only offered
/// once a full cycle of `long_break_interval` work sessions has completed.
pub fn next_mode(current: TimerMode, completed_pomodoros: u64, long_break_interval: u32) -> TimerMode {
    match current {
        TimerMode::Work => {
            let interval = u64::from(long_break_interval);
            if completed_pomodoros > 0 && (completed_pomodoros + 1) % interval == 0 {
                TimerMode::LongBreak
            } else {
                TimerMode::ShortBreak
            }
        }
        TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_work_session_leads_to_short_break() {
        assert_eq!(next_mode(TimerMode::Work, 0, 4), TimerMode::ShortBreak);
    }

    #[test]
    fn fourth_work_session_leads_to_long_break() {
        // Counter is pre-increment: three already done, the fourth just finished.
        assert_eq!(next_mode(TimerMode::Work, 3, 4), TimerMode::LongBreak);
    }

    #[test]
    fn mid_cycle_work_sessions_lead_to_short_breaks() {
        assert_eq!(next_mode(TimerMode::Work, 1, 4), TimerMode::ShortBreak);
        assert_eq!(next_mode(TimerMode::Work, 2, 4), TimerMode::ShortBreak);
        assert_eq!(next_mode(TimerMode::Work, 4, 4), TimerMode::ShortBreak);
    }

    #[test]
    fn breaks_always_lead_to_work() {
        for n in [0, 1, 3, 7, 100] {
            assert_eq!(next_mode(TimerMode::ShortBreak, n, 4), TimerMode::Work);
            assert_eq!(next_mode(TimerMode::LongBreak, n, 4), TimerMode::Work);
        }
    }

    #[test]
    fn interval_of_two_alternates_after_the_first_cycle() {
        assert_eq!(next_mode(TimerMode::Work, 0, 2), TimerMode::ShortBreak);
        assert_eq!(next_mode(TimerMode::Work, 1, 2), TimerMode::LongBreak);
        assert_eq!(next_mode(TimerMode::Work, 3, 2), TimerMode::LongBreak);
    }

    #[test]
    fn mode_serializes_as_camel_case() {
        assert_eq!(serde_json::to_string(&TimerMode::Work).unwrap(), "\"work\"");
        assert_eq!(
            serde_json::to_string(&TimerMode::ShortBreak).unwrap(),
            "\"shortBreak\""
        );
        assert_eq!(
            serde_json::to_string(&TimerMode::LongBreak).unwrap(),
            "\"longBreak\""
        );
    }
}
