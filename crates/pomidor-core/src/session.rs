use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::TimerMode;

/// One completed interval. Immutable once created; the log is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub kind: TimerMode,
    /// Interval length in minutes; fractional for sub-minute durations.
    pub duration_min: f64,
    pub completed_at: DateTime<Utc>,
}

impl Session {
    /// Create a record for an interval that just completed.
    pub fn new(kind: TimerMode, duration_min: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            duration_min,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_get_distinct_ids() {
        let a = Session::new(TimerMode::Work, 25.0);
        let b = Session::new(TimerMode::Work, 25.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn session_roundtrips_through_json() {
        let session = Session::new(TimerMode::ShortBreak, 5.0);
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, session.id);
        assert_eq!(restored.kind, TimerMode::ShortBreak);
        assert_eq!(restored.duration_min, 5.0);
        assert_eq!(restored.completed_at, session.completed_at);
    }
}
