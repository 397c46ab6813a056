//! Completion cue side effect.
//!
//! Playback failure is swallowed and logged; it never blocks or alters a
//! timer transition.

use notify_rust::Notification;

use crate::timer::TimerMode;

/// Fired when an interval completes (and sound is enabled).
pub trait Notifier {
    fn interval_complete(&self, mode: TimerMode);
}

/// Desktop notification with an audio hint.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn interval_complete(&self, mode: TimerMode) {
        let body = match mode {
            TimerMode::Work => "Work interval complete. Time for a break.",
            TimerMode::ShortBreak | TimerMode::LongBreak => "Break over. Back to work.",
        };
        let result = Notification::new()
            .summary("pomidor")
            .body(body)
            .appname("pomidor")
            .icon("alarm-clock")
            .sound_name("alarm-clock-elapsed")
            .show();
        if let Err(e) = result {
            tracing::warn!("notification failed: {e}");
        }
    }
}

/// No-op notifier for tests and quiet runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn interval_complete(&self, _mode: TimerMode) {}
}
