//! Countdown runner.
//!
//! Single-threaded cooperative loop: one `tokio::time::interval` drives
//! `PomodoroApp::tick` once per second, and the deferred auto-start is a
//! one-shot sleep armed in the same `select!`. At most one tick is ever in
//! flight, and a disarmed sleep is never polled, so a stale callback can
//! never touch state after a mode switch.

use tokio::time::{interval, sleep, Duration, Instant, MissedTickBehavior};

use crate::app::PomodoroApp;
use crate::events::Event;
use crate::notify::Notifier;
use crate::storage::StateStore;

/// One logical tick.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drive the countdown until the engine goes idle with no auto-start
/// pending. Emits every transition event plus a per-second state snapshot
/// while running.
pub async fn run<S, N>(app: &mut PomodoroApp<S, N>, mut on_event: impl FnMut(&Event))
where
    S: StateStore,
    N: Notifier,
{
    let mut ticker = interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // An interval's first tick completes immediately; consume it so the
    // countdown starts a full second out.
    ticker.tick().await;

    let deferred = sleep(TICK_INTERVAL);
    tokio::pin!(deferred);
    let mut armed = false;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for event in app.tick() {
                    on_event(&event);
                }
                if app.engine().is_running() {
                    on_event(&app.snapshot());
                }
                if app.pending_auto_start().is_some() && !armed {
                    deferred.as_mut().reset(Instant::now() + TICK_INTERVAL);
                    armed = true;
                }
            }
            _ = &mut deferred, if armed => {
                armed = false;
                if let Some(event) = app.apply_auto_start() {
                    on_event(&event);
                }
            }
        }

        if app.pending_auto_start().is_none() {
            armed = false;
        }
        if !app.engine().is_running() && !armed {
            break;
        }
    }
}
