//! App coordinator: owns the engine, settings, session log, and counter,
//! and wires them to the store and notifier.
//!
//! Persistence is save-on-change and best-effort: a failed write is logged
//! and never fails a timer transition. All state is loaded once at
//! construction, with silent fallback to defaults for absent or malformed
//! entries.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SettingsError;
use crate::events::Event;
use crate::notify::Notifier;
use crate::session::Session;
use crate::settings::{Settings, SettingsPatch};
use crate::stats::Stats;
use crate::storage::{keys, StateStore};
use crate::timer::{next_mode, TimerEngine, TimerMode};

/// The timer application.
pub struct PomodoroApp<S: StateStore, N: Notifier> {
    settings: Settings,
    engine: TimerEngine,
    sessions: Vec<Session>,
    completed_pomodoros: u64,
    /// Mode waiting to auto-start after the one-tick deferral, if any.
    pending_auto_start: Option<TimerMode>,
    store: S,
    notifier: N,
}

impl<S: StateStore, N: Notifier> PomodoroApp<S, N> {
    /// Load all persisted state from `store`, falling back to defaults for
    /// anything absent or malformed.
    pub fn load(store: S, notifier: N) -> Self {
        let settings = load_json::<Settings>(&store, keys::SETTINGS)
            .map(|mut s| {
                s.sanitize();
                s
            })
            .unwrap_or_default();
        let sessions = load_json::<Vec<Session>>(&store, keys::SESSIONS).unwrap_or_default();
        let completed_pomodoros = match store.get(keys::COMPLETED_POMODOROS) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("discarding malformed pomodoro counter");
                0
            }),
            _ => 0,
        };
        let engine = load_json::<TimerEngine>(&store, keys::TIMER_STATE)
            .filter(|e| e.time_left_secs() <= e.total_secs())
            .unwrap_or_else(|| {
                TimerEngine::new(TimerMode::Work, settings.duration_secs(TimerMode::Work))
            });

        Self {
            settings,
            engine,
            sessions,
            completed_pomodoros,
            pending_auto_start: None,
            store,
            notifier,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn completed_pomodoros(&self) -> u64 {
        self.completed_pomodoros
    }

    pub fn pending_auto_start(&self) -> Option<TimerMode> {
        self.pending_auto_start
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(&self.sessions, self.completed_pomodoros, Utc::now())
    }

    /// Full display state as a single event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.engine.mode(),
            remaining: self.engine.format_remaining(),
            time_left_secs: self.engine.time_left_secs(),
            total_secs: self.engine.total_secs(),
            is_running: self.engine.is_running(),
            progress: self.engine.progress(),
            completed_pomodoros: self.completed_pomodoros,
            at: Utc::now(),
        }
    }

    // ── User commands ────────────────────────────────────────────────
    //
    // Every user action cancels a pending auto-start.

    pub fn start(&mut self) -> Option<Event> {
        self.pending_auto_start = None;
        let event = self.engine.start();
        if event.is_some() {
            self.persist_engine();
        }
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pending_auto_start = None;
        let event = self.engine.pause();
        if event.is_some() {
            self.persist_engine();
        }
        event
    }

    /// Restart the current interval at its (possibly updated) full duration.
    pub fn reset(&mut self) -> Event {
        self.pending_auto_start = None;
        let mode = self.engine.mode();
        self.engine.reset(mode, self.settings.duration_secs(mode));
        self.persist_engine();
        Event::TimerReset {
            mode,
            at: Utc::now(),
        }
    }

    /// Move to the next interval without recording a session or firing the
    /// completion cue.
    pub fn skip(&mut self) -> Event {
        self.pending_auto_start = None;
        let from = self.engine.mode();
        let to = next_mode(from, self.completed_pomodoros, self.settings.long_break_interval);
        self.engine.reset(to, self.settings.duration_secs(to));
        self.persist_engine();
        Event::TimerSkipped {
            from,
            to,
            at: Utc::now(),
        }
    }

    /// Jump directly to `mode`, bypassing the sequencer.
    pub fn select_mode(&mut self, mode: TimerMode) -> Event {
        self.pending_auto_start = None;
        self.engine.reset(mode, self.settings.duration_secs(mode));
        self.persist_engine();
        Event::ModeSelected {
            mode,
            at: Utc::now(),
        }
    }

    // ── Countdown ────────────────────────────────────────────────────

    /// Advance the countdown by one second and, on expiry, run the
    /// completion sequence: record the session, fire the cue, move into the
    /// next mode, and schedule the deferred auto-start if configured.
    pub fn tick(&mut self) -> Vec<Event> {
        let was_running = self.engine.is_running();
        let mut events = Vec::new();

        if let Some(completion) = self.engine.tick() {
            let exited = completion.mode;
            let duration_min = completion.total_secs as f64 / 60.0;

            // The sequencer sees the counter as it stood before this
            // session is counted.
            let pre_count = self.completed_pomodoros;

            let session = self.record(exited, duration_min);
            events.push(Event::TimerCompleted {
                mode: exited,
                duration_min,
                at: Utc::now(),
            });
            events.push(Event::SessionRecorded { session });

            if self.settings.sound_enabled {
                self.notifier.interval_complete(exited);
            }

            let to = next_mode(exited, pre_count, self.settings.long_break_interval);
            self.engine.reset(to, self.settings.duration_secs(to));
            events.push(Event::ModeChanged {
                from: exited,
                to,
                at: Utc::now(),
            });

            let auto_start = if exited == TimerMode::Work {
                self.settings.auto_start_breaks
            } else {
                self.settings.auto_start_pomodoros
            };
            if auto_start {
                self.pending_auto_start = Some(to);
                events.push(Event::AutoStartScheduled {
                    mode: to,
                    at: Utc::now(),
                });
            }
        }

        if was_running {
            self.persist_engine();
        }
        events
    }

    /// Fire a deferred auto-start. Idempotent: the start only applies if
    /// the engine is still idle in the scheduled mode.
    pub fn apply_auto_start(&mut self) -> Option<Event> {
        let mode = self.pending_auto_start.take()?;
        if self.engine.mode() != mode || self.engine.is_running() {
            return None;
        }
        let event = self.engine.start();
        if event.is_some() {
            self.persist_engine();
        }
        event
    }

    // ── Session recorder ─────────────────────────────────────────────

    /// Append a completed interval to the log; a work session also bumps
    /// the pomodoro counter.
    pub fn record(&mut self, kind: TimerMode, duration_min: f64) -> Session {
        let session = Session::new(kind, duration_min);
        self.sessions.push(session.clone());
        self.persist_sessions();
        if kind == TimerMode::Work {
            self.completed_pomodoros += 1;
            self.persist_counter();
        }
        session
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings.apply(patch);
        self.persist_settings();
    }

    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.settings.set(key, value)?;
        self.persist_settings();
        Ok(())
    }

    pub fn reset_settings(&mut self) {
        self.settings = Settings::default();
        self.persist_settings();
    }

    // ── Persistence ──────────────────────────────────────────────────

    fn persist_settings(&self) {
        self.persist_json(keys::SETTINGS, &self.settings);
    }

    fn persist_sessions(&self) {
        self.persist_json(keys::SESSIONS, &self.sessions);
    }

    fn persist_engine(&self) {
        self.persist_json(keys::TIMER_STATE, &self.engine);
    }

    fn persist_counter(&self) {
        if let Err(e) = self
            .store
            .set(keys::COMPLETED_POMODOROS, &self.completed_pomodoros.to_string())
        {
            tracing::warn!("failed to persist pomodoro counter: {e}");
        }
    }

    fn persist_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                if let Err(e) = self.store.set(key, &json) {
                    tracing::warn!(key, "failed to persist: {e}");
                }
            }
            Err(e) => tracing::warn!(key, "failed to encode: {e}"),
        }
    }
}

fn load_json<T: DeserializeOwned>(store: &impl StateStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, "discarding malformed persisted value: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(key, "failed to read persisted value: {e}");
            None
        }
    }
}
