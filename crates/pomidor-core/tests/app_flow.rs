//! End-to-end flows over the app coordinator with an in-memory store.

use std::cell::Cell;
use std::rc::Rc;

use pomidor_core::storage::keys;
use pomidor_core::{
    Event, MemoryStore, Notifier, PomodoroApp, Settings, SettingsPatch, StateStore, TimerMode,
};

/// Counts completion cues so tests can assert the notifier fired (or not).
#[derive(Clone, Default)]
struct CountingNotifier {
    fired: Rc<Cell<u32>>,
}

impl Notifier for CountingNotifier {
    fn interval_complete(&self, _mode: TimerMode) {
        self.fired.set(self.fired.get() + 1);
    }
}

fn run_to_completion(app: &mut PomodoroApp<MemoryStore, CountingNotifier>) -> Vec<Event> {
    let total = app.engine().time_left_secs();
    app.start();
    let mut events = Vec::new();
    for _ in 0..total {
        events.extend(app.tick());
    }
    events
}

#[test]
fn fourth_work_session_records_and_moves_to_long_break() {
    let store = MemoryStore::new();
    store.set(keys::COMPLETED_POMODOROS, "3").unwrap();
    let notifier = CountingNotifier::default();
    let mut app = PomodoroApp::load(store.clone(), notifier.clone());

    let events = run_to_completion(&mut app);

    assert_eq!(app.sessions().len(), 1);
    let session = &app.sessions()[0];
    assert_eq!(session.kind, TimerMode::Work);
    assert_eq!(session.duration_min, 25.0);
    assert_eq!(app.completed_pomodoros(), 4);
    assert_eq!(app.engine().mode(), TimerMode::LongBreak);
    assert_eq!(app.engine().time_left_secs(), 15 * 60);
    assert!(!app.engine().is_running());
    assert_eq!(notifier.fired.get(), 1);

    assert!(events
        .iter()
        .any(|e| matches!(e, Event::TimerCompleted { mode: TimerMode::Work, .. })));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::ModeChanged {
            from: TimerMode::Work,
            to: TimerMode::LongBreak,
            ..
        }
    )));
}

#[test]
fn completion_fires_exactly_once_despite_extra_ticks() {
    let notifier = CountingNotifier::default();
    let mut app = PomodoroApp::load(MemoryStore::new(), notifier.clone());
    app.update_settings(SettingsPatch {
        work_duration: Some(1),
        ..SettingsPatch::default()
    });
    app.reset();
    run_to_completion(&mut app);

    // Jittery callers may deliver a few more ticks; the new interval is
    // paused, so nothing moves and nothing is re-recorded.
    for _ in 0..10 {
        assert!(app.tick().is_empty());
    }
    assert_eq!(app.sessions().len(), 1);
    assert_eq!(app.completed_pomodoros(), 1);
    assert_eq!(notifier.fired.get(), 1);
}

#[test]
fn break_completion_records_but_does_not_count_a_pomodoro() {
    let notifier = CountingNotifier::default();
    let mut app = PomodoroApp::load(MemoryStore::new(), notifier.clone());
    app.select_mode(TimerMode::ShortBreak);
    run_to_completion(&mut app);

    assert_eq!(app.sessions().len(), 1);
    assert_eq!(app.sessions()[0].kind, TimerMode::ShortBreak);
    assert_eq!(app.completed_pomodoros(), 0);
    assert_eq!(app.engine().mode(), TimerMode::Work);
}

#[test]
fn skip_records_nothing_and_stays_silent() {
    let notifier = CountingNotifier::default();
    let mut app = PomodoroApp::load(MemoryStore::new(), notifier.clone());
    app.skip();
    app.skip();
    assert!(app.sessions().is_empty());
    assert_eq!(app.completed_pomodoros(), 0);
    assert_eq!(notifier.fired.get(), 0);
    assert_eq!(app.engine().mode(), TimerMode::Work);
}

#[test]
fn sound_disabled_suppresses_the_cue_but_not_the_record() {
    let notifier = CountingNotifier::default();
    let mut app = PomodoroApp::load(MemoryStore::new(), notifier.clone());
    app.update_settings(SettingsPatch {
        work_duration: Some(1),
        sound_enabled: Some(false),
        ..SettingsPatch::default()
    });
    app.reset();
    run_to_completion(&mut app);

    assert_eq!(notifier.fired.get(), 0);
    assert_eq!(app.sessions().len(), 1);
    assert_eq!(app.completed_pomodoros(), 1);
}

#[test]
fn auto_start_flags_follow_the_exited_mode() {
    let notifier = CountingNotifier::default();
    let mut app = PomodoroApp::load(MemoryStore::new(), notifier.clone());
    app.update_settings(SettingsPatch {
        work_duration: Some(1),
        short_break_duration: Some(1),
        auto_start_breaks: Some(true),
        auto_start_pomodoros: Some(false),
        ..SettingsPatch::default()
    });
    app.reset();

    // Exiting work: breaks auto-start.
    run_to_completion(&mut app);
    assert_eq!(app.pending_auto_start(), Some(TimerMode::ShortBreak));
    assert!(!app.engine().is_running());
    assert!(matches!(
        app.apply_auto_start(),
        Some(Event::TimerStarted { .. })
    ));
    assert!(app.engine().is_running());

    // Exiting the break: pomodoros don't.
    let left = app.engine().time_left_secs();
    for _ in 0..left {
        app.tick();
    }
    assert_eq!(app.engine().mode(), TimerMode::Work);
    assert_eq!(app.pending_auto_start(), None);
    assert!(!app.engine().is_running());
}

#[test]
fn state_survives_a_reload_from_the_same_store() {
    let store = MemoryStore::new();
    let notifier = CountingNotifier::default();
    {
        let mut app = PomodoroApp::load(store.clone(), notifier.clone());
        app.update_settings(SettingsPatch {
            work_duration: Some(1),
            long_break_interval: Some(2),
            ..SettingsPatch::default()
        });
        app.reset();
        run_to_completion(&mut app);
        app.pause();
    }

    let app = PomodoroApp::load(store, notifier);
    assert_eq!(app.settings().work_duration, 1);
    assert_eq!(app.settings().long_break_interval, 2);
    assert_eq!(app.sessions().len(), 1);
    assert_eq!(app.completed_pomodoros(), 1);
    assert_eq!(app.engine().mode(), TimerMode::ShortBreak);
}

#[test]
fn settings_roundtrip_is_idempotent() {
    let store = MemoryStore::new();
    let notifier = CountingNotifier::default();
    {
        let mut app = PomodoroApp::load(store.clone(), notifier.clone());
        app.update_settings(SettingsPatch {
            work_duration: Some(50),
            auto_start_pomodoros: Some(true),
            ..SettingsPatch::default()
        });
    }
    let first = store.get(keys::SETTINGS).unwrap().unwrap();
    let mut reloaded = PomodoroApp::load(store.clone(), notifier);
    let expected = {
        let mut s = Settings::default();
        s.work_duration = 50;
        s.auto_start_pomodoros = true;
        s
    };
    assert_eq!(reloaded.settings(), &expected);
    // Writing the reloaded settings back produces the identical encoding.
    reloaded.update_settings(SettingsPatch::default());
    assert_eq!(store.get(keys::SETTINGS).unwrap().unwrap(), first);
}
