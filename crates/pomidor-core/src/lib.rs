//! # pomidor core library
//!
//! Core logic for the pomidor Pomodoro timer: a CLI-first design where all
//! operations live in this library and the binary is a thin surface over it.
//!
//! ## Architecture
//!
//! - **Timer engine**: a second-granularity state machine; the countdown
//!   runner (or a test) calls `tick()` once per elapsed second
//! - **Mode sequencer**: pure next-interval computation
//! - **App coordinator**: ties engine, settings, session log, and counter
//!   to the store and notifier, and runs the completion sequence
//! - **Storage**: a key-value store trait with SQLite and in-memory
//!   implementations
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: timer state machine
//! - [`PomodoroApp`]: application coordinator
//! - [`Database`]: persistent store
//! - [`Settings`]: user-configurable durations and toggles

pub mod app;
pub mod error;
pub mod events;
pub mod notify;
pub mod runner;
pub mod session;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod timer;

pub use app::PomodoroApp;
pub use error::{CoreError, Result, SettingsError, StorageError};
pub use events::Event;
pub use notify::{DesktopNotifier, Notifier, NullNotifier};
pub use session::Session;
pub use settings::{Settings, SettingsPatch};
pub use stats::Stats;
pub use storage::{data_dir, Database, MemoryStore, StateStore};
pub use timer::{format_mmss, next_mode, Completion, TimerEngine, TimerMode};
