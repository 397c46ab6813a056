//! Key-value state store abstraction.
//!
//! Everything the app persists goes through [`StateStore`] as a JSON string
//! under a fixed key, so the core logic runs against [`MemoryStore`] in
//! tests and the SQLite-backed [`Database`](super::Database) in production.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// Fixed store keys.
pub mod keys {
    pub const SETTINGS: &str = "settings";
    pub const SESSIONS: &str = "sessions";
    pub const COMPLETED_POMODOROS: &str = "completedPomodoros";
    pub const TIMER_STATE: &str = "timerState";
}

/// String-keyed, JSON-valued persistence.
pub trait StateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// HashMap-backed store for tests. Clones share the same underlying map,
/// so a test can reload an app from the store it just wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
