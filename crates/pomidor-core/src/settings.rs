//! User-configurable durations and behavior toggles.
//!
//! All mutation paths validate at the boundary: an out-of-range or
//! unparseable value leaves the prior valid value in place and never
//! reaches the timer. Duration changes apply on the next reset only --
//! an interval already in progress keeps the duration it started with.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::timer::TimerMode;

const WORK_RANGE: RangeInclusive<u32> = 1..=60;
const SHORT_BREAK_RANGE: RangeInclusive<u32> = 1..=30;
const LONG_BREAK_RANGE: RangeInclusive<u32> = 1..=60;
const INTERVAL_RANGE: RangeInclusive<u32> = 2..=10;

/// Timer settings.
///
/// Persisted as JSON under the `settings` store key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Work interval length in minutes.
    #[serde(default = "default_work_duration")]
    pub work_duration: u32,
    /// Short break length in minutes.
    #[serde(default = "default_short_break_duration")]
    pub short_break_duration: u32,
    /// Long break length in minutes.
    #[serde(default = "default_long_break_duration")]
    pub long_break_duration: u32,
    /// Completed work sessions between long breaks.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_pomodoros: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

fn default_work_duration() -> u32 {
    25
}
fn default_short_break_duration() -> u32 {
    5
}
fn default_long_break_duration() -> u32 {
    15
}
fn default_long_break_interval() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration: default_work_duration(),
            short_break_duration: default_short_break_duration(),
            long_break_duration: default_long_break_duration(),
            long_break_interval: default_long_break_interval(),
            auto_start_breaks: false,
            auto_start_pomodoros: false,
            sound_enabled: true,
        }
    }
}

/// Merge-style update: only the present fields are applied, each validated
/// independently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPatch {
    pub work_duration: Option<u32>,
    pub short_break_duration: Option<u32>,
    pub long_break_duration: Option<u32>,
    pub long_break_interval: Option<u32>,
    pub auto_start_breaks: Option<bool>,
    pub auto_start_pomodoros: Option<bool>,
    pub sound_enabled: Option<bool>,
}

impl Settings {
    /// Configured length of `mode`, in minutes.
    pub fn duration_min(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_duration,
            TimerMode::ShortBreak => self.short_break_duration,
            TimerMode::LongBreak => self.long_break_duration,
        }
    }

    /// Configured length of `mode`, in seconds.
    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        u64::from(self.duration_min(mode)) * 60
    }

    /// Apply a patch, field by field. Out-of-range values are dropped and
    /// the prior value retained.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.work_duration {
            self.work_duration = checked("work_duration", v, WORK_RANGE, self.work_duration);
        }
        if let Some(v) = patch.short_break_duration {
            self.short_break_duration = checked(
                "short_break_duration",
                v,
                SHORT_BREAK_RANGE,
                self.short_break_duration,
            );
        }
        if let Some(v) = patch.long_break_duration {
            self.long_break_duration = checked(
                "long_break_duration",
                v,
                LONG_BREAK_RANGE,
                self.long_break_duration,
            );
        }
        if let Some(v) = patch.long_break_interval {
            self.long_break_interval = checked(
                "long_break_interval",
                v,
                INTERVAL_RANGE,
                self.long_break_interval,
            );
        }
        if let Some(v) = patch.auto_start_breaks {
            self.auto_start_breaks = v;
        }
        if let Some(v) = patch.auto_start_pomodoros {
            self.auto_start_pomodoros = v;
        }
        if let Some(v) = patch.sound_enabled {
            self.sound_enabled = v;
        }
    }

    /// Get a settings value as a string by field name.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by field name. The prior value is retained on
    /// any error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "work_duration" => self.work_duration = parse_minutes(key, value, WORK_RANGE)?,
            "short_break_duration" => {
                self.short_break_duration = parse_minutes(key, value, SHORT_BREAK_RANGE)?
            }
            "long_break_duration" => {
                self.long_break_duration = parse_minutes(key, value, LONG_BREAK_RANGE)?
            }
            "long_break_interval" => {
                self.long_break_interval = parse_minutes(key, value, INTERVAL_RANGE)?
            }
            "auto_start_breaks" => self.auto_start_breaks = parse_bool(key, value)?,
            "auto_start_pomodoros" => self.auto_start_pomodoros = parse_bool(key, value)?,
            "sound_enabled" => self.sound_enabled = parse_bool(key, value)?,
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Replace out-of-range fields with their defaults.
    ///
    /// Used on the load path, where malformed persisted data must never
    /// surface as an error.
    pub(crate) fn sanitize(&mut self) {
        let defaults = Settings::default();
        if !WORK_RANGE.contains(&self.work_duration) {
            self.work_duration = defaults.work_duration;
        }
        if !SHORT_BREAK_RANGE.contains(&self.short_break_duration) {
            self.short_break_duration = defaults.short_break_duration;
        }
        if !LONG_BREAK_RANGE.contains(&self.long_break_duration) {
            self.long_break_duration = defaults.long_break_duration;
        }
        if !INTERVAL_RANGE.contains(&self.long_break_interval) {
            self.long_break_interval = defaults.long_break_interval;
        }
    }
}

fn checked(field: &str, value: u32, range: RangeInclusive<u32>, prior: u32) -> u32 {
    if range.contains(&value) {
        value
    } else {
        tracing::warn!(field, value, "out-of-range setting ignored");
        prior
    }
}

fn parse_minutes(
    field: &str,
    value: &str,
    range: RangeInclusive<u32>,
) -> Result<u32, SettingsError> {
    let parsed: u32 = value.trim().parse().map_err(|_| SettingsError::InvalidValue {
        field: field.to_string(),
        message: format!("'{value}' is not a whole number"),
    })?;
    if !range.contains(&parsed) {
        return Err(SettingsError::InvalidValue {
            field: field.to_string(),
            message: format!("must be between {} and {}", range.start(), range.end()),
        });
    }
    Ok(parsed)
}

fn parse_bool(field: &str, value: &str) -> Result<bool, SettingsError> {
    value.trim().parse().map_err(|_| SettingsError::InvalidValue {
        field: field.to_string(),
        message: format!("'{value}' is not true or false"),
    })
}
