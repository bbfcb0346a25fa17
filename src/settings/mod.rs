//! Validated timer settings.
//!
//! Settings never reject input: values outside their range are clamped to the
//! nearest bound and non-numeric input becomes the minimum. Loading is
//! lenient per field, so one corrupt value does not discard the others.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::{read_json, write_json, PersistenceStore, StorageError, SETTINGS_KEY};
use crate::types::SessionPhase;

/// Allowed focus duration in minutes.
pub const FOCUS_MINUTES_MIN: u32 = 1;
pub const FOCUS_MINUTES_MAX: u32 = 60;

/// Allowed break duration in minutes.
pub const BREAK_MINUTES_MIN: u32 = 1;
pub const BREAK_MINUTES_MAX: u32 = 30;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_SOUND_ENABLED: bool = true;

// ============================================================================
// Settings
// ============================================================================

/// Timer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Focus duration in minutes (1-60)
    pub focus_minutes: u32,
    /// Break duration in minutes (1-30)
    pub break_minutes: u32,
    /// Whether completion cues are audible
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            sound_enabled: DEFAULT_SOUND_ENABLED,
        }
    }
}

impl Settings {
    /// Applies new values, clamping each into range. Always succeeds.
    pub fn update(&mut self, input: &SettingsInput) {
        self.focus_minutes = clamp_minutes(input.focus_minutes, FOCUS_MINUTES_MIN, FOCUS_MINUTES_MAX);
        self.break_minutes = clamp_minutes(input.break_minutes, BREAK_MINUTES_MIN, BREAK_MINUTES_MAX);
        self.sound_enabled = input.sound_enabled;
        debug!(
            "Settings updated: focus={}m break={}m sound={}",
            self.focus_minutes, self.break_minutes, self.sound_enabled
        );
    }

    /// Returns the length of `phase` in seconds.
    pub fn duration_for(&self, phase: SessionPhase) -> u32 {
        match phase {
            SessionPhase::Focus => self.focus_minutes * 60,
            SessionPhase::Break => self.break_minutes * 60,
        }
    }

    /// Loads settings from the store, defaulting each field independently.
    pub fn load_from(store: &dyn PersistenceStore) -> Self {
        let defaults = Self::default();
        let Some(record) = read_json(store, SETTINGS_KEY) else {
            return defaults;
        };

        Self {
            focus_minutes: stored_minutes(
                &record,
                "focusDuration",
                FOCUS_MINUTES_MIN,
                FOCUS_MINUTES_MAX,
            )
            .unwrap_or(defaults.focus_minutes),
            break_minutes: stored_minutes(
                &record,
                "breakDuration",
                BREAK_MINUTES_MIN,
                BREAK_MINUTES_MAX,
            )
            .unwrap_or(defaults.break_minutes),
            sound_enabled: record
                .get("soundEnabled")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(defaults.sound_enabled),
        }
    }

    /// Writes the settings record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save_to(&self, store: &mut dyn PersistenceStore) -> Result<(), StorageError> {
        write_json(store, SETTINGS_KEY, &SettingsRecord::from(self))
    }
}

/// Reads a positive integer field, clamped into `[min, max]`.
///
/// Zero, negatives and non-integers are treated as missing.
fn stored_minutes(record: &serde_json::Value, field: &str, min: u32, max: u32) -> Option<u32> {
    record
        .get(field)
        .and_then(serde_json::Value::as_u64)
        .filter(|&v| v > 0)
        .map(|v| clamp_minutes(Some(i64::try_from(v).unwrap_or(i64::MAX)), min, max))
}

/// On-disk shape of the settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    pub focus_duration: u32,
    pub break_duration: u32,
    pub sound_enabled: bool,
}

impl From<&Settings> for SettingsRecord {
    fn from(settings: &Settings) -> Self {
        Self {
            focus_duration: settings.focus_minutes,
            break_duration: settings.break_minutes,
            sound_enabled: settings.sound_enabled,
        }
    }
}

// ============================================================================
// SettingsInput
// ============================================================================

/// Unvalidated settings as entered by the user.
///
/// `None` minutes mean the field was not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsInput {
    pub focus_minutes: Option<i64>,
    pub break_minutes: Option<i64>,
    pub sound_enabled: bool,
}

impl SettingsInput {
    /// Creates input from numeric values.
    pub fn new(focus_minutes: i64, break_minutes: i64, sound_enabled: bool) -> Self {
        Self {
            focus_minutes: Some(focus_minutes),
            break_minutes: Some(break_minutes),
            sound_enabled,
        }
    }

    /// Creates input from raw text fields.
    pub fn from_text(focus: &str, break_time: &str, sound_enabled: bool) -> Self {
        Self {
            focus_minutes: parse_minutes(focus),
            break_minutes: parse_minutes(break_time),
            sound_enabled,
        }
    }
}

impl From<Settings> for SettingsInput {
    fn from(settings: Settings) -> Self {
        Self::new(
            i64::from(settings.focus_minutes),
            i64::from(settings.break_minutes),
            settings.sound_enabled,
        )
    }
}

/// Parses the leading integer of a form field.
///
/// Skips leading whitespace, accepts one optional sign, then reads digits up
/// to the first non-digit. Returns `None` when no digit is found. Values too
/// large for `i64` saturate.
pub fn parse_minutes(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for ch in digits.chars() {
        let Some(d) = ch.to_digit(10) else { break };
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(i64::from(d));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Clamps a possibly-missing value into `[min, max]`.
pub fn clamp_minutes(value: Option<i64>, min: u32, max: u32) -> u32 {
    match value {
        None => min,
        Some(v) => v.clamp(i64::from(min), i64::from(max)) as u32,
    }
}

// ============================================================================
// Tests
// ============================================================================
