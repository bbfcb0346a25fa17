//! Alert content construction.
//!
//! Text depends on the phase that is beginning: a break alert reports how
//! many focus sessions have been completed, a focus alert announces the next
//! focus length.

use crate::settings::Settings;
use crate::types::SessionPhase;

/// Title shown on every alert.
pub const ALERT_TITLE: &str = "🍅 Pomodoro Timer";

/// Content of one system alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertContent {
    pub title: String,
    pub body: String,
    /// Suppress the alert's own sound
    pub silent: bool,
}

impl AlertContent {
    /// Builds the alert for the phase that just began.
    #[must_use]
    pub fn for_phase_start(
        beginning: SessionPhase,
        sessions_completed: u32,
        settings: &Settings,
    ) -> Self {
        let body = match beginning {
            SessionPhase::Break => format!(
                "Time for a {} minute break! You've completed {} focus session{}.",
                settings.break_minutes,
                sessions_completed,
                if sessions_completed == 1 { "" } else { "s" }
            ),
            SessionPhase::Focus => format!(
                "Break's over! Time for a {} minute focus session.",
                settings.focus_minutes
            ),
        };

        Self {
            title: ALERT_TITLE.to_string(),
            body,
            silent: !settings.sound_enabled,
        }
    }
}
