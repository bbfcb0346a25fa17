//! Core data types for the Pomodoro widget.
//!
//! This module defines the data structures shared across components:
//! - Session phase (focus / break)
//! - Display snapshots handed to renderers
//! - Time formatting helpers

use serde::{Deserialize, Serialize};

// ============================================================================
// SessionPhase
// ============================================================================

/// The kind of interval the clock is counting down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Work interval before a break
    #[default]
    Focus,
    /// Rest interval after a focus session
    Break,
}

impl SessionPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Focus => "focus",
            SessionPhase::Break => "break",
        }
    }

    /// Returns the label shown next to the clock.
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Focus => "Focus Time",
            SessionPhase::Break => "Break Time",
        }
    }

    /// Returns the phase that follows this one.
    pub fn next(&self) -> Self {
        match self {
            SessionPhase::Focus => SessionPhase::Break,
            SessionPhase::Break => SessionPhase::Focus,
        }
    }

    /// Returns true for the focus phase.
    pub fn is_focus(&self) -> bool {
        matches!(self, SessionPhase::Focus)
    }
}

// ============================================================================
// DisplaySnapshot
// ============================================================================

/// Display state emitted after every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Full length of the current phase in seconds
    pub total_seconds: u32,
    /// Current phase
    pub phase: SessionPhase,
    /// Completed focus sessions
    pub sessions_completed: u32,
    /// Whether the countdown is running
    pub running: bool,
}

impl DisplaySnapshot {
    /// Remaining time as `MM:SS`.
    pub fn clock_text(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Elapsed fraction of the current phase, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.remaining_seconds);
        f64::from(elapsed) / f64::from(self.total_seconds)
    }

    /// Window/title line, e.g. `24:59 - Focus Time | 🍅 Pomodoro`.
    pub fn title(&self) -> String {
        format!("{} - {} | 🍅 Pomodoro", self.clock_text(), self.phase.label())
    }
}

/// Formats seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped at 60, so 3600 seconds is `60:00`.
pub fn format_clock(total_seconds: u32) -> String {
    let (minutes, seconds) = split_minutes(total_seconds);
    format!("{:02}:{:02}", minutes, seconds)
}

/// Splits seconds into (minutes, seconds).
pub fn split_minutes(total_seconds: u32) -> (u32, u32) {
    (total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
