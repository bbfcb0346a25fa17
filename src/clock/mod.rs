//! Countdown state machine.
//!
//! ```text
//!            start()              tick() hits 0
//!   Idle ───────────────▶ Running ───────────────▶ Expired
//!    ▲  ◀───────────────     │                        │
//!    │      pause()          │ reset()                │ complete_phase()
//!    └───────────────────────┴────────────────────────┘
//! ```
//!
//! The clock only counts; scheduling ticks, crediting sessions and firing
//! alerts belong to the controller.

use tracing::debug;

use crate::settings::Settings;
use crate::types::{DisplaySnapshot, SessionPhase};

// ============================================================================
// ClockState / TickOutcome
// ============================================================================

/// Run state of the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClockState {
    /// Not counting: never started, paused, or just transitioned
    #[default]
    Idle,
    /// Counting down once per tick
    Running,
    /// Reached zero; waiting for `complete_phase`
    Expired,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock was not running; nothing changed
    Ignored,
    /// One second elapsed
    Counted { remaining_seconds: u32 },
    /// The phase just reached zero
    Expired,
}

// ============================================================================
// SessionClock
// ============================================================================

/// Countdown for the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClock {
    phase: SessionPhase,
    remaining_seconds: u32,
    total_seconds: u32,
    state: ClockState,
}

impl SessionClock {
    /// Creates an idle clock at the start of a focus phase.
    pub fn new(settings: &Settings) -> Self {
        let total = settings.duration_for(SessionPhase::Focus);
        Self {
            phase: SessionPhase::Focus,
            remaining_seconds: total,
            total_seconds: total,
            state: ClockState::Idle,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Returns true if the clock is counting down.
    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Starts counting. Returns false (and does nothing) if not idle.
    pub fn start(&mut self) -> bool {
        if self.state != ClockState::Idle {
            return false;
        }
        self.state = ClockState::Running;
        debug!("Clock started at {}s ({})", self.remaining_seconds, self.phase.as_str());
        true
    }

    /// Stops counting, keeping the remaining time.
    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Idle;
            debug!("Clock paused at {}s", self.remaining_seconds);
        }
    }

    /// Stops and refills the current phase, discarding elapsed time.
    pub fn reset(&mut self, settings: &Settings) {
        self.state = ClockState::Idle;
        self.fill(settings);
        debug!("Clock reset to {}s ({})", self.total_seconds, self.phase.as_str());
    }

    /// Refills the current phase from new durations.
    ///
    /// Returns false and leaves the clock untouched while it is running.
    pub fn reload(&mut self, settings: &Settings) -> bool {
        if self.is_running() {
            return false;
        }
        self.fill(settings);
        true
    }

    /// Advances one second.
    ///
    /// The tick that reaches zero reports [`TickOutcome::Expired`]; the clock
    /// then waits in [`ClockState::Expired`] for `complete_phase`.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != ClockState::Running {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.state = ClockState::Expired;
            debug!("Clock expired ({})", self.phase.as_str());
            return TickOutcome::Expired;
        }

        TickOutcome::Counted {
            remaining_seconds: self.remaining_seconds,
        }
    }

    /// Switches to the other phase with a full, idle countdown.
    ///
    /// Returns the new phase.
    pub fn complete_phase(&mut self, settings: &Settings) -> SessionPhase {
        self.phase = self.phase.next();
        self.state = ClockState::Idle;
        self.fill(settings);
        debug!("Phase switched to {} ({}s)", self.phase.as_str(), self.total_seconds);
        self.phase
    }

    /// Builds a display snapshot for the given session count.
    pub fn snapshot(&self, sessions_completed: u32) -> DisplaySnapshot {
        DisplaySnapshot {
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds,
            phase: self.phase,
            sessions_completed,
            running: self.is_running(),
        }
    }

    fn fill(&mut self, settings: &Settings) {
        let total = settings.duration_for(self.phase);
        self.total_seconds = total;
        self.remaining_seconds = total;
    }

    /// Overrides the remaining time (for tests).
    #[cfg(test)]
    pub(crate) fn set_remaining_seconds(&mut self, seconds: u32) {
        self.remaining_seconds = seconds.min(self.total_seconds);
    }
}

// ============================================================================
// Tests
// ============================================================================
