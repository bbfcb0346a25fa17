//! Timer orchestration.
//!
//! [`TimerController`] owns the clock, settings, progress counter, store,
//! scheduler, dispatcher and renderer, and exposes the four commands an
//! adapter drives: `toggle`, `reset`, `on_tick` and `save_settings`. Every
//! command renders a fresh snapshot before returning.
//!
//! # Completion protocol
//!
//! When a tick expires the clock:
//!
//! 1. the ticker is cancelled
//! 2. a finished Focus phase is credited (checked before the phase flips)
//! 3. the clock switches phase, idle and full
//! 4. the dispatcher plays the cue and shows the alert
//! 5. progress is persisted with the completion time

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::clock::{SessionClock, TickOutcome};
use crate::notification::NotificationDispatcher;
use crate::progress::ProgressCounter;
use crate::scheduler::{Scheduler, TickGeneration};
use crate::settings::{Settings, SettingsInput};
use crate::storage::PersistenceStore;
use crate::types::{DisplaySnapshot, SessionPhase};

// ============================================================================
// Renderer
// ============================================================================

/// Receives a snapshot after every state change.
pub trait Renderer {
    fn render(&mut self, snapshot: &DisplaySnapshot);
}

/// Renderer that keeps every frame (for tests and headless runs).
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    frames: Vec<DisplaySnapshot>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames(&self) -> &[DisplaySnapshot] {
        &self.frames
    }

    #[must_use]
    pub fn last(&self) -> Option<&DisplaySnapshot> {
        self.frames.last()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &DisplaySnapshot) {
        self.frames.push(*snapshot);
    }
}

// ============================================================================
// TimerController
// ============================================================================

/// Drives one Pomodoro timer.
pub struct TimerController<S, R, T> {
    store: S,
    renderer: R,
    scheduler: T,
    dispatcher: NotificationDispatcher,
    settings: Settings,
    progress: ProgressCounter,
    clock: SessionClock,
}

impl<S, R, T> TimerController<S, R, T>
where
    S: PersistenceStore,
    R: Renderer,
    T: Scheduler,
{
    /// Loads persisted state, resolves alert permission and renders the
    /// initial idle Focus phase.
    pub fn new(store: S, renderer: R, scheduler: T, dispatcher: NotificationDispatcher) -> Self {
        let settings = Settings::load_from(&store);
        let progress = ProgressCounter::load_from(&store);
        let clock = SessionClock::new(&settings);

        dispatcher.prepare();
        debug!(
            "Controller ready: focus {}m, break {}m, sound {}, {} sessions",
            settings.focus_minutes,
            settings.break_minutes,
            settings.sound_enabled,
            progress.sessions_completed()
        );

        let mut controller = Self {
            store,
            renderer,
            scheduler,
            dispatcher,
            settings,
            progress,
            clock,
        };
        controller.render();
        controller
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Pauses a running clock, otherwise starts it.
    pub fn toggle(&mut self) {
        if self.clock.is_running() {
            self.scheduler.cancel();
            self.clock.pause();
        } else {
            self.start();
        }
        self.render();
    }

    /// Stops the clock and refills the current phase.
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.clock.reset(&self.settings);
        self.render();
    }

    /// Advances the clock by one second.
    ///
    /// Ignored unless the clock is running. The tick that reaches zero runs
    /// the completion protocol.
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.clock.tick();
        match outcome {
            TickOutcome::Ignored => return outcome,
            TickOutcome::Counted { .. } => {}
            TickOutcome::Expired => self.complete_phase(),
        }
        self.render();
        outcome
    }

    /// Advances the clock for a tick produced by `generation`.
    ///
    /// Ticks from a cancelled or superseded generation are dropped.
    pub fn on_scheduled_tick(&mut self, generation: TickGeneration) -> TickOutcome {
        if !self.scheduler.is_active() || generation != self.scheduler.generation() {
            debug!(
                "Dropping stale tick (generation {}, current {})",
                generation,
                self.scheduler.generation()
            );
            return TickOutcome::Ignored;
        }
        self.on_tick()
    }

    /// Applies new settings, clamped, and returns what was applied.
    ///
    /// The settings are persisted; a failed write is logged and the new
    /// values still take effect. An idle clock picks up the new duration
    /// immediately; a running clock keeps its countdown until the next reset
    /// or phase change.
    pub fn save_settings(&mut self, input: &SettingsInput) -> Settings {
        self.settings.update(input);

        if let Err(e) = self.settings.save_to(&mut self.store) {
            warn!("Failed to save settings: {} ({})", e, e.suggestion());
        }
        if self.clock.reload(&self.settings) {
            debug!("Idle clock reloaded to {}s", self.clock.total_seconds());
        }

        info!(
            "Settings saved: focus {}m, break {}m, sound {}",
            self.settings.focus_minutes,
            self.settings.break_minutes,
            if self.settings.sound_enabled { "on" } else { "off" }
        );
        self.render();
        self.settings
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn progress(&self) -> ProgressCounter {
        self.progress
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn phase(&self) -> SessionPhase {
        self.clock.phase()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Current display snapshot.
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.clock.snapshot(self.progress.sessions_completed())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn start(&mut self) {
        if !self.clock.start() {
            return;
        }
        if self.scheduler.is_active() {
            return;
        }
        if let Err(e) = self.scheduler.start() {
            warn!("Could not schedule ticks: {} ({})", e, e.suggestion());
            self.clock.pause();
        }
    }

    fn complete_phase(&mut self) {
        self.scheduler.cancel();

        let ended = self.clock.phase();
        if ended.is_focus() {
            self.progress.increment();
        }
        let beginning = self.clock.complete_phase(&self.settings);

        self.dispatcher.on_phase_completed(
            ended,
            beginning,
            self.progress.sessions_completed(),
            &self.settings,
        );

        if let Err(e) = self.progress.save_to(&mut self.store, Utc::now()) {
            warn!("Failed to save progress: {} ({})", e, e.suggestion());
        }
        info!(
            "{} complete; {} sessions so far",
            ended.label(),
            self.progress.sessions_completed()
        );
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.renderer.render(&snapshot);
    }
}

impl<S, R, T> std::fmt::Debug for TimerController<S, R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("settings", &self.settings)
            .field("progress", &self.progress)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
