//! Tick scheduling for the countdown.
//!
//! A scheduler delivers one tick per second while armed. Every `start`
//! opens a new generation; ticks are tagged with the generation that
//! produced them so a tick already in flight when the scheduler was
//! cancelled can be recognised and dropped.
//!
//! - [`TokioTicker`]: real one-second ticks from a tokio task
//! - [`ManualScheduler`]: no timer at all; the caller drives ticks, used
//!   by tests and headless drivers

mod error;
mod ticker;

pub use error::SchedulerError;
pub use ticker::{TickSignal, TokioTicker, TICK_PERIOD};

/// Identifies one armed period of a scheduler.
pub type TickGeneration = u64;

/// Source of the one-second countdown tick.
pub trait Scheduler {
    /// Arms the scheduler and returns the new generation.
    ///
    /// # Errors
    ///
    /// Returns an error if ticks cannot be scheduled.
    fn start(&mut self) -> Result<TickGeneration, SchedulerError>;

    /// Disarms the scheduler. Safe to call when already inactive.
    fn cancel(&mut self);

    /// Returns true while ticks are being scheduled.
    fn is_active(&self) -> bool;

    /// Generation of the most recent `start`.
    fn generation(&self) -> TickGeneration;
}

/// Scheduler without a clock; records arm/cancel calls.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    active: bool,
    generation: TickGeneration,
    start_count: usize,
    cancel_count: usize,
    max_concurrent: usize,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the scheduler was armed.
    #[must_use]
    pub fn start_count(&self) -> usize {
        self.start_count
    }

    /// Number of cancellations that disarmed an active scheduler.
    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.cancel_count
    }

    /// Highest number of simultaneously armed tickers ever observed.
    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self) -> Result<TickGeneration, SchedulerError> {
        let concurrent = if self.active { 2 } else { 1 };
        self.max_concurrent = self.max_concurrent.max(concurrent);
        self.active = true;
        self.generation += 1;
        self.start_count += 1;
        Ok(self.generation)
    }

    fn cancel(&mut self) {
        if self.active {
            self.active = false;
            self.cancel_count += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn generation(&self) -> TickGeneration {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_generations() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.generation(), 0);

        assert_eq!(scheduler.start().unwrap(), 1);
        assert!(scheduler.is_active());

        scheduler.cancel();
        assert!(!scheduler.is_active());

        assert_eq!(scheduler.start().unwrap(), 2);
        assert_eq!(scheduler.generation(), 2);
    }

    #[test]
    fn test_manual_scheduler_cancel_idempotent() {
        let mut scheduler = ManualScheduler::new();
        scheduler.start().unwrap();
        scheduler.cancel();
        scheduler.cancel();
        assert_eq!(scheduler.cancel_count(), 1);
    }

    #[test]
    fn test_manual_scheduler_tracks_double_start() {
        let mut scheduler = ManualScheduler::new();
        scheduler.start().unwrap();
        assert_eq!(scheduler.max_concurrent(), 1);

        scheduler.start().unwrap();
        assert_eq!(scheduler.max_concurrent(), 2);
    }
}
