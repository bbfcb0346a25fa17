//! One-second ticker backed by a tokio task.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

use super::error::SchedulerError;
use super::{Scheduler, TickGeneration};

/// Countdown cadence.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A tick delivered by [`TokioTicker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSignal {
    /// Generation that produced this tick
    pub generation: TickGeneration,
}

/// Spawns an interval task per armed period and aborts it on cancel.
///
/// Ticks are sent over an unbounded channel; the receiver feeds them to the
/// controller, which drops any whose generation is no longer current.
#[derive(Debug)]
pub struct TokioTicker {
    tx: mpsc::UnboundedSender<TickSignal>,
    task: Option<JoinHandle<()>>,
    generation: TickGeneration,
    period: Duration,
}

impl TokioTicker {
    /// Creates an idle ticker sending to `tx`.
    pub fn new(tx: mpsc::UnboundedSender<TickSignal>) -> Self {
        Self::with_period(tx, TICK_PERIOD)
    }

    /// Creates an idle ticker with a custom period.
    pub fn with_period(tx: mpsc::UnboundedSender<TickSignal>, period: Duration) -> Self {
        Self {
            tx,
            task: None,
            generation: 0,
            period,
        }
    }
}

impl Scheduler for TokioTicker {
    fn start(&mut self) -> Result<TickGeneration, SchedulerError> {
        let handle = Handle::try_current().map_err(|e| SchedulerError::NoRuntime(e.to_string()))?;
        if self.tx.is_closed() {
            return Err(SchedulerError::ReceiverClosed);
        }

        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();

        self.task = Some(handle.spawn(async move {
            // First tick one full period after arming, not immediately.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.send(TickSignal { generation }).is_err() {
                    break;
                }
            }
        }));

        debug!("Ticker armed (generation {})", generation);
        Ok(generation)
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Ticker cancelled (generation {})", self.generation);
        }
    }

    fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn generation(&self) -> TickGeneration {
        self.generation
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
