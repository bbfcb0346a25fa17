//! Scheduler error types.

use thiserror::Error;

/// Errors that can occur when arming the countdown ticker.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// No async runtime is available to drive the ticker.
    #[error("no async runtime available to schedule ticks: {0}")]
    NoRuntime(String),

    /// The receiving side of the tick channel is gone.
    #[error("tick receiver has been dropped")]
    ReceiverClosed,
}

impl SchedulerError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoRuntime(_) => "start the timer from inside the tokio runtime",
            Self::ReceiverClosed => "restart the application",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchedulerError::NoRuntime("not in a runtime".to_string());
        assert!(err.to_string().contains("not in a runtime"));
        assert!(SchedulerError::ReceiverClosed.to_string().contains("dropped"));
    }

    #[test]
    fn test_suggestion() {
        assert!(SchedulerError::NoRuntime("x".into())
            .suggestion()
            .contains("runtime"));
    }
}
