//! Pomodoro Widget Library
//!
//! This library provides the core functionality for the Pomodoro widget.
//! It includes:
//! - Countdown state machine alternating focus and break phases
//! - Validated settings and a completed-session counter
//! - Key/value persistence (JSON file or in-memory)
//! - One-second tick scheduling on tokio
//! - Completion alerts: synthesized tone cues and desktop notifications
//! - The controller that ties these together, plus the terminal front end

pub mod app;
pub mod cli;
pub mod clock;
pub mod controller;
pub mod notification;
pub mod progress;
pub mod scheduler;
pub mod settings;
pub mod sound;
pub mod storage;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{format_clock, DisplaySnapshot, SessionPhase};

pub use clock::{ClockState, SessionClock, TickOutcome};
pub use controller::{RecordingRenderer, Renderer, TimerController};
pub use progress::ProgressCounter;
pub use settings::{Settings, SettingsInput};

// Re-export storage types
pub use storage::{JsonFileStore, MemoryStore, PersistenceStore, StorageError};

// Re-export scheduler types
pub use scheduler::{ManualScheduler, Scheduler, SchedulerError, TickSignal, TokioTicker};

// Re-export notification types
pub use notification::{
    AlertContent, AlertPermission, AlertSender, DesktopAlertSender, DesktopPermissionGate,
    MockAlertSender, MockPermissionGate, NotificationDispatcher, NotificationError,
    PermissionGate,
};

// Re-export sound types
pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, ToneCue};
