//! Phase-completion notifications.
//!
//! This module provides:
//!
//! - Synthesized audio cues (through [`crate::sound`])
//! - Desktop alerts via `notify-rust`
//! - An alert permission gate queried once at startup
//!
//! # Example
//!
//! ```rust,no_run
//! use pomodoro_widget::notification::{
//!     DesktopAlertSender, DesktopPermissionGate, NotificationDispatcher,
//! };
//! use pomodoro_widget::settings::Settings;
//! use pomodoro_widget::types::SessionPhase;
//!
//! let dispatcher = NotificationDispatcher::new(
//!     None,
//!     Box::new(DesktopAlertSender::new()),
//!     Box::new(DesktopPermissionGate::new(true)),
//! );
//! dispatcher.prepare();
//! dispatcher.on_phase_completed(
//!     SessionPhase::Focus,
//!     SessionPhase::Break,
//!     1,
//!     &Settings::default(),
//! );
//! ```

mod content;
mod dispatcher;
pub mod error;
mod permission;
mod sender;

pub use self::content::{AlertContent, ALERT_TITLE};
pub use self::dispatcher::{DispatchOutcome, NotificationDispatcher};
pub use self::error::NotificationError;
pub use self::permission::{
    AlertPermission, DesktopPermissionGate, MockPermissionGate, PermissionGate,
};
pub use self::sender::{AlertSender, DesktopAlertSender, MockAlertSender, APP_NAME};
