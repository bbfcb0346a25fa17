//! System alert delivery.

use std::sync::Mutex;
use std::thread;

use notify_rust::Notification;
use tracing::{debug, warn};

use super::content::AlertContent;
use super::error::NotificationError;

/// Application name reported to the notification daemon.
pub const APP_NAME: &str = "pomodoro-widget";

/// Shows system alerts.
pub trait AlertSender {
    /// Shows one alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be delivered.
    fn send(&self, content: &AlertContent) -> Result<(), NotificationError>;
}

impl<T: AlertSender + ?Sized> AlertSender for std::sync::Arc<T> {
    fn send(&self, content: &AlertContent) -> Result<(), NotificationError> {
        (**self).send(content)
    }
}

/// Sends alerts through the desktop notification service.
///
/// Delivery runs on a detached thread, so a slow or missing notification
/// daemon never holds up the caller. Delivery failures are only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopAlertSender;

impl DesktopAlertSender {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AlertSender for DesktopAlertSender {
    fn send(&self, content: &AlertContent) -> Result<(), NotificationError> {
        let content = content.clone();
        thread::Builder::new()
            .name("alert".to_string())
            .spawn(move || match show(&content) {
                Ok(()) => debug!("Alert shown: {}", content.body),
                Err(e) => warn!("Failed to show alert: {} ({})", e, e.suggestion()),
            })
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
        Ok(())
    }
}

/// Shows one alert, waiting for the notification service to answer.
fn show(content: &AlertContent) -> Result<(), NotificationError> {
    let mut notification = Notification::new();
    notification
        .summary(&content.title)
        .body(&content.body)
        .appname(APP_NAME)
        .icon("alarm-clock");

    #[cfg(all(unix, not(target_os = "macos")))]
    notification.hint(notify_rust::Hint::SuppressSound(content.silent));

    notification
        .show()
        .map(drop)
        .map_err(|e| NotificationError::SendFailed(e.to_string()))
}

/// Mock alert sender for testing.
#[derive(Debug, Default)]
pub struct MockAlertSender {
    sent: Mutex<Vec<AlertContent>>,
    should_fail: Mutex<bool>,
}

impl MockAlertSender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        if let Ok(mut flag) = self.should_fail.lock() {
            *flag = should_fail;
        }
    }

    #[must_use]
    pub fn sent(&self) -> Vec<AlertContent> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn send_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl AlertSender for MockAlertSender {
    fn send(&self, content: &AlertContent) -> Result<(), NotificationError> {
        if self.should_fail.lock().map(|f| *f).unwrap_or(false) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(content.clone());
        }
        Ok(())
    }
}
