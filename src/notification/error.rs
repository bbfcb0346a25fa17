//! Notification system error types.
//!
//! All errors here are best-effort failures: the dispatcher logs them and
//! the timer keeps running.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Alert permission was denied.
    #[error("alert permission denied")]
    PermissionDenied,

    /// Failed to request alert permission.
    #[error("failed to request alert permission: {0}")]
    AuthorizationFailed(String),

    /// Failed to send an alert.
    #[error("failed to send alert: {0}")]
    SendFailed(String),

    /// No notification service is reachable.
    #[error("notification service not available")]
    NotAvailable,
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::AuthorizationFailed(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::PermissionDenied | Self::AuthorizationFailed(_) => {
                "allow notifications for this application in the system settings"
            }
            Self::SendFailed(_) => "check that a notification daemon is running",
            Self::NotAvailable => "run inside a desktop session, or pass --no-alerts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotificationError::PermissionDenied;
        assert_eq!(err.to_string(), "alert permission denied");

        let err = NotificationError::SendFailed("dbus".to_string());
        assert!(err.to_string().contains("dbus"));
    }

    #[test]
    fn test_is_permission_error() {
        assert!(NotificationError::PermissionDenied.is_permission_error());
        assert!(NotificationError::AuthorizationFailed("x".into()).is_permission_error());
        assert!(!NotificationError::NotAvailable.is_permission_error());
        assert!(!NotificationError::SendFailed("x".into()).is_permission_error());
    }

    #[test]
    fn test_suggestion() {
        assert!(NotificationError::NotAvailable
            .suggestion()
            .contains("--no-alerts"));
    }
}
