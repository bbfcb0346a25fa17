//! Alert permission handling.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::NotificationError;

/// Decision state for system alerts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPermission {
    /// Not asked yet
    #[default]
    Undecided,
    Granted,
    Denied,
}

impl AlertPermission {
    #[must_use]
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Source of the alert permission decision.
pub trait PermissionGate {
    /// Current decision.
    fn status(&self) -> AlertPermission;

    /// Asks for permission and returns the resulting decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the request itself could not be made.
    fn request(&self) -> Result<AlertPermission, NotificationError>;
}

impl<T: PermissionGate + ?Sized> PermissionGate for std::sync::Arc<T> {
    fn status(&self) -> AlertPermission {
        (**self).status()
    }

    fn request(&self) -> Result<AlertPermission, NotificationError> {
        (**self).request()
    }
}

/// Desktop permission gate.
///
/// Desktop notification daemons do not ask for consent, so a request is
/// always granted unless alerts were switched off on the command line.
#[derive(Debug)]
pub struct DesktopPermissionGate {
    state: Mutex<AlertPermission>,
}

impl DesktopPermissionGate {
    /// Creates a gate; `alerts_allowed == false` pre-decides `Denied`.
    #[must_use]
    pub fn new(alerts_allowed: bool) -> Self {
        let initial = if alerts_allowed {
            AlertPermission::Undecided
        } else {
            AlertPermission::Denied
        };
        Self {
            state: Mutex::new(initial),
        }
    }
}

impl PermissionGate for DesktopPermissionGate {
    fn status(&self) -> AlertPermission {
        self.state
            .lock()
            .map(|state| *state)
            .unwrap_or(AlertPermission::Denied)
    }

    fn request(&self) -> Result<AlertPermission, NotificationError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| NotificationError::AuthorizationFailed(e.to_string()))?;
        if *state == AlertPermission::Undecided {
            *state = AlertPermission::Granted;
            debug!("Alert permission granted");
        }
        Ok(*state)
    }
}

/// Mock permission gate for testing.
#[derive(Debug, Default)]
pub struct MockPermissionGate {
    state: Mutex<AlertPermission>,
    answer: Mutex<AlertPermission>,
    request_count: Mutex<usize>,
}

impl MockPermissionGate {
    /// Creates a gate in `initial` state that answers requests with `answer`.
    #[must_use]
    pub fn new(initial: AlertPermission, answer: AlertPermission) -> Self {
        Self {
            state: Mutex::new(initial),
            answer: Mutex::new(answer),
            request_count: Mutex::new(0),
        }
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.lock().map(|c| *c).unwrap_or(0)
    }
}

impl PermissionGate for MockPermissionGate {
    fn status(&self) -> AlertPermission {
        self.state.lock().map(|s| *s).unwrap_or_default()
    }

    fn request(&self) -> Result<AlertPermission, NotificationError> {
        if let Ok(mut count) = self.request_count.lock() {
            *count += 1;
        }
        let answer = self.answer.lock().map(|a| *a).unwrap_or_default();
        if let Ok(mut state) = self.state.lock() {
            *state = answer;
        }
        Ok(answer)
    }
}
