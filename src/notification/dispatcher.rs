//! Phase-completion alerts.

use tracing::{debug, info, warn};

use super::content::AlertContent;
use super::permission::{AlertPermission, PermissionGate};
use super::sender::AlertSender;
use crate::settings::Settings;
use crate::sound::{SoundPlayer, ToneCue};
use crate::types::SessionPhase;

/// What a completion dispatch actually delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub sound_played: bool,
    pub alert_sent: bool,
}

/// Plays the completion cue and shows the system alert.
///
/// Every channel is best-effort. Failures are logged and never reach the
/// caller, so a broken audio device or a missing notification daemon cannot
/// stall the timer.
pub struct NotificationDispatcher {
    sound: Option<Box<dyn SoundPlayer>>,
    alerts: Box<dyn AlertSender>,
    permission: Box<dyn PermissionGate>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher. `sound` is `None` when no audio device exists.
    pub fn new(
        sound: Option<Box<dyn SoundPlayer>>,
        alerts: Box<dyn AlertSender>,
        permission: Box<dyn PermissionGate>,
    ) -> Self {
        Self {
            sound,
            alerts,
            permission,
        }
    }

    /// Resolves alert permission, asking only while still undecided.
    pub fn prepare(&self) -> AlertPermission {
        let status = self.permission.status();
        if status != AlertPermission::Undecided {
            debug!("Alert permission already decided: {:?}", status);
            return status;
        }

        match self.permission.request() {
            Ok(decision) => {
                debug!("Alert permission decided: {:?}", decision);
                decision
            }
            Err(e) => {
                warn!("Could not request alert permission: {} ({})", e, e.suggestion());
                AlertPermission::Undecided
            }
        }
    }

    /// Current alert permission.
    #[must_use]
    pub fn permission(&self) -> AlertPermission {
        self.permission.status()
    }

    /// Announces that `ended` finished and `beginning` started.
    pub fn on_phase_completed(
        &self,
        ended: SessionPhase,
        beginning: SessionPhase,
        sessions_completed: u32,
        settings: &Settings,
    ) -> DispatchOutcome {
        info!(
            "{} finished, {} begins ({} sessions)",
            ended.label(),
            beginning.label(),
            sessions_completed
        );

        DispatchOutcome {
            sound_played: self.play_cue(beginning, settings),
            alert_sent: self.send_alert(beginning, sessions_completed, settings),
        }
    }

    fn play_cue(&self, beginning: SessionPhase, settings: &Settings) -> bool {
        if !settings.sound_enabled {
            return false;
        }
        let Some(player) = &self.sound else {
            debug!("No audio device, cue skipped");
            return false;
        };

        match player.play(&ToneCue::for_phase_start(beginning)) {
            Ok(()) => true,
            Err(e) => {
                warn!("Completion cue failed: {} ({})", e, e.suggestion());
                false
            }
        }
    }

    fn send_alert(&self, beginning: SessionPhase, sessions_completed: u32, settings: &Settings) -> bool {
        if !self.permission.status().is_granted() {
            debug!("Alert permission not granted, alert skipped");
            return false;
        }

        let content = AlertContent::for_phase_start(beginning, sessions_completed, settings);
        match self.alerts.send(&content) {
            Ok(()) => true,
            Err(e) => {
                warn!("Completion alert failed: {} ({})", e, e.suggestion());
                false
            }
        }
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("sound", &self.sound.is_some())
            .field("permission", &self.permission.status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::notification::{MockAlertSender, MockPermissionGate};
    use crate::sound::{MockSoundPlayer, BREAK_CUE_HZ, FOCUS_CUE_HZ};

    struct Harness {
        sound: Arc<MockSoundPlayer>,
        alerts: Arc<MockAlertSender>,
        gate: Arc<MockPermissionGate>,
        dispatcher: NotificationDispatcher,
    }

    fn harness(initial: AlertPermission, answer: AlertPermission) -> Harness {
        let sound = Arc::new(MockSoundPlayer::new());
        let alerts = Arc::new(MockAlertSender::new());
        let gate = Arc::new(MockPermissionGate::new(initial, answer));
        let dispatcher = NotificationDispatcher::new(
            Some(Box::new(Arc::clone(&sound))),
            Box::new(Arc::clone(&alerts)),
            Box::new(Arc::clone(&gate)),
        );
        Harness {
            sound,
            alerts,
            gate,
            dispatcher,
        }
    }

    // ------------------------------------------------------------------------
    // prepare
    // ------------------------------------------------------------------------

    mod prepare {
        use super::*;

        #[test]
        fn test_requests_when_undecided() {
            let h = harness(AlertPermission::Undecided, AlertPermission::Granted);

            assert_eq!(h.dispatcher.prepare(), AlertPermission::Granted);
            assert_eq!(h.gate.request_count(), 1);
        }

        #[test]
        fn test_does_not_ask_again_when_granted() {
            let h = harness(AlertPermission::Granted, AlertPermission::Denied);

            assert_eq!(h.dispatcher.prepare(), AlertPermission::Granted);
            assert_eq!(h.gate.request_count(), 0);
        }

        #[test]
        fn test_does_not_ask_again_when_denied() {
            let h = harness(AlertPermission::Denied, AlertPermission::Granted);

            assert_eq!(h.dispatcher.prepare(), AlertPermission::Denied);
            assert_eq!(h.gate.request_count(), 0);
        }
    }

    // ------------------------------------------------------------------------
    // on_phase_completed
    // ------------------------------------------------------------------------

    mod completion {
        use super::*;

        #[test]
        fn test_break_beginning_plays_descending_cue() {
            let h = harness(AlertPermission::Granted, AlertPermission::Granted);

            let outcome = h.dispatcher.on_phase_completed(
                SessionPhase::Focus,
                SessionPhase::Break,
                1,
                &Settings::default(),
            );

            assert!(outcome.sound_played);
            assert!(outcome.alert_sent);
            let cue = &h.sound.get_play_calls()[0];
            assert_eq!(cue.steps()[0].frequency_hz, BREAK_CUE_HZ[0]);
            assert!(h.alerts.sent()[0].body.contains("5 minute break"));
        }

        #[test]
        fn test_focus_beginning_plays_ascending_cue() {
            let h = harness(AlertPermission::Granted, AlertPermission::Granted);

            h.dispatcher.on_phase_completed(
                SessionPhase::Break,
                SessionPhase::Focus,
                1,
                &Settings::default(),
            );

            let cue = &h.sound.get_play_calls()[0];
            assert_eq!(cue.steps()[0].frequency_hz, FOCUS_CUE_HZ[0]);
            assert!(h.alerts.sent()[0].body.starts_with("Break's over!"));
        }

        #[test]
        fn test_sound_disabled_skips_cue_and_silences_alert() {
            let h = harness(AlertPermission::Granted, AlertPermission::Granted);
            let settings = Settings {
                sound_enabled: false,
                ..Settings::default()
            };

            let outcome = h.dispatcher.on_phase_completed(
                SessionPhase::Focus,
                SessionPhase::Break,
                1,
                &settings,
            );

            assert!(!outcome.sound_played);
            assert_eq!(h.sound.play_count(), 0);
            assert!(h.alerts.sent()[0].silent);
        }

        #[test]
        fn test_alert_skipped_without_permission() {
            let h = harness(AlertPermission::Denied, AlertPermission::Denied);

            let outcome = h.dispatcher.on_phase_completed(
                SessionPhase::Focus,
                SessionPhase::Break,
                1,
                &Settings::default(),
            );

            assert!(outcome.sound_played);
            assert!(!outcome.alert_sent);
            assert_eq!(h.alerts.send_count(), 0);
        }

        #[test]
        fn test_failures_are_swallowed() {
            let h = harness(AlertPermission::Granted, AlertPermission::Granted);
            h.sound.set_should_fail(true);
            h.alerts.set_should_fail(true);

            let outcome = h.dispatcher.on_phase_completed(
                SessionPhase::Focus,
                SessionPhase::Break,
                2,
                &Settings::default(),
            );

            assert_eq!(outcome, DispatchOutcome::default());
        }

        #[test]
        fn test_no_audio_device() {
            let alerts = Arc::new(MockAlertSender::new());
            let dispatcher = NotificationDispatcher::new(
                None,
                Box::new(Arc::clone(&alerts)),
                Box::new(MockPermissionGate::new(
                    AlertPermission::Granted,
                    AlertPermission::Granted,
                )),
            );

            let outcome = dispatcher.on_phase_completed(
                SessionPhase::Focus,
                SessionPhase::Break,
                1,
                &Settings::default(),
            );

            assert!(!outcome.sound_played);
            assert!(outcome.alert_sent);
        }
    }
}
