//! End-to-End tests with the real tokio ticker.
//!
//! The ticker period is shortened so a one-minute phase finishes in well
//! under a second.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use pomodoro_widget::controller::{RecordingRenderer, TimerController};
use pomodoro_widget::notification::{
    AlertPermission, MockAlertSender, MockPermissionGate, NotificationDispatcher,
};
use pomodoro_widget::scheduler::{Scheduler, TickSignal, TokioTicker};
use pomodoro_widget::settings::SettingsInput;
use pomodoro_widget::storage::JsonFileStore;
use pomodoro_widget::types::SessionPhase;

// ============================================================================
// Test Helpers
// ============================================================================

const FAST_PERIOD: Duration = Duration::from_millis(2);

type Controller = TimerController<JsonFileStore, RecordingRenderer, TokioTicker>;

fn create_controller(
    path: &std::path::Path,
) -> (Controller, mpsc::UnboundedReceiver<TickSignal>, Arc<MockAlertSender>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let alerts = Arc::new(MockAlertSender::new());
    let dispatcher = NotificationDispatcher::new(
        None,
        Box::new(Arc::clone(&alerts)),
        Box::new(MockPermissionGate::new(
            AlertPermission::Granted,
            AlertPermission::Granted,
        )),
    );
    let controller = TimerController::new(
        JsonFileStore::with_path(path),
        RecordingRenderer::new(),
        TokioTicker::with_period(tx, FAST_PERIOD),
        dispatcher,
    );
    (controller, rx, alerts)
}

/// Feeds ticks to the controller until `done` holds.
async fn drive_until(
    controller: &mut Controller,
    rx: &mut mpsc::UnboundedReceiver<TickSignal>,
    done: impl Fn(&Controller) -> bool,
) {
    let result = timeout(Duration::from_secs(10), async {
        while !done(controller) {
            let signal = rx.recv().await.expect("ticker channel open");
            controller.on_scheduled_tick(signal.generation);
        }
    })
    .await;
    assert!(result.is_ok(), "timed out driving the timer");
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_focus_phase_completes_with_real_ticker() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, mut rx, alerts) = create_controller(&dir.path().join("storage.json"));
    controller.save_settings(&SettingsInput::new(1, 1, true));

    controller.toggle();
    assert!(controller.scheduler().is_active());

    drive_until(&mut controller, &mut rx, |c| c.phase() == SessionPhase::Break).await;

    assert_eq!(controller.progress().sessions_completed(), 1);
    assert!(!controller.is_running());
    assert!(!controller.scheduler().is_active());
    assert_eq!(alerts.send_count(), 1);
}

#[tokio::test]
async fn test_pause_stops_real_ticks() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, mut rx, _alerts) = create_controller(&dir.path().join("storage.json"));

    controller.toggle();
    drive_until(&mut controller, &mut rx, |c| c.snapshot().remaining_seconds <= 1490).await;
    controller.toggle();
    let paused_at = controller.snapshot().remaining_seconds;

    // Anything still queued belongs to the cancelled generation.
    tokio::time::sleep(Duration::from_millis(50)).await;
    while let Ok(signal) = rx.try_recv() {
        controller.on_scheduled_tick(signal.generation);
    }

    assert_eq!(controller.snapshot().remaining_seconds, paused_at);
}

#[tokio::test]
async fn test_progress_persisted_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let (mut controller, mut rx, _alerts) = create_controller(&path);
        controller.save_settings(&SettingsInput::new(1, 1, false));
        controller.toggle();
        drive_until(&mut controller, &mut rx, |c| c.phase() == SessionPhase::Break).await;
    }

    let text = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    let progress: serde_json::Value =
        serde_json::from_str(doc["pomodoroProgress"].as_str().unwrap()).unwrap();
    assert_eq!(progress["sessionsCompleted"], 1);
    assert!(progress["lastSession"].is_string());
}
