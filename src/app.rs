//! Entry-point glue: the interactive run loop and the one-shot commands.
//!
//! The run loop is a single `tokio::select!` over three sources: ticks from
//! the [`TokioTicker`], lines from stdin, and Ctrl-C. All of them drive the
//! one [`TimerController`] owned here, so no locking is needed.
//!
//! Stdin is read on a detached OS thread that forwards lines over a channel.
//! A blocking read cannot be cancelled, and the process must not wait for
//! one when it exits on Ctrl-C.

use std::io::{self, BufRead};
use std::ops::ControlFlow;
use std::path::Path;
use std::thread;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{ConfigArgs, Display, InputCommand, TerminalRenderer};
use crate::controller::{Renderer, TimerController};
use crate::notification::{DesktopAlertSender, DesktopPermissionGate, NotificationDispatcher};
use crate::progress::ProgressCounter;
use crate::scheduler::{Scheduler, TokioTicker};
use crate::settings::{Settings, SettingsInput};
use crate::sound::{try_create_player, SoundPlayer};
use crate::storage::{JsonFileStore, PersistenceStore};

// ============================================================================
// run
// ============================================================================

/// Runs the interactive timer until `quit`, end of input, or Ctrl-C.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub async fn run(store_path: &Path, alerts_allowed: bool) -> Result<()> {
    let store = JsonFileStore::with_path(store_path);
    Display::show_welcome(&Settings::load_from(&store));

    let sound = try_create_player().map(|player| Box::new(player) as Box<dyn SoundPlayer>);
    let dispatcher = NotificationDispatcher::new(
        sound,
        Box::new(DesktopAlertSender::new()),
        Box::new(DesktopPermissionGate::new(alerts_allowed)),
    );

    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let mut controller = TimerController::new(
        store,
        TerminalRenderer::new(),
        TokioTicker::new(tick_tx),
        dispatcher,
    );

    let mut lines = spawn_line_reader(io::stdin()).context("failed to start stdin reader")?;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(signal) = tick_rx.recv() => {
                controller.on_scheduled_tick(signal.generation);
            }
            line = lines.recv() => {
                let Some(line) = line else {
                    debug!("stdin closed");
                    break;
                };
                let line = line.context("failed to read from stdin")?;
                if handle_input(&mut controller, InputCommand::parse(&line)).is_break() {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                debug!("Ctrl-C received");
                break;
            }
        }
    }

    Display::show_goodbye(&controller.progress());
    info!(
        "Exiting with {} completed sessions",
        controller.progress().sessions_completed()
    );
    Ok(())
}

/// Forwards lines from `input` into a channel from a detached thread.
///
/// The channel closes at end of input, after forwarding a read error, or
/// once the receiver is dropped.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_line_reader<R>(input: R) -> io::Result<mpsc::UnboundedReceiver<io::Result<String>>>
where
    R: io::Read + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::BufReader::new(input).lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Applies one interactive command to the controller.
///
/// Returns `ControlFlow::Break` when the user asked to quit.
pub fn handle_input<S, R, T>(
    controller: &mut TimerController<S, R, T>,
    command: InputCommand,
) -> ControlFlow<()>
where
    S: PersistenceStore,
    R: Renderer,
    T: Scheduler,
{
    match command {
        InputCommand::Toggle => controller.toggle(),
        InputCommand::Reset => controller.reset(),
        InputCommand::Set {
            focus,
            break_time,
            sound,
        } => {
            let sound_enabled = sound.unwrap_or(controller.settings().sound_enabled);
            let applied = controller.save_settings(&SettingsInput::from_text(
                &focus,
                &break_time,
                sound_enabled,
            ));
            Display::show_settings_saved(&applied);
        }
        InputCommand::ShowSettings => Display::show_settings(&controller.settings()),
        InputCommand::Help => Display::show_help(),
        InputCommand::Quit => return ControlFlow::Break(()),
        InputCommand::Unknown(input) => Display::show_unknown(&input),
    }
    ControlFlow::Continue(())
}

// ============================================================================
// status / config
// ============================================================================

/// Prints persisted settings and progress.
pub fn status(store_path: &Path) {
    let store = JsonFileStore::with_path(store_path);
    let settings = Settings::load_from(&store);
    let progress = ProgressCounter::load_from(&store);
    Display::show_status(&settings, &progress, store.path());
}

/// Updates persisted settings from command-line options.
///
/// With no options the current settings are printed unchanged.
///
/// # Errors
///
/// Returns an error if the settings cannot be written.
pub fn configure(store_path: &Path, args: &ConfigArgs) -> Result<Settings> {
    let mut store = JsonFileStore::with_path(store_path);
    let mut settings = Settings::load_from(&store);

    if args.is_empty() {
        Display::show_settings(&settings);
        return Ok(settings);
    }

    settings.update(&args.to_input(&settings));
    settings
        .save_to(&mut store)
        .with_context(|| format!("failed to save settings to {}", store.path().display()))?;

    info!("Settings saved to {}", store.path().display());
    Display::show_settings_saved(&settings);
    Ok(settings)
}

// ============================================================================
// Tests
// ============================================================================
