//! Display utilities for the Pomodoro widget CLI.
//!
//! This module provides formatted output for:
//! - The live clock line while the timer runs
//! - Settings and status reports
//! - Help and error messages

use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::controller::Renderer;
use crate::progress::{format_timestamp, ProgressCounter};
use crate::settings::Settings;
use crate::types::DisplaySnapshot;

/// Width of the progress bar in cells.
const BAR_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats the one-line clock view.
    ///
    /// e.g. `🍅 24:59  Focus Time  [#...................]   0%  sessions: 1  ▶ running`
    #[must_use]
    pub fn clock_line(snapshot: &DisplaySnapshot) -> String {
        let fraction = snapshot.progress().clamp(0.0, 1.0);
        let percent = (fraction * 100.0).round() as u32;
        let state = if snapshot.running {
            "▶ running"
        } else {
            "⏸ paused"
        };

        format!(
            "🍅 {}  {}  [{}]  {:>3}%  sessions: {}  {}",
            snapshot.clock_text(),
            snapshot.phase.label(),
            Self::progress_bar(fraction),
            percent,
            snapshot.sessions_completed,
            state
        )
    }

    /// Draws a fixed-width bar for a fraction in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress_bar(fraction: f64) -> String {
        let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
    }

    /// Shows the startup banner.
    pub fn show_welcome(settings: &Settings) {
        println!("🍅 Pomodoro widget");
        println!(
            "  focus {} min, break {} min, sound {}",
            settings.focus_minutes,
            settings.break_minutes,
            on_off(settings.sound_enabled)
        );
        println!("  press Enter to start or pause, type `help` for commands");
    }

    /// Shows the interactive command reference.
    pub fn show_help() {
        println!();
        println!("Commands:");
        println!("  <enter>, t, toggle        start or pause");
        println!("  r, reset                  restart the current phase");
        println!("  set <focus> <break> [on|off]");
        println!("                            save settings (focus 1-60, break 1-30)");
        println!("  settings                  show current settings");
        println!("  h, help                   show this help");
        println!("  q, quit                   exit (Ctrl-C works too)");
    }

    /// Shows the active settings.
    pub fn show_settings(settings: &Settings) {
        println!();
        println!("Focus duration: {} min", settings.focus_minutes);
        println!("Break duration: {} min", settings.break_minutes);
        println!("Sound:          {}", on_off(settings.sound_enabled));
    }

    /// Confirms a settings save with the applied (clamped) values.
    pub fn show_settings_saved(settings: &Settings) {
        println!();
        println!("* Settings saved!");
        println!("  focus {} min", settings.focus_minutes);
        println!("  break {} min", settings.break_minutes);
        println!("  sound {}", on_off(settings.sound_enabled));
    }

    /// Shows persisted settings and progress.
    pub fn show_status(settings: &Settings, progress: &ProgressCounter, store: &Path) {
        println!("Pomodoro status");
        println!("─────────────────────────────");
        println!("Focus duration: {} min", settings.focus_minutes);
        println!("Break duration: {} min", settings.break_minutes);
        println!("Sound:          {}", on_off(settings.sound_enabled));
        println!("Sessions:       {}", progress.sessions_completed());
        match progress.last_session() {
            Some(at) => println!("Last session:   {}", format_timestamp(at)),
            None => println!("Last session:   never"),
        }
        println!("Storage:        {}", store.display());
    }

    /// Shows a hint for unrecognised input.
    pub fn show_unknown(input: &str) {
        println!();
        println!("Unknown command: {}", input);
        Self::show_help();
    }

    pub fn show_goodbye(progress: &ProgressCounter) {
        println!();
        println!(
            "Bye! {} focus session{} completed.",
            progress.sessions_completed(),
            if progress.sessions_completed() == 1 { "" } else { "s" }
        );
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

// ============================================================================
// TerminalRenderer
// ============================================================================

/// Redraws the clock line in place on stdout.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    last_line: Option<String>,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn draw(&self, line: &str, title: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        // OSC 0 sets the terminal window title
        write!(out, "\x1b]0;{}\x07", title)?;
        // \x1b[K clears whatever the previous, longer line left behind
        write!(out, "\r{}\x1b[K", line)?;
        out.flush()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &DisplaySnapshot) {
        let line = Display::clock_line(snapshot);
        if self.last_line.as_deref() == Some(line.as_str()) {
            return;
        }
        if let Err(e) = self.draw(&line, &snapshot.title()) {
            debug!("Failed to draw clock line: {}", e);
        }
        self.last_line = Some(line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionPhase;

    fn snapshot(remaining: u32, total: u32, running: bool) -> DisplaySnapshot {
        DisplaySnapshot {
            remaining_seconds: remaining,
            total_seconds: total,
            phase: SessionPhase::Focus,
            sessions_completed: 2,
            running,
        }
    }

    // ------------------------------------------------------------------------
    // Clock Line Tests
    // ------------------------------------------------------------------------

    mod clock_line_tests {
        use super::*;

        #[test]
        fn test_clock_line_idle() {
            let line = Display::clock_line(&snapshot(1500, 1500, false));
            assert!(line.contains("25:00"));
            assert!(line.contains("Focus Time"));
            assert!(line.contains("  0%"));
            assert!(line.contains("sessions: 2"));
            assert!(line.contains("paused"));
        }

        #[test]
        fn test_clock_line_halfway() {
            let line = Display::clock_line(&snapshot(750, 1500, true));
            assert!(line.contains("12:30"));
            assert!(line.contains(" 50%"));
            assert!(line.contains("running"));
        }

        #[test]
        fn test_clock_line_break() {
            let mut snap = snapshot(300, 300, false);
            snap.phase = SessionPhase::Break;
            assert!(Display::clock_line(&snap).contains("Break Time"));
        }
    }

    // ------------------------------------------------------------------------
    // Progress Bar Tests
    // ------------------------------------------------------------------------

    mod progress_bar_tests {
        use super::*;

        #[test]
        fn test_empty_bar() {
            assert_eq!(Display::progress_bar(0.0), ".".repeat(BAR_WIDTH));
        }

        #[test]
        fn test_full_bar() {
            assert_eq!(Display::progress_bar(1.0), "#".repeat(BAR_WIDTH));
        }

        #[test]
        fn test_half_bar() {
            let bar = Display::progress_bar(0.5);
            assert_eq!(bar.matches('#').count(), BAR_WIDTH / 2);
            assert_eq!(bar.len(), BAR_WIDTH);
        }

        #[test]
        fn test_out_of_range_clamped() {
            assert_eq!(Display::progress_bar(1.7), "#".repeat(BAR_WIDTH));
            assert_eq!(Display::progress_bar(-0.3), ".".repeat(BAR_WIDTH));
        }
    }

    // ------------------------------------------------------------------------
    // Display Output Tests
    // ------------------------------------------------------------------------

    mod display_tests {
        use super::*;

        #[test]
        fn test_show_functions_do_not_panic() {
            let settings = Settings::default();
            let mut progress = ProgressCounter::new();
            progress.increment();

            Display::show_welcome(&settings);
            Display::show_help();
            Display::show_settings(&settings);
            Display::show_settings_saved(&settings);
            Display::show_status(&settings, &progress, Path::new("/tmp/storage.json"));
            Display::show_unknown("dance");
            Display::show_goodbye(&progress);
            Display::show_error("Test error message");
        }

        #[test]
        fn test_terminal_renderer_does_not_panic() {
            let mut renderer = TerminalRenderer::new();
            renderer.render(&snapshot(1500, 1500, false));
            renderer.render(&snapshot(1500, 1500, false));
            renderer.render(&snapshot(1499, 1500, true));
        }
    }
}
