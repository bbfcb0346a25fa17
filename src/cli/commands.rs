//! Command definitions for the Pomodoro widget CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::settings::{parse_minutes, Settings, SettingsInput};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro widget - a focus/break countdown in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-widget",
    version,
    about = "Pomodoro focus/break timer for the terminal",
    long_about = "A Pomodoro timer that alternates focus and break phases, plays a short \
                  tone and shows a desktop alert when a phase ends, and remembers your \
                  settings and completed sessions between runs.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Storage file for settings and progress
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer
    Run(RunArgs),

    /// Show saved settings and completed sessions
    Status,

    /// Change the saved settings
    Config(ConfigArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Never show desktop alerts
    #[arg(long)]
    pub no_alerts: bool,
}

// ============================================================================
// Config Command Arguments
// ============================================================================

/// Sound switch for the config command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSwitch {
    On,
    Off,
}

impl SoundSwitch {
    #[must_use]
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Arguments for the config command
///
/// Durations are taken as text and clamped the same way the interactive
/// `set` command clamps them, so `--focus 999` saves 60.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Focus duration in minutes (clamped to 1-60)
    #[arg(short, long, allow_hyphen_values = true)]
    pub focus: Option<String>,

    /// Break duration in minutes (clamped to 1-30)
    #[arg(short = 'b', long = "break", allow_hyphen_values = true)]
    pub break_minutes: Option<String>,

    /// Completion tone on or off
    #[arg(short, long, value_enum)]
    pub sound: Option<SoundSwitch>,
}

impl ConfigArgs {
    /// Returns true if no setting was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.focus.is_none() && self.break_minutes.is_none() && self.sound.is_none()
    }

    /// Builds the settings input, keeping `current` for omitted options.
    #[must_use]
    pub fn to_input(&self, current: &Settings) -> SettingsInput {
        SettingsInput {
            focus_minutes: match &self.focus {
                Some(text) => parse_minutes(text),
                None => Some(i64::from(current.focus_minutes)),
            },
            break_minutes: match &self.break_minutes {
                Some(text) => parse_minutes(text),
                None => Some(i64::from(current.break_minutes)),
            },
            sound_enabled: self
                .sound
                .map_or(current.sound_enabled, SoundSwitch::is_on),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
