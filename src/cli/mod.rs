//! CLI module for the Pomodoro widget.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and the terminal renderer
//! - `input`: Interactive command parsing for `run`

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, ConfigArgs, RunArgs, SoundSwitch};
pub use display::{Display, TerminalRenderer};
pub use input::InputCommand;
