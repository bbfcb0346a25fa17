//! Sound playback for phase-completion cues.
//!
//! Whether a cue plays at all is decided by `Settings::sound_enabled` in the
//! notification dispatcher; players here always play what they are given.
//!
//! This module provides audio cue capabilities, including:
//!
//! - Synthesized tone cues (no sound files needed)
//! - Non-blocking audio playback
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │ play(&ToneCue)
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ RodioSoundPlayer │────▶│  SineWave steps  │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use pomodoro_widget::sound::{RodioSoundPlayer, ToneCue};
//! use pomodoro_widget::types::SessionPhase;
//!
//! let player = RodioSoundPlayer::new().expect("audio init");
//! player
//!     .play(&ToneCue::for_phase_start(SessionPhase::Break))
//!     .expect("playback failed");
//! ```

mod error;
mod player;
mod tone;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use tone::{ToneCue, ToneStep, BREAK_CUE_HZ, FOCUS_CUE_HZ, STEP_DURATION};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a cue.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, cue: &ToneCue) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, cue: &ToneCue) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, cue)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Arc<T> {
    fn play(&self, cue: &ToneCue) -> Result<(), SoundError> {
        (**self).play(cue)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<ToneCue>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<ToneCue> {
        self.play_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.clear();
        }
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, cue: &ToneCue) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::StreamError("Mock failure".to_string()));
        }
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.push(cue.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionPhase;

    #[test]
    fn test_module_exports() {
        let _: fn() -> Result<RodioSoundPlayer, SoundError> = RodioSoundPlayer::new;
        let _: fn() -> Option<RodioSoundPlayer> = try_create_player;
        let _: fn(SessionPhase) -> ToneCue = ToneCue::for_phase_start;
    }

    #[test]
    fn test_mock_records_cues() {
        let player = MockSoundPlayer::new();
        player
            .play(&ToneCue::for_phase_start(SessionPhase::Break))
            .unwrap();

        assert_eq!(player.play_count(), 1);
        assert_eq!(
            player.get_play_calls()[0].steps()[0].frequency_hz,
            BREAK_CUE_HZ[0]
        );

        player.clear_calls();
        assert_eq!(player.play_count(), 0);
    }

    #[test]
    fn test_mock_failure() {
        let player = MockSoundPlayer::new();
        player.set_should_fail(true);

        let result = player.play(&ToneCue::for_phase_start(SessionPhase::Focus));
        assert!(result.is_err());
        assert_eq!(player.play_count(), 0);
    }

    #[test]
    fn test_shared_mock_through_arc() {
        let mock = Arc::new(MockSoundPlayer::new());
        let boxed: Box<dyn SoundPlayer> = Box::new(Arc::clone(&mock));

        boxed
            .play(&ToneCue::for_phase_start(SessionPhase::Break))
            .unwrap();
        assert_eq!(mock.play_count(), 1);
    }
}
