//! Sound player implementation using rodio.
//!
//! Cues are synthesized from sine waves, so no sound files are needed.

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::tone::ToneCue;

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; the cue keeps playing after `play` returns.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a tone cue in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if the cue is empty or no sink can be created.
    pub fn play(&self, cue: &ToneCue) -> Result<(), SoundError> {
        if cue.steps().is_empty() {
            return Err(SoundError::EmptyCue);
        }

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        for step in cue.steps() {
            sink.append(
                SineWave::new(step.frequency_hz)
                    .take_duration(step.duration)
                    .amplify(step.gain),
            );
        }
        sink.detach(); // Non-blocking: sound continues after function returns

        debug!("Tone cue started ({} steps)", cue.steps().len());
        Ok(())
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}
