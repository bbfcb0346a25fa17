//! Tone cues played on phase completion.
//!
//! A cue is three short sine steps. The break cue starts high and steps down
//! (800 → 600 → 400 Hz) for an energetic "time to stop" signal; the focus cue
//! steps up from low (400 → 600 → 800 Hz) for a calmer restart. The gain is
//! stepped: each step holds one level, sampled from an exponential decay
//! between `START_GAIN` and `END_GAIN` at the moment the step begins.

use std::time::Duration;

use crate::types::SessionPhase;

/// Pitch sequence for a cue announcing a break.
pub const BREAK_CUE_HZ: [f32; 3] = [800.0, 600.0, 400.0];

/// Pitch sequence for a cue announcing a focus session.
pub const FOCUS_CUE_HZ: [f32; 3] = [400.0, 600.0, 800.0];

/// Length of each step.
pub const STEP_DURATION: Duration = Duration::from_millis(100);

/// Gain at the start of the cue.
pub const START_GAIN: f32 = 0.3;

/// Gain the envelope approaches at the end of the cue.
pub const END_GAIN: f32 = 0.01;

/// One constant-pitch segment of a cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneStep {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub gain: f32,
}

/// A short sequence of sine tones.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCue {
    steps: Vec<ToneStep>,
}

impl ToneCue {
    /// Builds the cue announcing `beginning`, the phase that just started.
    pub fn for_phase_start(beginning: SessionPhase) -> Self {
        let pitches = match beginning {
            SessionPhase::Break => BREAK_CUE_HZ,
            SessionPhase::Focus => FOCUS_CUE_HZ,
        };
        Self::from_pitches(&pitches)
    }

    /// Builds a cue from pitches, giving each step its envelope level.
    pub fn from_pitches(pitches: &[f32]) -> Self {
        let total = STEP_DURATION.as_secs_f32() * pitches.len() as f32;
        let steps = pitches
            .iter()
            .enumerate()
            .map(|(i, &frequency_hz)| {
                let t = STEP_DURATION.as_secs_f32() * i as f32;
                ToneStep {
                    frequency_hz,
                    duration: STEP_DURATION,
                    gain: envelope(t, total),
                }
            })
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[ToneStep] {
        &self.steps
    }

    /// Total playing time.
    pub fn duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }
}

/// Exponential ramp from `START_GAIN` at t=0 to `END_GAIN` at t=total.
fn envelope(t: f32, total: f32) -> f32 {
    if total <= 0.0 {
        return START_GAIN;
    }
    START_GAIN * (END_GAIN / START_GAIN).powf(t / total)
}
