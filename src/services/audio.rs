//! Sound cues.
//!
//! Playback itself is the host's business. The core only asks for a cue
//! and never waits on, or fails because of, the answer.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::AudioError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Flip,
    Match,
    Fail,
}

impl std::fmt::Display for SoundCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SoundCue::Flip => "flip",
            SoundCue::Match => "match",
            SoundCue::Fail => "fail",
        };
        f.write_str(name)
    }
}

/// Host-provided audio playback.
pub trait AudioService {
    /// Start playing `cue`. Should return promptly.
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError>;
}

/// Plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioService for SilentAudio {
    fn play(&mut self, _cue: SoundCue) -> Result<(), AudioError> {
        Ok(())
    }
}

impl<F> AudioService for F
where
    F: FnMut(SoundCue) -> Result<(), AudioError>,
{
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        self(cue)
    }
}

/// Request `cue`, logging and discarding any failure.
pub(crate) fn play_cue<A: AudioService>(audio: &mut A, cue: SoundCue) {
    if let Err(err) = audio.play(cue) {
        warn!("{err}");
    }
}
