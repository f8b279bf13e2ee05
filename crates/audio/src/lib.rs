//! Synthesized audio for the three game cues.
//!
//! [`synth`] generates the background tune and the one-shot cues and is always
//! built. With the `playback` feature, [`try_jukebox`] opens the default output
//! device through rodio and returns a [`Jukebox`](tetris_console_core::Jukebox)
//! whose channels play those sounds at the volumes from
//! [`Cue::config`](tetris_console_core::Cue::config).

pub mod synth;

#[cfg(feature = "playback")]
mod backend;

pub use tetris_console_core as core;

#[cfg(feature = "playback")]
pub use backend::try_jukebox;
pub use synth::{loss_alarm, pause_chime, BackgroundLoop, SAMPLE_RATE};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum AudioError {
    #[cfg(feature = "playback")]
    #[error("cannot open audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    #[cfg(feature = "playback")]
    #[error("cannot start playback: {0}")]
    Play(#[from] rodio::PlayError),
    #[error("audio support was not compiled in (build with `--features audio`)")]
    Unsupported,
}

/// Without the `playback` feature there is no device to open.
#[cfg(not(feature = "playback"))]
pub fn try_jukebox() -> Result<core::Jukebox, AudioError> {
    Err(AudioError::Unsupported)
}

/// Jukebox for a session, plus the reason it is silent when the device could
/// not be used. Disabled audio is silent on purpose and reports nothing.
pub fn open_jukebox(enabled: bool) -> (core::Jukebox, Option<AudioError>) {
    if !enabled {
        info!("audio disabled by configuration");
        return (core::Jukebox::silent(), None);
    }
    match try_jukebox() {
        Ok(jukebox) => (jukebox, None),
        Err(err) => {
            warn!(error = %err, "audio unavailable, continuing without sound");
            (core::Jukebox::silent(), Some(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_audio_is_silent_without_a_reason() {
        let (mut jukebox, reason) = open_jukebox(false);
        assert!(reason.is_none());
        jukebox.play(core::Cue::Background).unwrap();
    }

    #[cfg(not(feature = "playback"))]
    #[test]
    fn without_playback_the_silence_is_reported() {
        assert!(matches!(try_jukebox(), Err(AudioError::Unsupported)));

        let (mut jukebox, reason) = open_jukebox(true);
        let reason = reason.unwrap();
        assert!(matches!(reason, AudioError::Unsupported));
        assert!(reason.to_string().contains("--features audio"));
        jukebox.play(core::Cue::Loss).unwrap();
    }
}
