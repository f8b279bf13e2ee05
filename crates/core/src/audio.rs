//! Audio cue channels.
//!
//! Three independent channels: the looping background track, the pause chime
//! and the loss alarm. Each backend configures volume and looping once at
//! construction from [`Cue::config`]; afterwards the controller only plays and
//! pauses them.

use std::fmt;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Background,
    Pause,
    Loss,
}

/// Per-channel playback settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueConfig {
    pub volume: f32,
    pub looping: bool,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::Background, Cue::Pause, Cue::Loss];

    pub const fn config(self) -> CueConfig {
        match self {
            Cue::Background => CueConfig {
                volume: 0.6,
                looping: true,
            },
            Cue::Pause => CueConfig {
                volume: 0.4,
                looping: false,
            },
            Cue::Loss => CueConfig {
                volume: 0.6,
                looping: false,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Background => "background",
            Cue::Pause => "pause",
            Cue::Loss => "loss",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One playback channel. Calls are fire-and-forget; nothing waits for playback
/// to finish.
pub trait AudioChannel {
    /// Start or resume playback.
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Pause and rewind, so the next `play` starts from the beginning.
    fn stop(&mut self) -> Result<()> {
        self.pause()
    }
}

/// A channel that does nothing. Used when audio is disabled or unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentChannel;

impl AudioChannel for SilentChannel {
    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }
}

/// The three cue channels of a session.
pub struct Jukebox {
    background: Box<dyn AudioChannel>,
    pause: Box<dyn AudioChannel>,
    loss: Box<dyn AudioChannel>,
}

impl Jukebox {
    pub fn new(
        background: Box<dyn AudioChannel>,
        pause: Box<dyn AudioChannel>,
        loss: Box<dyn AudioChannel>,
    ) -> Self {
        Self {
            background,
            pause,
            loss,
        }
    }

    pub fn silent() -> Self {
        Self::new(
            Box::new(SilentChannel),
            Box::new(SilentChannel),
            Box::new(SilentChannel),
        )
    }

    pub fn channel_mut(&mut self, cue: Cue) -> &mut dyn AudioChannel {
        match cue {
            Cue::Background => self.background.as_mut(),
            Cue::Pause => self.pause.as_mut(),
            Cue::Loss => self.loss.as_mut(),
        }
    }

    pub fn play(&mut self, cue: Cue) -> Result<()> {
        tracing::trace!(%cue, "play");
        self.channel_mut(cue).play()
    }

    pub fn pause(&mut self, cue: Cue) -> Result<()> {
        tracing::trace!(%cue, "pause");
        self.channel_mut(cue).pause()
    }

    pub fn stop(&mut self, cue: Cue) -> Result<()> {
        tracing::trace!(%cue, "stop");
        self.channel_mut(cue).stop()
    }
}

impl Default for Jukebox {
    fn default() -> Self {
        Self::silent()
    }
}

impl fmt::Debug for Jukebox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jukebox").finish_non_exhaustive()
    }
}
