use thiserror::Error;

use crate::audio::Cue;

/// Errors surfaced by the loop controller.
///
/// The engine boundary is total and drawing goes to an in-memory surface, so
/// the only fallible collaborator is audio.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{cue} channel failed: {reason}")]
    Audio { cue: Cue, reason: String },
}

impl Error {
    pub fn audio(cue: Cue, reason: impl Into<String>) -> Self {
        Error::Audio {
            cue,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
