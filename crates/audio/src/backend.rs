//! rodio output for the three cue channels.

use std::rc::Rc;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::debug;

use crate::core::{AudioChannel, Cue, Error, Jukebox, Result};
use crate::synth::{loss_alarm, pause_chime, BackgroundLoop, SAMPLE_RATE};
use crate::AudioError;

/// Keeps the device stream alive for as long as any channel exists.
struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Output {
    fn sink(&self, cue: Cue) -> std::result::Result<Sink, AudioError> {
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(cue.config().volume);
        Ok(sink)
    }
}

/// Open the default output device and build a jukebox on it.
pub fn try_jukebox() -> std::result::Result<Jukebox, AudioError> {
    let (stream, handle) = OutputStream::try_default()?;
    let output = Rc::new(Output {
        _stream: stream,
        handle,
    });
    debug!("audio output opened");

    Ok(Jukebox::new(
        Box::new(LoopChannel::new(Rc::clone(&output))?),
        Box::new(OneShotChannel::new(
            Rc::clone(&output),
            Cue::Pause,
            pause_chime(SAMPLE_RATE),
        )),
        Box::new(OneShotChannel::new(output, Cue::Loss, loss_alarm(SAMPLE_RATE))),
    ))
}

fn channel_error(cue: Cue, err: AudioError) -> Error {
    Error::audio(cue, err.to_string())
}

/// The background tune, parked in a paused sink until played.
struct LoopChannel {
    output: Rc<Output>,
    sink: Sink,
}

impl LoopChannel {
    fn new(output: Rc<Output>) -> std::result::Result<Self, AudioError> {
        let sink = Self::fresh_sink(&output)?;
        Ok(Self { output, sink })
    }

    fn fresh_sink(output: &Output) -> std::result::Result<Sink, AudioError> {
        let sink = output.sink(Cue::Background)?;
        sink.pause();
        sink.append(BackgroundLoop::new(SAMPLE_RATE));
        Ok(sink)
    }
}

impl AudioChannel for LoopChannel {
    fn play(&mut self) -> Result<()> {
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.sink.pause();
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.sink.stop();
        self.sink =
            Self::fresh_sink(&self.output).map_err(|e| channel_error(Cue::Background, e))?;
        Ok(())
    }
}

/// A synthesized one-shot. `play` resumes a paused cue or starts it over.
struct OneShotChannel {
    output: Rc<Output>,
    cue: Cue,
    samples: Vec<f32>,
    current: Option<Sink>,
}

impl OneShotChannel {
    fn new(output: Rc<Output>, cue: Cue, samples: Vec<f32>) -> Self {
        Self {
            output,
            cue,
            samples,
            current: None,
        }
    }
}

impl AudioChannel for OneShotChannel {
    fn play(&mut self) -> Result<()> {
        if let Some(sink) = self.current.as_ref() {
            if sink.is_paused() && !sink.empty() {
                sink.play();
                return Ok(());
            }
        }
        let sink = self
            .output
            .sink(self.cue)
            .map_err(|e| channel_error(self.cue, e))?;
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, self.samples.clone()));
        self.current = Some(sink);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if let Some(sink) = self.current.as_ref() {
            sink.pause();
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(sink) = self.current.take() {
            sink.stop();
        }
        Ok(())
    }
}
