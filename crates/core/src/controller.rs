//! Loop controller: timing, input dispatch, playback lifecycle and audio cues.

use tracing::{debug, info, trace};

use crate::audio::{Cue, Jukebox};
use crate::engine::Engine;
use crate::error::Result;
use crate::timer::{step_interval_ms, IntervalTimer};
use crate::types::{InputEvent, Key, PlaybackMode, LOSS_CUE_LIMIT};
use crate::view::View;

/// Builds a fresh engine for every session.
pub type EngineFactory<E> = Box<dyn FnMut() -> E>;

/// Per-session playback state. `reset()` replaces it wholesale.
#[derive(Debug, Default)]
struct Playback {
    mode: PlaybackMode,
    timer: IntervalTimer,
    soft_drop: bool,
    loss_cue_plays: u32,
}

/// Drives an [`Engine`] on a timer and projects its state onto a [`View`].
///
/// Every command issued to the engine is followed by a refresh: a fresh
/// snapshot is pulled and the screen that matches the playback mode is
/// painted. The timer is armed only while playing; while the soft-drop key is
/// held it is disarmed and key repeats drive the descent instead.
pub struct Controller<E, V> {
    new_engine: EngineFactory<E>,
    engine: E,
    view: V,
    audio: Jukebox,
    playback: Playback,
    generation: u64,
}

impl<E: Engine, V: View> Controller<E, V> {
    /// Build a session and paint the start screen.
    pub fn new(mut new_engine: impl FnMut() -> E + 'static, mut view: V, audio: Jukebox) -> Self {
        let engine = new_engine();
        view.render_start_screen();
        info!(generation = 0, "session created");
        Self {
            new_engine: Box::new(new_engine),
            engine,
            view,
            audio,
            playback: Playback::default(),
            generation: 0,
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.playback.mode
    }

    pub fn timer(&self) -> &IntervalTimer {
        &self.playback.timer
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.playback.soft_drop
    }

    pub fn loss_cue_plays(&self) -> u32 {
        self.playback.loss_cue_plays
    }

    /// Milliseconds until the next timer step, if the timer is armed.
    pub fn time_until_step(&self) -> Option<u32> {
        self.playback.timer.remaining_ms()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Number of resets performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `NotStarted | Paused -> Playing`.
    pub fn start(&mut self) -> Result<()> {
        if self.playback.mode == PlaybackMode::GameOver {
            trace!("start ignored after game over");
            return Ok(());
        }
        self.set_mode(PlaybackMode::Playing);
        self.arm_timer();
        self.audio.play(Cue::Background)?;
        self.refresh()
    }

    /// `Playing -> Paused`.
    pub fn pause(&mut self) -> Result<()> {
        if self.playback.mode != PlaybackMode::Playing {
            trace!(mode = self.playback.mode.as_str(), "pause ignored");
            return Ok(());
        }
        self.set_mode(PlaybackMode::Paused);
        self.disarm_timer();
        self.playback.soft_drop = false;
        self.refresh()?;
        self.audio.pause(Cue::Background)?;
        self.audio.play(Cue::Pause)
    }

    /// Discard the session and start over from the start screen.
    ///
    /// Unconditional: the live timer, soft-drop state and loss-cue counter go
    /// away with the old engine. The session is rebuilt before any channel is
    /// stopped, so a failing channel still leaves a consistent `NotStarted`
    /// session; both channels are always asked to stop and the first error is
    /// returned.
    pub fn reset(&mut self) -> Result<()> {
        self.disarm_timer();
        self.engine = (self.new_engine)();
        self.playback = Playback::default();
        self.generation += 1;
        info!(generation = self.generation, "session reset");

        self.view.clear_screen();
        self.view.render_start_screen();

        let background = self.audio.stop(Cue::Background);
        let loss = self.audio.stop(Cue::Loss);
        background.and(loss)
    }

    /// One timer tick: move the piece down and refresh.
    pub fn step(&mut self) -> Result<()> {
        if self.playback.mode != PlaybackMode::Playing {
            trace!(mode = self.playback.mode.as_str(), "step ignored");
            return Ok(());
        }
        self.engine.move_piece_down();
        self.refresh()
    }

    /// Advance the host clock and run every step that came due.
    pub fn advance(&mut self, elapsed_ms: u32) -> Result<()> {
        let fires = self.playback.timer.advance(elapsed_ms);
        for _ in 0..fires {
            if !self.playback.timer.is_armed() {
                break;
            }
            self.step()?;
        }
        Ok(())
    }

    pub fn dispatch(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
        }
    }

    pub fn key_down(&mut self, key: Key) -> Result<()> {
        let playing = self.playback.mode == PlaybackMode::Playing;
        match key {
            Key::Enter | Key::Escape => match self.playback.mode {
                PlaybackMode::GameOver => self.reset(),
                PlaybackMode::Playing => self.pause(),
                PlaybackMode::NotStarted | PlaybackMode::Paused => self.start(),
            },
            Key::ArrowLeft if playing => {
                self.engine.move_piece_left();
                self.refresh()
            }
            Key::ArrowRight if playing => {
                self.engine.move_piece_right();
                self.refresh()
            }
            Key::ArrowUp if playing => {
                self.engine.rotate_piece();
                self.refresh()
            }
            Key::ArrowDown if playing => {
                self.disarm_timer();
                self.playback.soft_drop = true;
                self.engine.move_piece_down();
                self.refresh()
            }
            _ => Ok(()),
        }
    }

    pub fn key_up(&mut self, key: Key) -> Result<()> {
        if key == Key::ArrowDown {
            self.playback.soft_drop = false;
            if self.playback.mode == PlaybackMode::Playing {
                self.arm_timer();
            }
        }
        Ok(())
    }

    /// Pull a fresh snapshot and paint the screen for the current mode.
    pub fn refresh(&mut self) -> Result<()> {
        let state = self.engine.get_state();

        if state.is_game_over {
            if self.playback.mode != PlaybackMode::GameOver {
                info!(score = state.score, lines = state.lines, level = state.level, "game over");
                self.set_mode(PlaybackMode::GameOver);
            }
            self.disarm_timer();
            self.playback.soft_drop = false;

            self.view.render_end_screen(&state);
            self.audio.pause(Cue::Background)?;
            if self.playback.loss_cue_plays < LOSS_CUE_LIMIT {
                self.audio.play(Cue::Loss)?;
                self.playback.loss_cue_plays += 1;
            } else {
                self.audio.pause(Cue::Loss)?;
            }
        } else if self.playback.mode != PlaybackMode::Playing {
            self.view.render_pause_screen();
        } else {
            self.view.render_main_screen(&state);
        }
        Ok(())
    }

    fn set_mode(&mut self, mode: PlaybackMode) {
        if self.playback.mode != mode {
            debug!(from = self.playback.mode.as_str(), to = mode.as_str(), "mode");
            self.playback.mode = mode;
        }
    }

    // Interval is computed from the level at arm time only; a level-up while
    // armed keeps the running interval until the next re-arm.
    fn arm_timer(&mut self) {
        let level = self.engine.get_state().level;
        let interval_ms = step_interval_ms(level);
        if self.playback.timer.arm(interval_ms) {
            debug!(level, interval_ms, "timer armed");
        }
    }

    fn disarm_timer(&mut self) {
        if self.playback.timer.disarm() {
            debug!("timer disarmed");
        }
    }
}
