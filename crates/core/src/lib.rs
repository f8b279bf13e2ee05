//! Loop controller - timing, input and playback lifecycle
//!
//! This crate owns the real-time control layer of the game. It knows nothing
//! about game rules and nothing about pixels:
//!
//! - The simulation sits behind the [`Engine`] trait (commands plus a snapshot).
//! - Drawing sits behind the [`View`] trait (four screens plus clear).
//! - Sound sits behind [`AudioChannel`]s grouped in a [`Jukebox`].
//!
//! # Module Structure
//!
//! - [`controller`]: the [`Controller`] state machine
//! - [`timer`]: guarded interval timer and the level → interval policy
//! - [`audio`]: cue channels
//! - [`engine`], [`view`]: collaborator traits
//!
//! # Example
//!
//! ```
//! use tetris_console_core::{Controller, Engine, Jukebox, View};
//! use tetris_console_core::types::{GameState, Key, PlaybackMode};
//!
//! #[derive(Default)]
//! struct Idle;
//!
//! impl Engine for Idle {
//!     fn move_piece_down(&mut self) {}
//!     fn move_piece_left(&mut self) {}
//!     fn move_piece_right(&mut self) {}
//!     fn rotate_piece(&mut self) {}
//!     fn get_state(&self) -> GameState {
//!         GameState::empty(20, 10)
//!     }
//! }
//!
//! struct Blind;
//!
//! impl View for Blind {
//!     fn render_start_screen(&mut self) {}
//!     fn render_pause_screen(&mut self) {}
//!     fn render_end_screen(&mut self, _: &GameState) {}
//!     fn render_main_screen(&mut self, _: &GameState) {}
//!     fn clear_screen(&mut self) {}
//! }
//!
//! let mut c = Controller::new(Idle::default, Blind, Jukebox::silent());
//! c.key_down(Key::Enter).unwrap();
//! assert_eq!(c.mode(), PlaybackMode::Playing);
//! assert_eq!(c.time_until_step(), Some(900));
//! ```

pub mod audio;
pub mod controller;
pub mod engine;
pub mod error;
pub mod timer;
pub mod view;

pub use tetris_console_types as types;

pub use audio::{AudioChannel, Cue, CueConfig, Jukebox, SilentChannel};
pub use controller::{Controller, EngineFactory};
pub use engine::Engine;
pub use error::{Error, Result};
pub use timer::{step_interval_ms, IntervalTimer};
pub use view::View;
