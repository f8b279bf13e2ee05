//! Terminal input module.
//!
//! Independent of any UI framework. It maps `crossterm` key events onto the
//! controller's [`InputEvent`] vocabulary and emulates key releases on
//! terminals that never report them.

pub mod handler;
pub mod map;

pub use tetris_console_types as types;

pub use handler::{ReleaseTracker, DEFAULT_RELEASE_TIMEOUT_MS, MAX_HELD_KEYS};
pub use map::{key_from_code, should_quit, translate};

pub use types::{InputEvent, Key};
