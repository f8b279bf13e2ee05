//! Tetris Console (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetris_console::{core,engine,input,term,audio,types}`
//! and adds the process-level [`config`].

pub mod config;

pub use tetris_console_audio as audio;
pub use tetris_console_core as core;
pub use tetris_console_engine as engine;
pub use tetris_console_input as input;
pub use tetris_console_term as term;
pub use tetris_console_types as types;
