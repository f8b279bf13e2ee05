//! Reference simulation engine
//!
//! A compact falling-block simulation implementing
//! [`tetris_console_core::Engine`]. The loop controller treats it as an opaque
//! collaborator; any other engine honouring the same trait can replace it.
//!
//! # Rules
//!
//! - 20x10 playfield, seven pieces with tile ids `I=1 J=2 L=3 O=4 S=5 T=6 Z=7`
//! - Clockwise matrix rotation, reverted when it would collide (no wall kicks)
//! - A blocked down-move locks the piece, clears full rows and spawns the next one
//! - Scoring: `40 / 100 / 300 / 1200` for 1-4 lines, times `level + 1`
//! - Level = lines / 10
//! - A freshly spawned piece that collides ends the game; every command is a
//!   no-op afterwards
//!
//! # Example
//!
//! ```
//! use tetris_console_core::Engine;
//! use tetris_console_engine::Game;
//!
//! let mut game = Game::new(12345);
//! game.move_piece_left();
//! game.rotate_piece();
//! game.move_piece_down();
//!
//! let state = game.get_state();
//! assert_eq!(state.playfield.len(), 20);
//! assert!(!state.is_game_over);
//! ```

pub mod game;
pub mod pieces;
pub mod rng;

pub use tetris_console_core as core;
pub use tetris_console_types as types;

pub use game::{line_clear_score, Game, LINES_PER_LEVEL, LINE_SCORES};
pub use pieces::{Piece, PieceKind};
pub use rng::{Bag, SimpleRng};
