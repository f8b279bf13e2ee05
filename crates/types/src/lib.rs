//! Core types module - shared data structures and constants
//!
//! This module defines the plain data exchanged between the simulation engine,
//! the loop controller and the renderer. Nothing here performs I/O.
//!
//! # Playfield Dimensions
//!
//! - **Rows**: 20
//! - **Columns**: 10
//!
//! Cells are [`Tile`] ids: `0` is empty, `1..=7` identify the piece colour.
//!
//! # Step Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STARTING_SPEED_MS` | 900 | Step interval at level 0 |
//! | `SPEED_BOOST_PER_LEVEL_MS` | 100 | Interval reduction per level |
//! | `MIN_SPEED_MS` | 100 | Interval floor |
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 900ms |
//! | 1 | 800ms |
//! | 4 | 500ms |
//! | 8+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use tetris_console_types::{InputEvent, Key, PlaybackMode};
//!
//! assert_eq!(Key::from_name("ArrowDown"), Some(Key::ArrowDown));
//! assert_eq!(Key::from_name("Space"), None);
//! assert_eq!(Key::Escape.as_str(), "Escape");
//!
//! let ev = InputEvent::KeyDown(Key::Enter);
//! assert_eq!(ev.key(), Key::Enter);
//!
//! assert_eq!(PlaybackMode::default(), PlaybackMode::NotStarted);
//! ```

/// Playfield height in rows.
pub const PLAYFIELD_ROWS: usize = 20;

/// Playfield width in columns.
pub const PLAYFIELD_COLUMNS: usize = 10;

/// Step interval at level 0.
pub const STARTING_SPEED_MS: u32 = 900;

/// Step interval reduction per level.
pub const SPEED_BOOST_PER_LEVEL_MS: u32 = 100;

/// Step interval floor.
pub const MIN_SPEED_MS: u32 = 100;

/// Maximum number of times the loss cue plays per session.
pub const LOSS_CUE_LIMIT: u32 = 2;

/// A playfield cell. `0` is empty; `1..=7` is a tile id.
pub type Tile = u8;

/// Empty cell marker.
pub const EMPTY: Tile = 0;

/// Immutable snapshot of the simulation.
///
/// Produced by the engine on every `get_state()` call. Consumers only read it;
/// to observe a change they request a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    /// Rows of cells, top to bottom. Rows are not required to share a length.
    pub playfield: Vec<Vec<Tile>>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    /// Shape of the upcoming piece, same cell encoding as `playfield`.
    pub next_piece: Vec<Vec<Tile>>,
    pub is_game_over: bool,
}

impl GameState {
    /// An empty `rows x columns` snapshot at level 0.
    pub fn empty(rows: usize, columns: usize) -> Self {
        Self {
            playfield: vec![vec![EMPTY; columns]; rows],
            ..Self::default()
        }
    }

    /// Number of occupied playfield cells.
    pub fn filled_cells(&self) -> usize {
        self.playfield
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t != EMPTY)
            .count()
    }
}

/// Loop controller state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackMode {
    #[default]
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

impl PlaybackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackMode::NotStarted => "notStarted",
            PlaybackMode::Playing => "playing",
            PlaybackMode::Paused => "paused",
            PlaybackMode::GameOver => "gameOver",
        }
    }
}

/// The fixed key vocabulary understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
}

impl Key {
    /// All keys, in declaration order.
    pub const ALL: [Key; 6] = [
        Key::Enter,
        Key::Escape,
        Key::ArrowLeft,
        Key::ArrowUp,
        Key::ArrowRight,
        Key::ArrowDown,
    ];

    /// Parse a key identifier (exact, case-sensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_console_types::Key;
    ///
    /// assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
    /// assert_eq!(Key::from_name("enter"), None);
    /// ```
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowDown" => Some(Key::ArrowDown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Enter => "Enter",
            Key::Escape => "Escape",
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowUp => "ArrowUp",
            Key::ArrowRight => "ArrowRight",
            Key::ArrowDown => "ArrowDown",
        }
    }
}

/// A key event on one of the two input channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

impl InputEvent {
    pub fn key(&self) -> Key {
        match self {
            InputEvent::KeyDown(k) | InputEvent::KeyUp(k) => *k,
        }
    }
}
