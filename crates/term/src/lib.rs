//! Terminal presentation for the loop controller.
//!
//! [`GameView`] implements the controller's `View` by issuing canvas-style draw
//! calls against any [`Surface`]. [`FrameBuffer`] rasterizes those calls into
//! character cells (2x1 cells per block, half-row fills) and
//! [`TerminalRenderer`] flushes the cells through crossterm. Tests record the
//! calls with [`Recording`] instead.

pub mod color;
pub mod fb;
pub mod game_view;
pub mod geometry;
pub mod renderer;
pub mod surface;

pub use tetris_console_core as core;
pub use tetris_console_types as types;

pub use color::{darker, tile_color, ColorError, Rgb, Rgba, DEFAULT_DARKEN_PERCENT, TILE_COLORS};
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::GameView;
pub use geometry::{Geometry, GeometryError};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
pub use surface::{DrawCall, Font, Rect, Recording, Surface, TextAlign, TextBaseline, TextStyle};
