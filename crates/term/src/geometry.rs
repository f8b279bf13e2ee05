//! Fixed surface layout: playfield on the left two thirds, side panel on the
//! right third.

use thiserror::Error;

use crate::surface::Rect;

/// Inset between the surface edge and the first playfield cell.
pub const BORDER_WIDTH: f32 = 1.0;

/// Gap between the playfield edge and side-panel text.
pub const PANEL_GAP: f32 = 1.0;

/// Vertical distance between stacked end-screen lines.
pub const LINE_PITCH: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("surface {width}x{height} is too small for a playfield with a {border} border")]
    TooSmall { width: f32, height: f32, border: f32 },
}

/// Layout derived once from the surface size and the grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    width: f32,
    height: f32,
    border: f32,
    playfield: Rect,
    block_w: f32,
    block_h: f32,
    panel: Rect,
    line_pitch: f32,
}

impl Geometry {
    pub fn new(width: f32, height: f32, rows: usize, columns: usize) -> Result<Self, GeometryError> {
        if rows == 0 || columns == 0 {
            return Err(GeometryError::EmptyGrid { rows, columns });
        }

        let border = BORDER_WIDTH;
        let playfield_w = width * 2.0 / 3.0;
        let playfield_h = height;
        let inner_w = playfield_w - border * 2.0;
        let inner_h = playfield_h - border * 2.0;
        if inner_w <= 0.0 || inner_h <= 0.0 {
            return Err(GeometryError::TooSmall {
                width,
                height,
                border,
            });
        }

        Ok(Self {
            width,
            height,
            border,
            playfield: Rect::new(0.0, 0.0, playfield_w, playfield_h),
            block_w: inner_w / columns as f32,
            block_h: inner_h / rows as f32,
            panel: Rect::new(playfield_w + PANEL_GAP, 0.0, width / 3.0, height),
            line_pitch: LINE_PITCH,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn border(&self) -> f32 {
        self.border
    }

    /// Outer playfield rectangle, border included.
    pub fn playfield(&self) -> Rect {
        self.playfield
    }

    pub fn block_width(&self) -> f32 {
        self.block_w
    }

    pub fn block_height(&self) -> f32 {
        self.block_h
    }

    /// Rectangle of the block at `(row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> Rect {
        Rect::new(
            self.border + column as f32 * self.block_w,
            self.border + row as f32 * self.block_h,
            self.block_w,
            self.block_h,
        )
    }

    /// Side panel; `x` is where panel text starts.
    pub fn panel(&self) -> Rect {
        self.panel
    }

    /// Background strip behind the side panel, up to the right edge.
    pub fn panel_strip(&self) -> Rect {
        let x = self.playfield.w + self.border / 2.0;
        Rect::new(x, 0.0, self.width - x, self.height)
    }

    pub fn line_pitch(&self) -> f32 {
        self.line_pitch
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}
