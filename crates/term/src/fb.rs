//! Framebuffer and style types for terminal rendering.
//!
//! `FrameBuffer` is also a [`Surface`]: one surface pixel is one terminal
//! column wide and one row tall. Fills resolve vertically to half rows using
//! the upper-half block glyph (`fg` = top half, `bg` = bottom half); strokes
//! and text snap to whole cells.

use std::ops::Range;

use crate::color::{Rgb, Rgba};
use crate::surface::{Rect, Surface, TextAlign, TextBaseline, TextStyle};

/// Glyph used for cells whose two halves differ.
pub const UPPER_HALF: char = '▀';

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::BLACK,
            bold: false,
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

impl Cell {
    /// Colours of the top and bottom half as currently displayed.
    ///
    /// Anything other than a half block shows its background on both halves.
    pub fn halves(&self) -> (Rgb, Rgb) {
        if self.ch == UPPER_HALF {
            (self.style.fg, self.style.bg)
        } else {
            (self.style.bg, self.style.bg)
        }
    }

    fn from_halves(top: Rgb, bottom: Rgb) -> Self {
        if top == bottom {
            Self {
                ch: ' ',
                style: CellStyle {
                    fg: top,
                    bg: top,
                    ..CellStyle::default()
                },
            }
        } else {
            Self {
                ch: UPPER_HALF,
                style: CellStyle {
                    fg: top,
                    bg: bottom,
                    ..CellStyle::default()
                },
            }
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// Content is reset; the allocation is kept when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.idx(x, y).map(move |i| &mut self.cells[i])
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// One row of text; characters past the right edge are dropped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).map(|c| c.ch))
            .collect()
    }

    /// Set the glyph and foreground of a cell, keeping what is behind it.
    fn overlay(&mut self, x: u16, y: u16, ch: char, fg: Rgb, bold: bool) {
        if let Some(cell) = self.get_mut(x, y) {
            let (_, bottom) = cell.halves();
            cell.ch = ch;
            cell.style = CellStyle {
                fg,
                bg: bottom,
                bold,
            };
        }
    }
}

/// Cell range covered by `[start, end)` in surface pixels, clamped to `limit`.
fn span(start: f32, end: f32, limit: u16) -> Range<u16> {
    let clamp = |v: f32| v.round().clamp(0.0, limit as f32) as u16;
    clamp(start)..clamp(end)
}

impl Surface for FrameBuffer {
    fn clear_rect(&mut self, rect: Rect) {
        let cols = span(rect.x, rect.right(), self.width);
        let limit = self.height as f32;
        let top = rect.y.floor().clamp(0.0, limit) as u16;
        let bottom = rect.bottom().ceil().clamp(0.0, limit) as u16;
        for y in top..bottom {
            for x in cols.clone() {
                self.set(x, y, Cell::default());
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let cols = span(rect.x, rect.right(), self.width);
        let halves = span(rect.y * 2.0, rect.bottom() * 2.0, self.height.saturating_mul(2));
        if cols.is_empty() || halves.is_empty() {
            return;
        }

        let first_row = halves.start / 2;
        let last_row = (halves.end - 1) / 2;
        for y in first_row..=last_row {
            let top_covered = halves.contains(&(y * 2));
            let bottom_covered = halves.contains(&(y * 2 + 1));
            for x in cols.clone() {
                let Some(cell) = self.get_mut(x, y) else {
                    continue;
                };
                if !color.is_opaque() && top_covered && bottom_covered && cell.ch != UPPER_HALF {
                    // Translucent veil over a whole cell keeps its glyph.
                    cell.style.fg = cell.style.fg.blend(color.rgb, color.a);
                    cell.style.bg = cell.style.bg.blend(color.rgb, color.a);
                    continue;
                }
                let (mut top, mut bottom) = cell.halves();
                if top_covered {
                    top = top.blend(color.rgb, color.a);
                }
                if bottom_covered {
                    bottom = bottom.blend(color.rgb, color.a);
                }
                *cell = Cell::from_halves(top, bottom);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, _line_width: f32) {
        if rect.h < 1.0 || rect.w < 1.0 {
            return;
        }
        let cols = span(rect.x, rect.right(), self.width);
        let rows = span(rect.y, rect.bottom(), self.height);
        if cols.is_empty() || rows.is_empty() {
            return;
        }
        let (left, right) = (cols.start, cols.end - 1);
        let (top, bottom) = (rows.start, rows.end - 1);

        if top == bottom {
            if left == right {
                self.overlay(left, top, '■', color, false);
            } else {
                self.overlay(left, top, '[', color, false);
                self.overlay(right, top, ']', color, false);
            }
            return;
        }

        if left == right {
            for y in top..=bottom {
                self.overlay(left, y, '│', color, false);
            }
            return;
        }

        for x in left + 1..right {
            self.overlay(x, top, '─', color, false);
            self.overlay(x, bottom, '─', color, false);
        }
        for y in top + 1..bottom {
            self.overlay(left, y, '│', color, false);
            self.overlay(right, y, '│', color, false);
        }
        self.overlay(left, top, '┌', color, false);
        self.overlay(right, top, '┐', color, false);
        self.overlay(left, bottom, '└', color, false);
        self.overlay(right, bottom, '┘', color, false);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let len = text.chars().count() as f32;
        let start = match style.align {
            TextAlign::Start => x,
            TextAlign::Center => x - len / 2.0,
            TextAlign::End => x - len,
        }
        .round() as i32;
        let row = match style.baseline {
            TextBaseline::Top | TextBaseline::Middle => y.floor(),
            TextBaseline::Bottom => y.ceil() - 1.0,
        };
        if row < 0.0 || row >= self.height as f32 {
            return;
        }
        let row = row as u16;

        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i32;
            if col < 0 {
                continue;
            }
            if col >= self.width as i32 {
                break;
            }
            self.overlay(col as u16, row, ch, style.color, style.font.bold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Font;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn style(align: TextAlign) -> TextStyle {
        TextStyle {
            color: Rgb::WHITE,
            font: Font::new(14, "mono"),
            align,
            baseline: TextBaseline::Top,
        }
    }

    #[test]
    fn opaque_fill_covers_whole_cells() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.fill_rect(Rect::new(1.0, 0.0, 2.0, 1.0), RED.into());
        assert_eq!(fb.get(0, 0), Some(Cell::default()));
        let cell = fb.get(1, 0).unwrap();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.style.bg, RED);
        assert_eq!(fb.get(2, 0).unwrap().style.bg, RED);
        assert_eq!(fb.get(3, 0), Some(Cell::default()));
        assert_eq!(fb.get(1, 1), Some(Cell::default()));
    }

    #[test]
    fn half_row_fills_use_upper_half_glyph() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.fill_rect(Rect::new(0.0, 0.0, 1.0, 0.5), RED.into());
        let cell = fb.get(0, 0).unwrap();
        assert_eq!(cell.ch, UPPER_HALF);
        assert_eq!(cell.halves(), (RED, Rgb::BLACK));

        fb.fill_rect(Rect::new(0.0, 0.5, 1.0, 0.5), BLUE.into());
        assert_eq!(fb.get(0, 0).unwrap().halves(), (RED, BLUE));

        // Matching halves collapse back to a plain cell.
        fb.fill_rect(Rect::new(0.0, 0.0, 1.0, 0.5), BLUE.into());
        let cell = fb.get(0, 0).unwrap();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.style.bg, BLUE);
    }

    #[test]
    fn translucent_fill_blends_and_keeps_text() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.fill_rect(Rect::new(0.0, 0.0, 3.0, 1.0), Rgb::new(200, 200, 200).into());
        fb.fill_text("A", 1.0, 0.0, &style(TextAlign::Start));
        fb.fill_rect(Rect::new(0.0, 0.0, 3.0, 1.0), Rgba::new(0, 0, 0, 191));

        let plain = fb.get(0, 0).unwrap();
        assert_eq!(plain.style.bg, Rgb::new(50, 50, 50));
        let text = fb.get(1, 0).unwrap();
        assert_eq!(text.ch, 'A');
        assert_eq!(text.style.fg, Rgb::new(64, 64, 64));
        assert_eq!(text.style.bg, Rgb::new(50, 50, 50));
    }

    #[test]
    fn single_row_stroke_draws_brackets_over_fill() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.fill_rect(Rect::new(0.0, 0.0, 2.0, 1.0), RED.into());
        fb.stroke_rect(Rect::new(0.0, 0.0, 2.0, 1.0), BLUE, 1.0);
        assert_eq!(fb.row_text(0), "[]");
        let left = fb.get(0, 0).unwrap();
        assert_eq!(left.style.fg, BLUE);
        assert_eq!(left.style.bg, RED);
    }

    #[test]
    fn tall_stroke_draws_box() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.stroke_rect(Rect::new(0.0, 0.0, 4.0, 3.0), RED, 4.0);
        assert_eq!(fb.row_text(0), "┌──┐");
        assert_eq!(fb.row_text(1), "│  │");
        assert_eq!(fb.row_text(2), "└──┘");
    }

    #[test]
    fn sub_row_stroke_is_skipped() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.stroke_rect(Rect::new(0.0, 0.0, 1.0, 0.5), RED, 1.0);
        assert_eq!(fb.row_text(0), "  ");
    }

    #[test]
    fn text_alignment() {
        let mut fb = FrameBuffer::new(10, 3);
        fb.fill_text("ab", 0.0, 0.0, &style(TextAlign::Start));
        fb.fill_text("abcd", 5.0, 1.0, &style(TextAlign::Center));
        fb.fill_text("xy", 10.0, 2.0, &style(TextAlign::End));
        assert_eq!(fb.row_text(0), "ab        ");
        assert_eq!(fb.row_text(1), "   abcd   ");
        assert_eq!(fb.row_text(2), "        xy");
    }

    #[test]
    fn text_is_clipped_at_edges() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.fill_text("hello", 2.0, 0.0, &style(TextAlign::Center));
        assert_eq!(fb.row_text(0), "ello");
        fb.fill_text("zz", 0.0, 5.0, &style(TextAlign::Start));
        assert_eq!(fb.row_text(0), "ello");
    }

    #[test]
    fn clear_rect_resets_cells() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.fill_rect(Rect::new(0.0, 0.0, 3.0, 2.0), RED.into());
        fb.clear_rect(Rect::new(0.0, 0.0, 3.0, 1.0));
        assert_eq!(fb.get(2, 0), Some(Cell::default()));
        assert_eq!(fb.get(2, 1).unwrap().style.bg, RED);
    }

    #[test]
    fn resize_resets_content() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), RED.into());
        fb.resize(3, 1);
        assert_eq!(fb.cells().len(), 3);
        assert!(fb.cells().iter().all(|c| *c == Cell::default()));
    }
}
