//! Drawing surface contract.
//!
//! A canvas-like API in surface pixels (`f32`). Backends decide how pixels map
//! onto their medium; [`crate::FrameBuffer`] maps them onto terminal cells and
//! [`Recording`] keeps the raw calls.

use crate::color::{Rgb, Rgba};

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub size_px: u16,
    pub family: &'static str,
    pub bold: bool,
}

impl Font {
    pub const fn new(size_px: u16, family: &'static str) -> Self {
        Self {
            size_px,
            family,
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Rgb,
    pub font: Font,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// An opaque 2D drawing target.
///
/// The renderer issues draw calls and keeps no pixels of its own; whatever the
/// surface already shows stays visible unless a call overwrites it.
pub trait Surface {
    /// Reset a region to the surface's background.
    fn clear_rect(&mut self, rect: Rect);

    /// Fill a region. Non-opaque colours blend over what is already there.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Outline a region.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32);

    /// Draw a single line of text anchored at `(x, y)` per `style`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear_rect(&mut self, rect: Rect) {
        (**self).clear_rect(rect)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        (**self).fill_rect(rect, color)
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32) {
        (**self).stroke_rect(rect, color, line_width)
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        (**self).fill_text(text, x, y, style)
    }
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rect),
    Fill(Rect, Rgba),
    Stroke(Rect, Rgb, f32),
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
}

/// A surface that only records what was asked of it.
///
/// Useful for headless runs and for asserting exact draw sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    calls: Vec<DrawCall>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Text of every `fill_text` call, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recording {
    fn clear_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32) {
        self.calls.push(DrawCall::Stroke(rect, color, line_width));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }
}
