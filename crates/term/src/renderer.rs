//! Flushes a [`FrameBuffer`] to a terminal.
//!
//! The last flushed frame is kept; each draw writes only the runs of cells that
//! differ from it, and only the style attributes that changed between cells.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use tracing::{debug, trace};

use crate::color::Rgb;
use crate::fb::{CellStyle, FrameBuffer};

/// A horizontal span of changed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Spans where `next` differs from `prev`, row by row, left to right.
///
/// Frames of different sizes differ everywhere.
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| Run { x: 0, y, len: w }).collect();
    }

    let mut runs = Vec::new();
    for y in 0..h {
        let mut start = None;
        for x in 0..=w {
            let differs = x < w && prev.get(x, y) != next.get(x, y);
            match (differs, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push(Run { x: s, y, len: x - s });
                    start = None;
                }
                _ => {}
            }
        }
    }
    runs
}

/// Tracks the terminal's current style so only changes are emitted.
#[derive(Debug, Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
        let prev = match self.style {
            Some(prev) if prev == style => return Ok(()),
            Some(prev) if prev.bold == style.bold => Some(prev),
            _ => None,
        };
        match prev {
            Some(prev) => {
                if prev.fg != style.fg {
                    out.queue(SetForegroundColor(to_color(style.fg)))?;
                }
                if prev.bg != style.bg {
                    out.queue(SetBackgroundColor(to_color(style.bg)))?;
                }
            }
            None => {
                out.queue(SetAttribute(Attribute::Reset))?;
                out.queue(SetForegroundColor(to_color(style.fg)))?;
                out.queue(SetBackgroundColor(to_color(style.bg)))?;
                if style.bold {
                    out.queue(SetAttribute(Attribute::Bold))?;
                }
            }
        }
        self.style = Some(style);
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn encode_runs(fb: &FrameBuffer, runs: &[Run], out: &mut Vec<u8>) -> io::Result<()> {
    let mut pen = Pen::default();
    for run in runs {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let cell = fb.get(x, run.y).unwrap_or_default();
            pen.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a clear-and-repaint of the whole frame into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let rows: Vec<Run> = (0..fb.height())
        .map(|y| Run {
            x: 0,
            y,
            len: fb.width(),
        })
        .collect();
    encode_runs(fb, &rows, out)?;
    Ok(())
}

/// Encode only the cells of `next` that differ from `prev` into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    encode_runs(next, &changed_runs(prev, next), out)?;
    Ok(())
}

/// Owns the terminal session: raw mode, alternate screen, key release
/// reporting and the last flushed frame.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    keyboard_enhanced: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Raw mode, alternate screen, hidden cursor. Asks for key release events
    /// when the terminal supports the enhanced keyboard protocol.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        if self.keyboard_enhanced {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()?;
        debug!(keyboard_enhanced = self.keyboard_enhanced, "terminal entered");
        Ok(())
    }

    /// Undo [`enter`](Self::enter).
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        if self.keyboard_enhanced {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        debug!("terminal restored");
        Ok(())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
            keyboard_enhanced: false,
        }
    }

    /// Whether the terminal reports key release events.
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Forget the last frame so the next draw repaints everything (resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Flush `fb`. Returns the number of cells written.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<usize> {
        self.buf.clear();
        let written = match self.last.as_mut() {
            Some(prev) => {
                let runs = changed_runs(prev, fb);
                if runs.is_empty() {
                    return Ok(0);
                }
                encode_runs(fb, &runs, &mut self.buf)?;
                prev.clone_from(fb);
                runs.iter().map(|r| r.len as usize).sum()
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                self.last = Some(fb.clone());
                fb.width() as usize * fb.height() as usize
            }
        };
        self.flush()?;
        trace!(written, bytes = self.buf.len(), "frame flushed");
        Ok(written)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::surface::{Font, Rect, Surface, TextAlign, TextBaseline, TextStyle};

    const RED: Rgba = Rgba::new(255, 0, 0, 255);

    #[test]
    fn adjacent_changes_form_one_run() {
        let a = FrameBuffer::new(5, 1);
        let mut b = a.clone();
        b.fill_rect(Rect::new(1.0, 0.0, 3.0, 1.0), RED);
        assert_eq!(changed_runs(&a, &b), vec![Run { x: 1, y: 0, len: 3 }]);
    }

    #[test]
    fn runs_touching_the_right_edge_are_closed() {
        let a = FrameBuffer::new(4, 2);
        let mut b = a.clone();
        b.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), RED);
        b.fill_rect(Rect::new(3.0, 0.0, 1.0, 2.0), RED);
        assert_eq!(
            changed_runs(&a, &b),
            vec![
                Run { x: 0, y: 0, len: 1 },
                Run { x: 3, y: 0, len: 1 },
                Run { x: 3, y: 1, len: 1 },
            ]
        );
    }

    #[test]
    fn size_change_repaints_every_row() {
        let a = FrameBuffer::new(2, 2);
        let b = FrameBuffer::new(3, 1);
        assert_eq!(changed_runs(&a, &b), vec![Run { x: 0, y: 0, len: 3 }]);
    }

    #[test]
    fn redraw_of_identical_frame_writes_nothing() {
        let mut fb = FrameBuffer::new(6, 3);
        fb.stroke_rect(Rect::new(0.0, 0.0, 6.0, 3.0), Rgb::WHITE, 1.0);
        let mut r = TerminalRenderer::with_writer(Vec::new());

        assert_eq!(r.draw(&fb).unwrap(), 18);
        let flushed = r.out.len();
        assert_eq!(r.draw(&fb).unwrap(), 0);
        assert_eq!(r.out.len(), flushed);

        r.invalidate();
        assert_eq!(r.draw(&fb).unwrap(), 18);
    }

    #[test]
    fn diff_draw_writes_changed_cells_only() {
        let mut fb = FrameBuffer::new(4, 1);
        let mut r = TerminalRenderer::with_writer(Vec::new());
        r.draw(&fb).unwrap();

        let style = TextStyle {
            color: Rgb::WHITE,
            font: Font::new(14, "mono"),
            align: TextAlign::Start,
            baseline: TextBaseline::Top,
        };
        fb.fill_text("ab", 1.0, 0.0, &style);
        assert_eq!(r.draw(&fb).unwrap(), 2);
        let text = String::from_utf8_lossy(&r.out);
        assert!(text.contains("ab"));
    }

    #[test]
    fn pen_only_emits_changed_colours() {
        let base = CellStyle::default();
        let mut pen = Pen::default();
        let mut out = Vec::new();
        pen.apply(&mut out, base).unwrap();
        assert!(!out.is_empty());

        out.clear();
        pen.apply(&mut out, base).unwrap();
        assert!(out.is_empty());

        let mut only_fg = Vec::new();
        only_fg
            .queue(SetForegroundColor(to_color(Rgb::WHITE)))
            .unwrap();
        pen.apply(
            &mut out,
            CellStyle {
                fg: Rgb::WHITE,
                ..base
            },
        )
        .unwrap();
        assert_eq!(out, only_fg);
    }

    #[test]
    fn pen_resets_attributes_when_weight_changes() {
        let base = CellStyle::default();
        let bold = CellStyle { bold: true, ..base };
        let mut pen = Pen::default();
        let mut out = Vec::new();
        pen.apply(&mut out, bold).unwrap();

        out.clear();
        pen.apply(&mut out, base).unwrap();
        let mut expected = Vec::new();
        expected.queue(SetAttribute(Attribute::Reset)).unwrap();
        assert!(out.starts_with(&expected));
        assert!(!String::from_utf8_lossy(&out).contains("\x1b[1m"));
    }

    #[test]
    fn full_frame_prints_stroke_glyphs() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.stroke_rect(Rect::new(0.0, 0.0, 3.0, 1.0), Rgb::WHITE, 1.0);
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('['));
        assert!(text.contains(']'));
    }
}
