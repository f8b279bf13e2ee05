//! GameView: projects a `GameState` onto a [`Surface`].
//!
//! Pure with respect to game data: every screen is a function of its arguments
//! plus the fixed [`Geometry`]. Pixels live on the surface.

use crate::color::{tile_color, Rgb, Rgba, DEFAULT_DARKEN_PERCENT};
use crate::core::View;
use crate::geometry::Geometry;
use crate::surface::{Font, Rect, Surface, TextAlign, TextBaseline, TextStyle};
use crate::types::{GameState, Tile, EMPTY};

pub const FONT_FAMILY: &str = "Press Start 2P";
pub const TITLE_FONT: Font = Font::new(18, FONT_FAMILY);
pub const PANEL_FONT: Font = Font::new(14, FONT_FAMILY);

pub const START_PROMPT: &str = "Press ENTER to Start";
pub const RESUME_PROMPT: &str = "Press ENTER to Resume";
pub const RESTART_PROMPT: &str = "Press ENTER to Restart";
pub const GAME_OVER: &str = "GAME OVER";

/// Pause veil: black at 0.75 alpha.
pub const VEIL: Rgba = Rgba::new(0, 0, 0, 191);
pub const PLAYFIELD_OUTLINE: Rgb = Rgb::new(71, 75, 79);
pub const PANEL_STRIP: Rgb = Rgb::new(112, 122, 128);
pub const BLOCK_OUTLINE_WIDTH: f32 = 1.0;

// Side-panel offsets below the border inset, in surface pixels.
const SCORE_Y: f32 = 0.0;
const LINES_Y: f32 = 3.0;
const LEVEL_Y: f32 = 6.0;
const NEXT_Y: f32 = 9.0;
const PREVIEW_Y: f32 = 10.0;

/// Renderer for the four game screens.
#[derive(Debug)]
pub struct GameView<S> {
    surface: S,
    geometry: Geometry,
}

impl<S: Surface> GameView<S> {
    pub fn new(surface: S, geometry: Geometry) -> Self {
        Self { surface, geometry }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn centered(&mut self, text: &str, dy: f32, font: Font) {
        let (cx, cy) = self.geometry.center();
        let style = TextStyle {
            color: Rgb::WHITE,
            font,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        };
        self.surface.fill_text(text, cx, cy + dy, &style);
    }

    fn render_block(&mut self, rect: Rect, tile: Tile) {
        let Some(color) = tile_color(tile) else {
            return;
        };
        self.surface.fill_rect(rect, color.into());
        self.surface.stroke_rect(
            rect,
            color.darker(DEFAULT_DARKEN_PERCENT),
            BLOCK_OUTLINE_WIDTH,
        );
    }

    fn render_playfield(&mut self, state: &GameState) {
        for (row, cells) in state.playfield.iter().enumerate() {
            for (column, &tile) in cells.iter().enumerate() {
                if tile != EMPTY {
                    let rect = self.geometry.cell(row, column);
                    self.render_block(rect, tile);
                }
            }
        }

        let g = self.geometry;
        self.surface
            .stroke_rect(g.playfield(), PLAYFIELD_OUTLINE, g.border());
        self.surface.fill_rect(g.panel_strip(), PANEL_STRIP.into());
    }

    fn render_panel(&mut self, state: &GameState) {
        let g = self.geometry;
        let x = g.panel().x;
        let top = g.panel().y + g.border();
        let style = TextStyle {
            color: Rgb::WHITE,
            font: PANEL_FONT,
            align: TextAlign::Start,
            baseline: TextBaseline::Top,
        };

        let rows = [
            ("Score", state.score, SCORE_Y),
            ("Lines", state.lines, LINES_Y),
            ("Level", state.level, LEVEL_Y),
        ];
        for (name, n, dy) in rows {
            self.surface
                .fill_text(&format!("{name}: {n}"), x, top + dy, &style);
        }
        self.surface.fill_text("Next:", x, top + NEXT_Y, &style);

        let w = g.block_width() * 0.5;
        let h = g.block_height() * 0.5;
        for (row, cells) in state.next_piece.iter().enumerate() {
            for (column, &tile) in cells.iter().enumerate() {
                if tile != EMPTY {
                    let rect = Rect::new(
                        x + column as f32 * w,
                        top + PREVIEW_Y + row as f32 * h,
                        w,
                        h,
                    );
                    self.render_block(rect, tile);
                }
            }
        }
    }
}

impl<S: Surface> View for GameView<S> {
    fn render_start_screen(&mut self) {
        self.centered(START_PROMPT, 0.0, TITLE_FONT);
    }

    fn render_pause_screen(&mut self) {
        self.surface.fill_rect(self.geometry.bounds(), VEIL);
        self.centered(RESUME_PROMPT, 0.0, TITLE_FONT);
    }

    fn render_end_screen(&mut self, state: &GameState) {
        self.clear_screen();
        let pitch = self.geometry.line_pitch();
        self.centered(GAME_OVER, -pitch, TITLE_FONT.bold());
        self.centered(&format!("Score: {}", state.score), 0.0, TITLE_FONT);
        self.centered(RESTART_PROMPT, pitch, TITLE_FONT);
    }

    fn render_main_screen(&mut self, state: &GameState) {
        self.clear_screen();
        self.render_playfield(state);
        self.render_panel(state);
    }

    fn clear_screen(&mut self) {
        self.surface.clear_rect(self.geometry.bounds());
    }
}
