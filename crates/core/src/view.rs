//! Passive view driven by the controller.

use crate::types::GameState;

/// Screen projection used by [`crate::Controller`].
///
/// Implementations hold no game data between calls: every screen is a pure
/// function of the arguments plus fixed geometry.
pub trait View {
    /// Overlay the start prompt. Does not clear.
    fn render_start_screen(&mut self);

    /// Veil the previous frame and overlay the resume prompt.
    fn render_pause_screen(&mut self);

    fn render_end_screen(&mut self, state: &GameState);

    fn render_main_screen(&mut self, state: &GameState);

    fn clear_screen(&mut self);
}
