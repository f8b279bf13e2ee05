//! Simulation engine boundary.

use crate::types::GameState;

/// The simulation engine as seen by the loop controller.
///
/// Commands are total: issuing one that does not apply (no falling piece,
/// blocked move, game already over) must be a silent no-op. The controller
/// never checks preconditions itself.
pub trait Engine {
    fn move_piece_down(&mut self);
    fn move_piece_left(&mut self);
    fn move_piece_right(&mut self);
    fn rotate_piece(&mut self);

    /// Take a fresh snapshot of the simulation.
    fn get_state(&self) -> GameState;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn move_piece_down(&mut self) {
        (**self).move_piece_down()
    }

    fn move_piece_left(&mut self) {
        (**self).move_piece_left()
    }

    fn move_piece_right(&mut self) {
        (**self).move_piece_right()
    }

    fn rotate_piece(&mut self) {
        (**self).rotate_piece()
    }

    fn get_state(&self) -> GameState {
        (**self).get_state()
    }
}
