//! Pieces module - block matrices and rotation
//!
//! Each piece is a square matrix of tiles. Rotation turns the whole matrix a
//! quarter clockwise; legality is decided by the caller against the playfield.

use crate::types::{Tile, EMPTY};

/// The seven piece kinds, each tied to a fixed tile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Tile id painted by this piece (`1..=7`).
    pub fn tile(&self) -> Tile {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Spawn-orientation matrix.
    pub fn blocks(&self) -> Vec<Vec<Tile>> {
        let t = self.tile();
        let rows: &[&[u8]] = match self {
            PieceKind::I => &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
            PieceKind::J => &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 1]],
            PieceKind::L => &[&[0, 0, 0], &[1, 1, 1], &[1, 0, 0]],
            PieceKind::O => &[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]],
            PieceKind::S => &[&[0, 0, 0], &[0, 1, 1], &[1, 1, 0]],
            PieceKind::T => &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
            PieceKind::Z => &[&[0, 0, 0], &[1, 1, 0], &[0, 1, 1]],
        };
        rows.iter()
            .map(|row| row.iter().map(|&b| if b == 0 { EMPTY } else { t }).collect())
            .collect()
    }
}

/// A piece placed on the playfield. `(x, y)` is the matrix's top-left cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub blocks: Vec<Vec<Tile>>,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Spawn horizontally centered for a playfield `columns` wide.
    ///
    /// `y` starts at -1: every spawn matrix has an empty top row.
    pub fn spawn(kind: PieceKind, columns: usize) -> Self {
        let blocks = kind.blocks();
        let x = (columns as i32 - blocks.len() as i32) / 2;
        Self {
            kind,
            blocks,
            x,
            y: -1,
        }
    }

    /// Absolute `(x, y)` of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        self.blocks.iter().enumerate().flat_map(move |(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, t)| **t != EMPTY)
                .map(move |(dx, &t)| (self.x + dx as i32, self.y + dy as i32, t))
        })
    }

    /// Rotate the matrix a quarter turn clockwise, in place.
    pub fn rotate_cw(&mut self) {
        self.blocks = rotate_cw(&self.blocks);
    }

    /// Rotate the matrix a quarter turn counter-clockwise, in place.
    pub fn rotate_ccw(&mut self) {
        for _ in 0..3 {
            self.rotate_cw();
        }
    }
}

/// Quarter-turn clockwise rotation of a square matrix.
pub fn rotate_cw(m: &[Vec<Tile>]) -> Vec<Vec<Tile>> {
    let n = m.len();
    (0..n)
        .map(|y| (0..n).map(|x| m[n - 1 - x][y]).collect())
        .collect()
}
