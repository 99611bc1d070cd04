//! Piece catalog and the active piece cursor.
//!
//! Each kind carries a list of square 0/1 shape matrices, one per rotation
//! state. Rotation cycles through the list modulo its length, so pieces with
//! rotational symmetry (I, S, Z, O) only carry their distinct states. The
//! catalog is immutable static data referenced by kind plus rotation index.

use arrayvec::ArrayVec;

use crate::core::Board;
use crate::types::{PieceKind, BOARD_WIDTH};

/// One rotation state: a square grid of 0/1 occupancy flags, row-major.
pub type ShapeMatrix = &'static [&'static [u8]];

const I_STATES: [ShapeMatrix; 2] = [
    &[
        &[0, 0, 0, 0],
        &[1, 1, 1, 1],
        &[0, 0, 0, 0],
        &[0, 0, 0, 0],
    ],
    &[
        &[0, 0, 1, 0],
        &[0, 0, 1, 0],
        &[0, 0, 1, 0],
        &[0, 0, 1, 0],
    ],
];

const O_STATES: [ShapeMatrix; 1] = [&[&[1, 1], &[1, 1]]];

const T_STATES: [ShapeMatrix; 4] = [
    &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
    &[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]],
    &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]],
];

const S_STATES: [ShapeMatrix; 2] = [
    &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
    &[&[0, 1, 0], &[0, 1, 1], &[0, 0, 1]],
];

const Z_STATES: [ShapeMatrix; 2] = [
    &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
    &[&[0, 0, 1], &[0, 1, 1], &[0, 1, 0]],
];

const J_STATES: [ShapeMatrix; 4] = [
    &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
    &[&[0, 1, 1], &[0, 1, 0], &[0, 1, 0]],
    &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]],
];

const L_STATES: [ShapeMatrix; 4] = [
    &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
    &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]],
    &[&[0, 0, 0], &[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 0]],
];

/// All rotation states for a piece kind
pub fn rotation_states(kind: PieceKind) -> &'static [ShapeMatrix] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

/// The currently falling piece: kind, rotation index, board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at its spawn position: base rotation, horizontally
    /// centered by matrix width, origin row 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let width = rotation_states(kind)[0].len();
        Self {
            kind,
            rotation: 0,
            x: ((BOARD_WIDTH - width) / 2) as i8,
            y: 0,
        }
    }

    /// Shape matrix for the current rotation state
    pub fn matrix(&self) -> ShapeMatrix {
        let states = rotation_states(self.kind);
        states[self.rotation % states.len()]
    }

    /// Rotation index of the next state (cycles modulo state count)
    pub fn next_rotation(&self) -> usize {
        (self.rotation + 1) % rotation_states(self.kind).len()
    }

    /// Board coordinates of every occupied sub-cell
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        let mut out = ArrayVec::new();
        for (dy, row) in self.matrix().iter().enumerate() {
            for (dx, &filled) in row.iter().enumerate() {
                if filled != 0 {
                    out.push((self.x + dx as i8, self.y + dy as i8));
                }
            }
        }
        out
    }

    /// Check every occupied sub-cell against bounds and settled cells
    pub fn is_valid(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| board.is_open(x, y))
    }
}
