//! Core types and configuration constants shared across the crate.
//! This module contains pure data types with no external dependencies.

/// Board dimensions (cells)
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// Lines required to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity timing (milliseconds)
pub const BASE_DROP_MS: u64 = 1000;
pub const DROP_STEP_MS: u64 = 100;
pub const MIN_DROP_MS: u64 = 100;

/// Points per simultaneously cleared line count (index = lines cleared).
/// Counts beyond the table award nothing.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell for manual drops
pub const SOFT_DROP_POINTS: u32 = 1;
pub const HARD_DROP_POINTS: u32 = 2;

/// Horizontal offsets tried, in order, when a rotation fails in place
pub const ROTATION_KICKS: [i8; 5] = [0, -1, 1, -2, 2];

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order (one bag's worth).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Cell value written to the board and exported in snapshots (1-7).
    /// 0 is reserved for empty cells.
    pub fn cell_value(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// Cell on the board (None = empty, Some = settled piece kind)
pub type Cell = Option<PieceKind>;

/// Player inputs accepted while a game is running.
///
/// `start` and `stop` are separate session operations since they carry
/// lifecycle semantics rather than piece mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    TogglePause,
}
