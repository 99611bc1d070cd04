//! The settled-cell grid.
//!
//! A 10x20 grid where each cell is empty or holds a settled piece kind,
//! stored as one flat array. Coordinates are (x, y) with x in 0..10 left
//! to right and y in 0..20 top to bottom; dimensions never change after
//! construction.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Row-major cells (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Flat index for in-bounds (x, y), None otherwise
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * BOARD_WIDTH + (x as usize))
    }

    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Write a cell; out-of-bounds writes return false and do nothing
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece sub-cell may occupy (x, y).
    ///
    /// Columns must be in range and the row must be above the floor, but
    /// negative rows count as open: a freshly spawned piece may extend above
    /// the visible top of the board without colliding.
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        self.cells[(y as usize) * BOARD_WIDTH + (x as usize)].is_none()
    }

    /// Write a settled piece kind into every listed board cell.
    ///
    /// Cells outside the grid are silently dropped; with validity checked
    /// beforehand the only out-of-bounds cells are above the visible top.
    pub fn merge(&mut self, cells: &[(i8, i8)], kind: PieceKind) {
        for &(x, y) in cells {
            self.set(x, y, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        let start = y * BOARD_WIDTH;
        self.cells[start..start + BOARD_WIDTH]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove row `y`, shifting all rows above it down by one and inserting
    /// an empty row at the top.
    fn remove_row(&mut self, y: usize) {
        for row in (1..=y).rev() {
            let src_start = (row - 1) * BOARD_WIDTH;
            let dst_start = row * BOARD_WIDTH;
            self.cells
                .copy_within(src_start..src_start + BOARD_WIDTH, dst_start);
        }
        for cell in &mut self.cells[0..BOARD_WIDTH] {
            *cell = None;
        }
    }

    /// Clear every full row and return how many were removed.
    ///
    /// Scans bottom to top. After removing a row the same index is re-tested
    /// before moving up, because the removal shifts a new row into that slot
    /// and it may itself be full.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT - 1;
        loop {
            if self.is_row_full(y) {
                self.remove_row(y);
                cleared += 1;
                continue;
            }
            if y == 0 {
                break;
            }
            y -= 1;
        }
        cleared
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Copy the settled cells into a u8 grid (0 = empty, 1-7 = piece kind)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH]; BOARD_HEIGHT]) {
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                out[y][x] = match self.cells[y * BOARD_WIDTH + x] {
                    Some(kind) => kind.cell_value(),
                    None => 0,
                };
            }
        }
    }

    /// Fill an entire row (test setup helper)
    #[cfg(test)]
    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        let start = y * BOARD_WIDTH;
        for cell in &mut self.cells[start..start + BOARD_WIDTH] {
            *cell = Some(kind);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_is_open_bounds() {
        let board = Board::new();
        assert!(board.is_open(0, 0));
        assert!(board.is_open(9, 19));
        assert!(!board.is_open(-1, 5));
        assert!(!board.is_open(10, 5));
        assert!(!board.is_open(5, 20));
    }

    #[test]
    fn test_rows_above_the_top_are_open() {
        let mut board = Board::new();
        board.set(4, 0, Some(PieceKind::T));
        // Negative rows never collide, even directly above a settled cell.
        assert!(board.is_open(4, -1));
        assert!(board.is_open(4, -3));
        assert!(!board.is_open(4, 0));
    }

    #[test]
    fn test_merge_drops_out_of_bounds_cells() {
        let mut board = Board::new();
        board.merge(&[(4, -1), (4, 0), (4, 1)], PieceKind::J);
        assert_eq!(board.get(4, 0), Some(Some(PieceKind::J)));
        assert_eq!(board.get(4, 1), Some(Some(PieceKind::J)));
        // The fragment above the top vanished without affecting anything.
        let occupied = (0..BOARD_HEIGHT as i8)
            .flat_map(|y| (0..BOARD_WIDTH as i8).map(move |x| (x, y)))
            .filter(|&(x, y)| board.get(x, y) == Some(Some(PieceKind::J)))
            .count();
        assert_eq!(occupied, 2);
    }

    #[test]
    fn test_clear_single_full_row() {
        let mut board = Board::new();
        board.fill_row(19, PieceKind::I);
        board.set(3, 18, Some(PieceKind::O));

        assert_eq!(board.clear_full_rows(), 1);
        // The partial row above shifted down into the cleared slot.
        assert_eq!(board.get(3, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.get(3, 18), Some(None));
    }

    #[test]
    fn test_clear_two_adjacent_full_rows() {
        let mut board = Board::new();
        board.fill_row(18, PieceKind::S);
        board.fill_row(19, PieceKind::Z);
        board.set(0, 17, Some(PieceKind::L));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::L)));
        for y in 0..19 {
            assert!(!board.is_row_full(y as usize));
            assert_eq!(board.get(0, y), Some(None), "row {} should be empty", y);
        }
    }

    #[test]
    fn test_clear_four_full_rows_in_one_pass() {
        let mut board = Board::new();
        for y in 16..20 {
            board.fill_row(y, PieceKind::I);
        }
        board.set(7, 15, Some(PieceKind::T));

        assert_eq!(board.clear_full_rows(), 4);
        assert_eq!(board.get(7, 19), Some(Some(PieceKind::T)));
        for y in 0..19 {
            assert_eq!(board.get(7, y), Some(None));
        }
    }

    #[test]
    fn test_clear_non_adjacent_full_rows() {
        let mut board = Board::new();
        board.fill_row(19, PieceKind::J);
        board.set(2, 18, Some(PieceKind::O)); // partial row between the full ones
        board.fill_row(17, PieceKind::L);

        assert_eq!(board.clear_full_rows(), 2);
        // The partial row keeps its contents, shifted down by one.
        assert_eq!(board.get(2, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.get(2, 18), Some(None));
    }

    #[test]
    fn test_clear_full_top_row_terminates() {
        let mut board = Board::new();
        board.fill_row(0, PieceKind::T);
        assert_eq!(board.clear_full_rows(), 1);
        assert!(!board.is_row_full(0));
    }

    #[test]
    fn test_write_u8_grid_uses_cell_values() {
        let mut board = Board::new();
        board.set(0, 19, Some(PieceKind::I));
        board.set(9, 0, Some(PieceKind::L));

        let mut grid = [[0u8; BOARD_WIDTH]; BOARD_HEIGHT];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[19][0], 1);
        assert_eq!(grid[0][9], 7);
        assert_eq!(grid[10][5], 0);
    }
}
